//! The alert shown after a spreadsheet import.

use std::{sync::OnceLock, time::Duration};

use numfmt::{Formatter, Precision};

use crate::{alert::Alert, beneficiary::Field};

/// Creates the alert for an import that appended `imported_count` beneficiaries.
///
/// `missing_fields` lists the required fields no uploaded file had a column
/// for. Rows are imported regardless, so this is reported as a warning in the
/// alert details.
pub fn import_success(
    imported_count: usize,
    missing_fields: &[Field],
    duration: Duration,
) -> Alert {
    let formatter = get_thousands_separator_formatter();
    let count = formatter.fmt_string(imported_count);
    let duration_ms = formatter.fmt_string(duration.as_millis());

    tracing::info!("Import completed in {duration_ms}ms: {count} beneficiaries imported");

    if imported_count == 0 {
        return Alert::Success {
            message: "Import completed".to_owned(),
            details: format!("The files had no beneficiaries to import. Completed in {duration_ms}ms."),
        };
    }

    let noun = if imported_count == 1 {
        "beneficiary"
    } else {
        "beneficiaries"
    };

    if missing_fields.is_empty() {
        return Alert::Success {
            message: "Import completed successfully!".to_owned(),
            details: format!("Imported {count} {noun} in {duration_ms}ms."),
        };
    }

    let missing = missing_fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ");

    tracing::warn!("Imported spreadsheet has no column for: {missing}");

    Alert::Success {
        message: "Import completed with warnings".to_owned(),
        details: format!(
            "Imported {count} {noun} in {duration_ms}ms, but no column was found for: {missing}. \
            Check the highlighted cells in the list."
        ),
    }
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}
