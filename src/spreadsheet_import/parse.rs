//! Reading CSV exports of spreadsheets into loosely-typed rows.

use csv::{ReaderBuilder, Trim};

use crate::{Error, beneficiary::Row};

/// The rows of one spreadsheet, together with its column names.
#[derive(Debug, Clone, PartialEq)]
pub struct Spreadsheet {
    /// The non-empty column names from the header row, in file order.
    pub columns: Vec<String>,
    /// One record per non-blank line after the header.
    pub rows: Vec<Row>,
}

/// Parse CSV text whose first line holds the column names.
///
/// Cells are trimmed, and empty cells are left out of their row. Lines with no
/// populated cells are skipped. Files exported with a European locale separate
/// cells with `;`, which is detected from the header line.
///
/// # Errors
///
/// Returns [Error::InvalidSpreadsheet] if the file has no header row or a
/// record cannot be read.
pub fn parse_spreadsheet(text: &str) -> Result<Spreadsheet, Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::InvalidSpreadsheet("The file is empty".to_owned()))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| {
            tracing::debug!("Could not read spreadsheet header: {error}");
            Error::InvalidSpreadsheet("The column names could not be read".to_owned())
        })?
        .clone();

    let columns = headers
        .iter()
        .filter(|column| !column.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>();

    if columns.is_empty() {
        return Err(Error::InvalidSpreadsheet(
            "The first line has no column names".to_owned(),
        ));
    }

    let mut rows = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|error| {
            tracing::debug!("Could not read spreadsheet record: {error}");
            // Line 1 is the header.
            Error::InvalidSpreadsheet(format!("Line {} could not be read", line + 2))
        })?;

        let mut row = Row::new();

        for (column, cell) in headers.iter().zip(record.iter()) {
            if column.is_empty() || cell.is_empty() {
                continue;
            }

            row.entry(column.to_owned())
                .or_insert_with(|| cell.to_owned());
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(Spreadsheet { columns, rows })
}

fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') && !header_line.contains(',') {
        b';'
    } else {
        b','
    }
}
