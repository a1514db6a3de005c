use std::time::Instant;

use axum::{
    extract::{Multipart, State, multipart::Field},
    response::Response,
};

use crate::{
    Error,
    beneficiary::{missing_fields, section_response},
    session::{SessionState, lock_session},
    spreadsheet_import::{alert::import_success, parse_spreadsheet},
};

/// Content types browsers use for CSV files. Windows labels them as Excel files.
const CSV_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

/// Route handler for importing beneficiaries from spreadsheet uploads.
///
/// Every uploaded file is parsed before any row is appended, so an upload
/// with one bad file leaves the list unchanged.
pub async fn import_beneficiaries(
    State(state): State<SessionState>,
    mut multipart: Multipart,
) -> Response {
    let start_time = Instant::now();
    let mut rows = Vec::new();
    let mut columns = Vec::new();
    let mut file_count = 0;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                tracing::error!("Could not read multipart form: {error}");
                return Error::MultipartError(error.body_text()).into_alert_response();
            }
        };

        let text = match parse_multipart_field(field).await {
            Ok(text) => text,
            Err(error) => return error.into_alert_response(),
        };

        let spreadsheet = match parse_spreadsheet(&text) {
            Ok(spreadsheet) => spreadsheet,
            Err(error) => {
                tracing::debug!("Failed to parse spreadsheet: {error}");
                return error.into_alert_response();
            }
        };

        file_count += 1;
        columns.extend(spreadsheet.columns);
        rows.extend(spreadsheet.rows);
    }

    if file_count == 0 {
        return Error::MultipartError("no files were uploaded".to_owned()).into_alert_response();
    }

    let column_names = columns.iter().map(String::as_str).collect::<Vec<_>>();
    let missing = missing_fields(&column_names);

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    let imported_count = session.beneficiaries_mut().import_rows(&rows);
    let alert = import_success(imported_count, &missing, start_time.elapsed());

    section_response(&session, Some(alert))
}

async fn parse_multipart_field(field: Field<'_>) -> Result<String, Error> {
    if !field
        .content_type()
        .is_some_and(|content_type| CSV_CONTENT_TYPES.contains(&content_type))
    {
        tracing::debug!(
            "Rejected upload with content type {:?}",
            field.content_type()
        );
        return Err(Error::NotCSV);
    }

    let file_name = match field.file_name() {
        Some(file_name) => file_name.to_owned(),
        None => {
            tracing::error!("Could not get file name from multipart form field: {field:#?}");
            return Err(Error::MultipartError(
                "Could not get file name from multipart form field".to_owned(),
            ));
        }
    };

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(error) => {
            tracing::error!("Could not read data from multipart form field: {error}");
            return Err(Error::MultipartError(
                "Could not read data from multipart form field.".to_owned(),
            ));
        }
    };

    let data = match String::from_utf8(data.to_vec()) {
        Ok(data) => data,
        Err(error) => {
            tracing::debug!("Rejected '{file_name}' because it is not UTF-8: {error}");
            return Err(Error::InvalidSpreadsheet(format!(
                "'{file_name}' is not UTF-8 text. Save it as \"CSV UTF-8\" and upload it again"
            )));
        }
    };

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(data)
}
