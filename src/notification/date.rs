//! The date quoted in every notification message.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    beneficiary::section_response,
    session::{SessionState, lock_session},
};

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Form data for changing the notification date.
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationDateForm {
    pub date: String,
}

/// Parse a date in the `YYYY-MM-DD` format used by HTML date inputs.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date.
pub fn parse_notification_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), &ISO_DATE_FORMAT).map_err(|error| {
        tracing::debug!("Could not parse notification date {text:?}: {error}");
        Error::InvalidDate(text.to_owned())
    })
}

/// Route handler for changing the notification date.
///
/// Responds with the beneficiary section so the previews use the new date.
pub async fn update_notification_date_endpoint(
    State(state): State<SessionState>,
    Form(form): Form<NotificationDateForm>,
) -> Response {
    let date = match parse_notification_date(&form.date) {
        Ok(date) => date,
        Err(error) => return error.into_alert_response(),
    };

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    session.set_notification_date(date);
    tracing::info!("Notification date set to {date}");

    section_response(&session, None).into_response()
}
