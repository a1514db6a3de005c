//! PayNotify is a single-page tool for notifying payment beneficiaries by SMS.
//!
//! Beneficiaries are collected by spreadsheet import or manual entry, each one
//! gets a preview of the text message that will be sent to them, and a batch
//! send hands every message to a notification channel.
//!
//! This library provides the router that directly serves the HTML page and the
//! htmx fragments it requests.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod beneficiary;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod notification;
mod notifications_page;
mod routing;
mod session;
mod spreadsheet_import;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use beneficiary::{Beneficiary, BeneficiaryStore, PaymentMethod, Row};
pub use logging::logging_middleware;
pub use notification::{
    NotificationChannel, OutgoingMessage, SendStatus, SimulatedChannel, compose_message,
    send_batch,
};
pub use routing::build_router;
pub use session::Session;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field of the manual entry form was left empty.
    ///
    /// The string is the human readable name of the field.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A beneficiary paid by bank transfer was entered without an account number.
    #[error("an account number is required for bank transfers")]
    MissingAccountNumber,

    /// The payment method was not one of the accepted values.
    #[error("\"{0}\" is not a valid payment method, expected \"cash\" or \"transfer\"")]
    InvalidPaymentMethod(String),

    /// The notification date could not be parsed as an ISO 8601 calendar date.
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The multipart form could not be parsed as a list of files.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The spreadsheet had issues that prevented it from being parsed.
    #[error("Could not parse the spreadsheet: {0}")]
    InvalidSpreadsheet(String),

    /// There is no beneficiary at the requested position.
    ///
    /// Positions shift after every removal, so this usually means the page
    /// showing the list is out of date.
    #[error("there is no beneficiary at position {0}")]
    BeneficiaryNotFound(usize),

    /// A batch send was requested while another one is still pending.
    #[error("notifications are already being sent")]
    SendInProgress,

    /// The notification channel could not deliver a message.
    ///
    /// The batch is abandoned at the first failure, so the string should only
    /// be logged for debugging. Users are shown a generic failure.
    #[error("could not dispatch notification: {0}")]
    DispatchFailed(String),

    /// Could not acquire the session lock.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::BeneficiaryNotFound(_) => NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NotCSV => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "File type must be CSV.".to_owned(),
                },
            ),
            Error::InvalidSpreadsheet(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import beneficiaries".to_owned(),
                    details: format!(
                        "{reason}. Check that the file is a CSV export of your spreadsheet \
                        with the column names on the first line."
                    ),
                },
            ),
            Error::MultipartError(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not import beneficiaries".to_owned(),
                    details: "The uploaded files could not be read. Try uploading them again."
                        .to_owned(),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid notification date".to_owned(),
                    details: format!("\"{date}\" is not a valid date. Pick a date from the calendar."),
                },
            ),
            Error::BeneficiaryNotFound(_) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not remove beneficiary".to_owned(),
                    details: "The beneficiary could not be found. \
                        Try refreshing the page to see the current list."
                        .to_owned(),
                },
            ),
            Error::SendInProgress => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Notifications are already being sent".to_owned(),
                    details: "Wait for the current send to finish before starting another one."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
