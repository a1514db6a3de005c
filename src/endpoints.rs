//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/beneficiaries/{index}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the notifications page.
pub const ROOT: &str = "/";
/// The single page for managing beneficiaries and sending notifications.
pub const NOTIFICATIONS_VIEW: &str = "/notifications";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to add a beneficiary (POST) or remove all of them (DELETE).
pub const BENEFICIARIES_API: &str = "/api/beneficiaries";
/// The route to remove the beneficiary at a position in the list.
pub const DELETE_BENEFICIARY: &str = "/api/beneficiaries/{index}";
/// The route to upload spreadsheets of beneficiaries.
pub const IMPORT: &str = "/api/beneficiaries/import";
/// The route to change the date used in notification messages.
pub const NOTIFICATION_DATE: &str = "/api/notification-date";
/// The route to send notifications (POST) or dismiss the outcome (DELETE).
pub const SEND: &str = "/api/send";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/beneficiaries/{index}', '{index}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::NOTIFICATIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::BENEFICIARIES_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_BENEFICIARY);
        assert_endpoint_is_valid_uri(endpoints::IMPORT);
        assert_endpoint_is_valid_uri(endpoints::NOTIFICATION_DATE);
        assert_endpoint_is_valid_uri(endpoints::SEND);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint(endpoints::DELETE_BENEFICIARY, 0usize);

        assert_eq!(formatted_path, "/api/beneficiaries/0");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
