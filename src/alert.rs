//! Alert system for displaying success and error messages to users.
//!
//! Alerts render into the `#alert-container` element that [crate::html::base]
//! places on every page. Handlers either return an alert as the whole response
//! (error paths, targeted with `hx-target-error`) or append it out-of-band to
//! a re-rendered fragment.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A message shown to the user after an action completes or fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as a replacement for the alert container.
    pub fn into_html(self) -> Markup {
        self.render(false)
    }

    /// Render the alert so htmx swaps it into the alert container regardless
    /// of the request's target.
    pub fn into_oob_html(self) -> Markup {
        self.render(true)
    }

    fn render(self, out_of_band: bool) -> Markup {
        let (is_error, message, details) = match self {
            Alert::Success { message, details } => (false, message, Some(details)),
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        let style = if is_error {
            "flex items-start gap-3 p-4 rounded border shadow \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 rounded border shadow \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };
        let swap_oob = out_of_band.then_some("true");

        html! {
            div
                id="alert-container"
                hx-swap-oob=[swap_oob]
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(style)
                {
                    div class="flex-1"
                    {
                        p class="text-sm font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1 text-sm opacity-80" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-sm font-semibold opacity-70 hover:opacity-100"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "✕"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let alert = Alert::Error {
            message: "Could not import beneficiaries".to_owned(),
            details: "The file is empty.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        assert!(html.errors.is_empty(), "{:?}", html.errors);
        let message = html
            .select(&Selector::parse("#alert-container p.text-sm.font-medium").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Could not import beneficiaries");
        let details = html
            .select(&Selector::parse("#alert-container p.mt-1").unwrap())
            .next()
            .expect("No alert details found")
            .text()
            .collect::<String>();
        assert_eq!(details.trim(), "The file is empty.");
    }

    #[test]
    fn simple_alert_has_no_details() {
        let alert = Alert::SuccessSimple {
            message: "Beneficiary removed".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        assert!(
            html.select(&Selector::parse("p.mt-1").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn out_of_band_alert_sets_swap_attribute() {
        let alert = Alert::SuccessSimple {
            message: "Done".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_oob_html().into_string());

        let container = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("No alert container found");
        assert_eq!(container.value().attr("hx-swap-oob"), Some("true"));
    }
}
