//! The page where beneficiaries are collected and notified.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    beneficiary::{BeneficiaryForm, beneficiaries_section, manual_entry_form_view},
    endpoints,
    html::{
        CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE,
        base,
    },
    session::{Session, SessionState, lock_session},
    spreadsheet_import::import_form_view,
};

/// The id of the form that changes the notification date.
const DATE_FORM_ID: &str = "notification-date-form";

/// Previews keep the line breaks of the text message.
const PREVIEW_STYLE: &str = ".sms-preview { white-space: pre-line; }";

/// Route handler for the notifications page.
pub async fn get_notifications_page(State(state): State<SessionState>) -> Response {
    let session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_response(),
    };

    notifications_view(&session).into_response()
}

fn notifications_view(session: &Session) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-2xl font-bold" { "Payment notifications" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Tell beneficiaries by SMS that their payment is ready."
                    }
                }

                section class=(CARD_STYLE)
                {
                    h2 class="text-xl font-bold" { "Notification date" }
                    (date_form_view(session.notification_date()))
                }

                div class="grid gap-6 md:grid-cols-2"
                {
                    section class=(CARD_STYLE)
                    {
                        h2 class="text-xl font-bold" { "Import a spreadsheet" }
                        (import_form_view())
                    }

                    section class=(CARD_STYLE)
                    {
                        h2 class="text-xl font-bold" { "Add a beneficiary" }
                        (manual_entry_form_view(&BeneficiaryForm::default(), ""))
                    }
                }

                (beneficiaries_section(session))
            }
        }
    };

    base(
        "Notifications",
        &[HeadElement::Style(PreEscaped(PREVIEW_STYLE.to_owned()))],
        &content,
    )
}

fn date_form_view(date: Date) -> Markup {
    html! {
        form
            id=(DATE_FORM_ID)
            hx-put=(endpoints::NOTIFICATION_DATE)
            hx-trigger="change"
            hx-target="#beneficiaries"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="max-w-xs"
        {
            label for="date" class=(FORM_LABEL_STYLE)
            {
                "Date quoted in every message"
            }

            input
                id="date"
                type="date"
                name="date"
                value=(date.to_string())
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod notifications_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        beneficiary::{Beneficiary, PaymentMethod},
        endpoints,
        notifications_page::{DATE_FORM_ID, get_notifications_page},
        session::{Session, SessionState},
        spreadsheet_import::IMPORT_FORM_ID,
        test_utils::{
            assert_content_type, assert_form_input, assert_hx_endpoint, assert_valid_html,
            must_get_form_by_id, parse_html_document,
        },
    };

    fn get_state() -> SessionState {
        let mut session = Session::new(date!(2024 - 01 - 01));
        session.beneficiaries_mut().add_manual(Beneficiary {
            name: "Ali".to_owned(),
            phone: "0600".to_owned(),
            reference: "B1".to_owned(),
            payment_method: PaymentMethod::Cash,
            account_number: None,
        });

        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let response = get_notifications_page(State(get_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let date_form = must_get_form_by_id(&html, DATE_FORM_ID);
        assert_hx_endpoint(&date_form, endpoints::NOTIFICATION_DATE, "hx-put");
        assert_form_input(&date_form, "date", "date");

        let import_form = must_get_form_by_id(&html, IMPORT_FORM_ID);
        assert_hx_endpoint(&import_form, endpoints::IMPORT, "hx-post");

        let manual_form = must_get_form_by_id(&html, "manual-entry-form");
        assert_hx_endpoint(&manual_form, endpoints::BENEFICIARIES_API, "hx-post");

        let rows = html
            .select(&Selector::parse("#beneficiaries tbody tr").unwrap())
            .count();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn date_input_shows_session_date() {
        let response = get_notifications_page(State(get_state())).await;

        let html = parse_html_document(response).await;

        let input = html
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .expect("No date input found");
        assert_eq!(input.value().attr("value"), Some("2024-01-01"));
    }
}
