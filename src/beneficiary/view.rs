//! The part of the page that lists beneficiaries, previews their messages and
//! sends them.
//!
//! Every endpoint that changes the session responds with this section so the
//! positions used by the remove buttons always match the list on the server.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};
use time::Date;

use crate::{
    alert::Alert,
    beneficiary::{Beneficiary, PaymentMethod},
    endpoints,
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, WARNING_BADGE_STYLE, loading_spinner,
    },
    notification::{SendStatus, compose_message, sms_stats},
    session::Session,
};

/// The id of the element that mutating requests replace.
pub const SECTION_ID: &str = "beneficiaries";

/// Selects the section as an htmx target.
const SECTION_TARGET: &str = "#beneficiaries";

/// Render the beneficiary list, the message previews and the send controls.
pub fn beneficiaries_section(session: &Session) -> Markup {
    let beneficiaries = session.beneficiaries().as_slice();
    let date = session.notification_date();
    let send_status = session.send_status();
    let is_sending = send_status == SendStatus::Sending;

    html! {
        section id=(SECTION_ID) class=(CARD_STYLE)
        {
            header class="flex justify-between flex-wrap items-end gap-2"
            {
                h2 class="text-xl font-bold"
                {
                    "Beneficiaries "
                    span class=(BADGE_STYLE) { (beneficiaries.len()) }
                }

                button
                    type="button"
                    hx-delete=(endpoints::BENEFICIARIES_API)
                    hx-confirm="Are you sure you want to remove every beneficiary?"
                    hx-target=(SECTION_TARGET)
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    disabled[beneficiaries.is_empty() || is_sending]
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Remove all"
                }
            }

            (send_status_view(send_status))

            (beneficiary_table(beneficiaries, is_sending))

            @if !beneficiaries.is_empty() {
                (previews_view(beneficiaries, date))
            }

            button
                id="send-button"
                type="button"
                hx-post=(endpoints::SEND)
                hx-target=(SECTION_TARGET)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-disabled-elt="button, input"
                hx-indicator="#send-indicator"
                disabled[beneficiaries.is_empty() || is_sending]
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" id="send-indicator" { (loading_spinner()) }
                " Send notifications"
            }
        }
    }
}

/// Respond with the section, plus an alert swapped in out-of-band.
pub fn section_response(session: &Session, alert: Option<Alert>) -> Response {
    html! {
        (beneficiaries_section(session))

        @if let Some(alert) = alert {
            (alert.into_oob_html())
        }
    }
    .into_response()
}

fn send_status_view(send_status: SendStatus) -> Markup {
    let dismiss_button = html! {
        button
            type="button"
            hx-delete=(endpoints::SEND)
            hx-target=(SECTION_TARGET)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="text-sm font-semibold underline"
        {
            "Dismiss"
        }
    };

    html! {
        @match send_status {
            SendStatus::Idle => {},
            SendStatus::Sending => {
                div
                    id="send-status"
                    role="status"
                    class="p-4 rounded border text-blue-800 bg-blue-50 border-blue-300
                        dark:bg-gray-800 dark:text-blue-400 dark:border-blue-800"
                {
                    p class="text-sm font-medium" { "Sending notifications…" }
                }
            },
            SendStatus::Succeeded { sent } => {
                div
                    id="send-status"
                    role="status"
                    class="flex justify-between items-center p-4 rounded border
                        text-green-800 bg-green-50 border-green-300
                        dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
                {
                    p class="text-sm font-medium"
                    {
                        @if sent == 1 {
                            "1 notification was sent."
                        } @else {
                            (sent) " notifications were sent."
                        }
                    }

                    (dismiss_button)
                }
            },
            SendStatus::Failed => {
                div
                    id="send-status"
                    role="alert"
                    class="flex justify-between items-center p-4 rounded border
                        text-red-800 bg-red-50 border-red-300
                        dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                {
                    p class="text-sm font-medium"
                    {
                        "Notifications could not be sent. \
                        Some beneficiaries may not have been notified."
                    }

                    (dismiss_button)
                }
            },
        }
    }
}

fn beneficiary_table(beneficiaries: &[Beneficiary], is_sending: bool) -> Markup {
    let table_row = |index: usize, beneficiary: &Beneficiary| {
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_BENEFICIARY, index);
        let confirm_message = format!(
            "Are you sure you want to remove '{}' from the list?",
            beneficiary.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (index + 1) }
                td class=(TABLE_CELL_STYLE) { (required_cell(&beneficiary.name)) }
                td class=(TABLE_CELL_STYLE) { (required_cell(&beneficiary.phone)) }
                td class=(TABLE_CELL_STYLE) { (required_cell(&beneficiary.reference)) }
                td class=(TABLE_CELL_STYLE) { (beneficiary.payment_method.label()) }
                td class=(TABLE_CELL_STYLE)
                {
                    @if beneficiary.is_missing_account_number() {
                        span class=(WARNING_BADGE_STYLE) { "Account number missing" }
                    } @else if beneficiary.payment_method == PaymentMethod::Transfer {
                        (beneficiary.account_number.as_deref().unwrap_or_default())
                    }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target=(SECTION_TARGET)
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        disabled[is_sending]
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Remove"
                    }
                }
            }
        )
    };

    html! {
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "#" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Reference" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for (index, beneficiary) in beneficiaries.iter().enumerate() {
                        (table_row(index, beneficiary))
                    }

                    @if beneficiaries.is_empty() {
                        tr
                        {
                            td
                                colspan="7"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No beneficiaries yet. Import a spreadsheet or add one by hand."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Imported rows can have empty required fields, which are flagged rather than hidden.
fn required_cell(value: &str) -> Markup {
    html! {
        @if value.is_empty() {
            span class=(WARNING_BADGE_STYLE) { "Missing" }
        } @else {
            (value)
        }
    }
}

fn previews_view(beneficiaries: &[Beneficiary], date: Date) -> Markup {
    html! {
        section id="previews" class="space-y-3"
        {
            h3 class="text-lg font-semibold" { "Message previews" }

            ul class="grid gap-3 md:grid-cols-2"
            {
                @for beneficiary in beneficiaries {
                    @let message = compose_message(beneficiary, date);
                    @let stats = sms_stats(&message);

                    li class="p-4 space-y-2 rounded border border-gray-200 dark:border-gray-700"
                    {
                        p class="text-sm font-medium"
                        {
                            (beneficiary.name) " · " (beneficiary.phone)
                        }

                        p class="sms-preview text-sm" { (message) }

                        p class="text-xs text-gray-500 dark:text-gray-400"
                        {
                            (stats.characters) " characters · " (stats.segments) " SMS"
                            @if !stats.is_gsm {
                                " (Unicode)"
                            }
                        }
                    }
                }
            }
        }
    }
}
