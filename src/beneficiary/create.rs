//! Manual entry of a single beneficiary.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    beneficiary::BeneficiaryForm,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    session::{SessionState, lock_session},
};

/// The id of the manual entry form.
pub const MANUAL_ENTRY_FORM_ID: &str = "manual-entry-form";

/// Handle manual entry form submission.
///
/// Invalid input re-renders the form with the submitted values and an error
/// message. A valid beneficiary is appended to the list and the client is
/// redirected to the notifications page.
pub async fn create_beneficiary_endpoint(
    State(state): State<SessionState>,
    Form(form): Form<BeneficiaryForm>,
) -> Response {
    let beneficiary = match form.validate() {
        Ok(beneficiary) => beneficiary,
        Err(error) => {
            return manual_entry_form_view(&form, &format!("Error: {error}")).into_response();
        }
    };

    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!(
        "Adding beneficiary with reference {} by hand",
        beneficiary.reference
    );
    session.beneficiaries_mut().add_manual(beneficiary);

    (
        HxRedirect(endpoints::NOTIFICATIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// Render the manual entry form filled in with `form`.
///
/// `error_message` is shown above the submit button when it is not empty.
pub fn manual_entry_form_view(form: &BeneficiaryForm, error_message: &str) -> Markup {
    let is_transfer = form.payment_method == "transfer";

    html! {
        form
            id=(MANUAL_ENTRY_FORM_ID)
            hx-post=(endpoints::BENEFICIARIES_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div class="grid gap-4 md:grid-cols-3"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="Ali Ben Salah"
                        value=(form.name)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="phone" class=(FORM_LABEL_STYLE) { "Phone" }

                    input
                        id="phone"
                        type="text"
                        name="phone"
                        placeholder="0600000000"
                        value=(form.phone)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="reference" class=(FORM_LABEL_STYLE) { "Reference" }

                    input
                        id="reference"
                        type="text"
                        name="reference"
                        placeholder="BON-0001"
                        value=(form.reference)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Payment method" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            id="payment-method-cash"
                            type="radio"
                            name="payment_method"
                            value="cash"
                            checked[!is_transfer]
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="payment-method-cash"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Cash"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            id="payment-method-transfer"
                            type="radio"
                            name="payment_method"
                            value="transfer"
                            checked[is_transfer]
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="payment-method-transfer"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Bank transfer"
                        }
                    }
                }
            }

            div
            {
                label for="account_number" class=(FORM_LABEL_STYLE)
                {
                    "Account number "
                    span class="font-normal text-gray-500 dark:text-gray-400"
                    {
                        "(bank transfers only)"
                    }
                }

                input
                    id="account_number"
                    type="text"
                    name="account_number"
                    placeholder="007 780 0001234567890123 45"
                    value=(form.account_number)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="form-error text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add beneficiary" }
        }
    }
}
