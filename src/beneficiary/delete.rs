//! Removing beneficiaries from the list.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    alert::Alert,
    beneficiary::section_response,
    session::{SessionState, lock_session},
};

/// Route handler for removing the beneficiary at `index`.
///
/// Later beneficiaries move up one position, so the response re-renders the
/// whole section.
pub async fn delete_beneficiary_endpoint(
    Path(index): Path<usize>,
    State(state): State<SessionState>,
) -> Response {
    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    match session.beneficiaries_mut().remove_at(index) {
        Ok(removed) => {
            tracing::info!(
                "Removed beneficiary with reference {} at position {index}",
                removed.reference
            );

            section_response(
                &session,
                Some(Alert::SuccessSimple {
                    message: format!("Removed {}", display_name(&removed.name)),
                }),
            )
        }
        Err(error) => {
            tracing::warn!("Could not remove beneficiary: {error}");
            error.into_alert_response()
        }
    }
}

/// Route handler for removing every beneficiary.
pub async fn clear_beneficiaries_endpoint(State(state): State<SessionState>) -> Response {
    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    let count = session.beneficiaries().len();
    session.beneficiaries_mut().clear();
    tracing::info!("Removed all {count} beneficiaries");

    section_response(
        &session,
        Some(Alert::SuccessSimple {
            message: "Removed all beneficiaries".to_owned(),
        }),
    )
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "beneficiary" } else { name }
}


#[cfg(test)]
mod clear_beneficiaries_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        beneficiary::{Beneficiary, PaymentMethod, clear_beneficiaries_endpoint},
        session::{Session, SessionState},
        test_utils::assert_alert_message,
    };

    #[tokio::test]
    async fn removes_everyone() {
        let mut session = Session::new(date!(2024 - 01 - 01));
        session.beneficiaries_mut().add_manual(Beneficiary {
            name: "Ali".to_owned(),
            phone: "0600".to_owned(),
            reference: "B1".to_owned(),
            payment_method: PaymentMethod::Cash,
            account_number: None,
        });
        let state = SessionState {
            session: Arc::new(Mutex::new(session)),
        };

        let response = clear_beneficiaries_endpoint(State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.session.lock().unwrap().beneficiaries().is_empty());
        assert_alert_message(response, "Removed all beneficiaries").await;
    }

    #[tokio::test]
    async fn clearing_empty_list_is_harmless() {
        let state = SessionState {
            session: Arc::new(Mutex::new(Session::new(date!(2024 - 01 - 01)))),
        };

        let response = clear_beneficiaries_endpoint(State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.session.lock().unwrap().beneficiaries().is_empty());
    }
}
