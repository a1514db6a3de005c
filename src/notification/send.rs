//! Sending every beneficiary their notification in one batch.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    beneficiary::{Beneficiary, section_response},
    notification::{NotificationChannel, OutgoingMessage, compose_message},
    session::{Session, lock_session},
};

/// Where the batch send is in its lifecycle.
///
/// `Idle -> Sending -> Succeeded | Failed`, and dismissing an outcome returns
/// to `Idle`. There is no retry or cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendStatus {
    /// No send is pending and no outcome is displayed.
    #[default]
    Idle,
    /// A batch has been handed off and has not finished yet.
    Sending,
    /// Every message in the batch was dispatched.
    Succeeded {
        /// The number of messages dispatched.
        sent: usize,
    },
    /// The batch stopped at a failed dispatch.
    Failed,
}

/// A snapshot of what to send, taken when the send starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SendBatch {
    /// The beneficiaries to notify, in list order.
    pub beneficiaries: Vec<Beneficiary>,
    /// The date quoted in every message.
    pub date: Date,
}

/// Compose and dispatch a message for each beneficiary, in order.
///
/// Returns the number of messages dispatched.
///
/// # Errors
///
/// Stops at the first message the channel cannot dispatch and returns
/// [Error::DispatchFailed]. Messages dispatched before the failure are not
/// reported.
pub fn send_batch(
    beneficiaries: &[Beneficiary],
    date: Date,
    channel: &dyn NotificationChannel,
) -> Result<usize, Error> {
    for beneficiary in beneficiaries {
        let message = OutgoingMessage {
            phone: beneficiary.phone.clone(),
            body: compose_message(beneficiary, date),
        };

        channel.dispatch(&message).map_err(|error| match error {
            Error::DispatchFailed(_) => error,
            error => Error::DispatchFailed(error.to_string()),
        })?;
    }

    Ok(beneficiaries.len())
}

/// Wait for `delay`, then send `batch` through `channel`.
///
/// The delay stands in for the latency of a real SMS provider.
pub async fn dispatch_batch(
    batch: &SendBatch,
    channel: &dyn NotificationChannel,
    delay: Duration,
) -> Result<usize, Error> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    send_batch(&batch.beneficiaries, batch.date, channel)
}

/// The state needed for sending notifications.
#[derive(Clone)]
pub struct SendState {
    pub session: Arc<Mutex<Session>>,
    pub channel: Arc<dyn NotificationChannel>,
    pub send_delay: Duration,
}

impl FromRef<AppState> for SendState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            channel: state.channel.clone(),
            send_delay: state.send_delay,
        }
    }
}

/// Route handler for sending a notification to every beneficiary.
///
/// The batch is dispatched on its own task, which records the outcome on the
/// session. The send finishes even if the client goes away before the
/// response is ready. The session lock is released while the batch is
/// dispatched.
pub async fn send_notifications_endpoint(State(state): State<SendState>) -> Response {
    let batch = match lock_session(&state.session).and_then(|mut session| session.begin_send()) {
        Ok(Some(batch)) => batch,
        Ok(None) => {
            return match lock_session(&state.session) {
                Ok(session) => section_response(
                    &session,
                    Some(Alert::ErrorSimple {
                        message: "There are no beneficiaries to notify.".to_owned(),
                    }),
                ),
                Err(error) => error.into_alert_response(),
            };
        }
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!(
        "Sending {} notifications dated {}",
        batch.beneficiaries.len(),
        batch.date
    );

    let send_task = tokio::spawn(run_send(
        batch,
        state.session.clone(),
        state.channel.clone(),
        state.send_delay,
    ));

    if let Err(error) = send_task.await {
        tracing::error!("Send task did not complete: {error}");

        if let Ok(mut session) = lock_session(&state.session) {
            session.finish_send(&Err(Error::DispatchFailed(error.to_string())));
        }
    }

    match lock_session(&state.session) {
        Ok(session) => section_response(&session, None),
        Err(error) => error.into_alert_response(),
    }
}

/// Dispatch `batch` and record the outcome on `session`.
async fn run_send(
    batch: SendBatch,
    session: Arc<Mutex<Session>>,
    channel: Arc<dyn NotificationChannel>,
    delay: Duration,
) {
    let outcome = dispatch_batch(&batch, channel.as_ref(), delay).await;

    match &outcome {
        Ok(sent) => tracing::info!("Sent {sent} notifications"),
        Err(error) => tracing::error!("Batch send failed: {error}"),
    }

    if let Ok(mut session) = lock_session(&session) {
        session.finish_send(&outcome);
    }
}

/// Route handler for dismissing the outcome of the last batch send.
pub async fn dismiss_send_status_endpoint(State(state): State<SendState>) -> Response {
    let mut session = match lock_session(&state.session) {
        Ok(session) => session,
        Err(error) => return error.into_alert_response(),
    };

    session.dismiss_send_status();

    section_response(&session, None)
}

#[cfg(test)]
mod send_batch_tests {
    use time::macros::date;

    use crate::{
        Error,
        beneficiary::{Beneficiary, PaymentMethod},
        notification::{SendBatch, compose_message, dispatch_batch, send_batch},
        test_utils::{FailingChannel, RecordingChannel},
    };

    fn beneficiaries() -> Vec<Beneficiary> {
        vec![
            Beneficiary {
                name: "Ali".to_owned(),
                phone: "0600".to_owned(),
                reference: "B1".to_owned(),
                payment_method: PaymentMethod::Transfer,
                account_number: Some("123".to_owned()),
            },
            Beneficiary {
                name: "Sara".to_owned(),
                phone: "0611".to_owned(),
                reference: "B2".to_owned(),
                payment_method: PaymentMethod::Cash,
                account_number: None,
            },
        ]
    }

    #[test]
    fn dispatches_each_message_in_order() {
        let channel = RecordingChannel::default();
        let beneficiaries = beneficiaries();
        let date = date!(2024 - 01 - 01);

        let sent = send_batch(&beneficiaries, date, &channel);

        assert_eq!(sent, Ok(2));
        let messages = channel.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].phone, "0600");
        assert_eq!(messages[0].body, compose_message(&beneficiaries[0], date));
        assert_eq!(messages[1].phone, "0611");
        assert_eq!(messages[1].body, compose_message(&beneficiaries[1], date));
    }

    #[test]
    fn empty_batch_dispatches_nothing() {
        let channel = RecordingChannel::default();

        assert_eq!(send_batch(&[], date!(2024 - 01 - 01), &channel), Ok(0));
        assert!(channel.messages().is_empty());
    }

    #[test]
    fn stops_at_first_failure() {
        let channel = FailingChannel::failing_at(0);

        let result = send_batch(&beneficiaries(), date!(2024 - 01 - 01), &channel);

        assert!(matches!(result, Err(Error::DispatchFailed(_))));
        assert_eq!(channel.attempts(), 1);
    }

    #[tokio::test]
    async fn dispatch_batch_sends_snapshot() {
        let channel = RecordingChannel::default();
        let batch = SendBatch {
            beneficiaries: beneficiaries(),
            date: date!(2024 - 01 - 01),
        };

        let sent = dispatch_batch(&batch, &channel, std::time::Duration::ZERO).await;

        assert_eq!(sent, Ok(2));
        assert_eq!(channel.messages().len(), 2);
    }
}
