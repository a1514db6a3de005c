//! The state of one user's session: the beneficiaries, the notification date
//! and where the batch send is at.
//!
//! Route handlers lock the session, call one of the methods below, and render
//! the result. Nothing outside this struct holds UI state.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use time::Date;

use crate::{
    AppState, Error,
    beneficiary::BeneficiaryStore,
    notification::{SendBatch, SendStatus},
};

/// Everything the page displays, kept in memory until the server stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    beneficiaries: BeneficiaryStore,
    notification_date: Date,
    send_status: SendStatus,
}

impl Session {
    /// Create a session with no beneficiaries that quotes `notification_date`
    /// in its messages.
    pub fn new(notification_date: Date) -> Self {
        Self {
            beneficiaries: BeneficiaryStore::new(),
            notification_date,
            send_status: SendStatus::Idle,
        }
    }

    /// The beneficiaries to notify.
    pub fn beneficiaries(&self) -> &BeneficiaryStore {
        &self.beneficiaries
    }

    /// The beneficiaries to notify, for adding or removing them.
    pub fn beneficiaries_mut(&mut self) -> &mut BeneficiaryStore {
        &mut self.beneficiaries
    }

    /// The date quoted in every message.
    pub fn notification_date(&self) -> Date {
        self.notification_date
    }

    /// Change the date quoted in every message.
    pub fn set_notification_date(&mut self, date: Date) {
        self.notification_date = date;
    }

    /// Where the batch send is at.
    pub fn send_status(&self) -> SendStatus {
        self.send_status
    }

    /// Start a batch send and take a snapshot of what to send.
    ///
    /// Returns `Ok(None)` without changing anything when there are no
    /// beneficiaries. Otherwise the status moves to [SendStatus::Sending],
    /// replacing the outcome of any previous send.
    ///
    /// # Errors
    ///
    /// Returns [Error::SendInProgress] if a send is already pending.
    pub fn begin_send(&mut self) -> Result<Option<SendBatch>, Error> {
        if self.send_status == SendStatus::Sending {
            return Err(Error::SendInProgress);
        }

        if self.beneficiaries.is_empty() {
            return Ok(None);
        }

        self.send_status = SendStatus::Sending;

        Ok(Some(SendBatch {
            beneficiaries: self.beneficiaries.as_slice().to_vec(),
            date: self.notification_date,
        }))
    }

    /// Record the outcome of the pending send.
    ///
    /// Does nothing if no send is pending.
    pub fn finish_send(&mut self, outcome: &Result<usize, Error>) {
        if self.send_status != SendStatus::Sending {
            tracing::warn!("Ignoring send outcome because no send is pending");
            return;
        }

        self.send_status = match outcome {
            Ok(sent) => SendStatus::Succeeded { sent: *sent },
            Err(_) => SendStatus::Failed,
        };
    }

    /// Clear the outcome of the last send.
    ///
    /// A pending send cannot be dismissed.
    pub fn dismiss_send_status(&mut self) {
        if self.send_status != SendStatus::Sending {
            self.send_status = SendStatus::Idle;
        }
    }
}

/// The state needed by handlers that only touch the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// Lock the session, logging and converting a poisoned lock into an error.
pub fn lock_session(session: &Mutex<Session>) -> Result<MutexGuard<'_, Session>, Error> {
    session
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)
}
