use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    Error,
    notification::{NotificationChannel, OutgoingMessage},
};

/// A channel that keeps every message it is given.
#[derive(Debug, Default)]
pub(crate) struct RecordingChannel {
    sent: Mutex<Vec<OutgoingMessage>>,
}

impl RecordingChannel {
    pub(crate) fn messages(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationChannel for RecordingChannel {
    fn dispatch(&self, message: &OutgoingMessage) -> Result<(), Error> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// A channel that accepts messages until the attempt at `fail_at` (zero-based).
#[derive(Debug)]
pub(crate) struct FailingChannel {
    fail_at: usize,
    attempts: AtomicUsize,
}

impl FailingChannel {
    pub(crate) fn failing_at(fail_at: usize) -> Self {
        Self {
            fail_at,
            attempts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl NotificationChannel for FailingChannel {
    fn dispatch(&self, _message: &OutgoingMessage) -> Result<(), Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt >= self.fail_at {
            Err(Error::DispatchFailed("provider unavailable".to_owned()))
        } else {
            Ok(())
        }
    }
}
