//! Implements a struct that holds the state of the server.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{Error, NotificationChannel, session::Session, timezone::get_local_date};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The beneficiaries, notification date and send status shown on the page.
    pub session: Arc<Mutex<Session>>,

    /// Where composed messages are handed off to.
    pub channel: Arc<dyn NotificationChannel>,

    /// How long a batch send waits before dispatching, standing in for the
    /// latency of an SMS provider.
    pub send_delay: Duration,
}

impl AppState {
    /// Create a new [AppState] with an empty session dated today.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Africa/Tunis", and decides which day "today" is.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        local_timezone: &str,
        send_delay: Duration,
        channel: Arc<dyn NotificationChannel>,
    ) -> Result<Self, Error> {
        let today = get_local_date(local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(local_timezone.to_owned()))?;

        Ok(Self {
            session: Arc::new(Mutex::new(Session::new(today))),
            channel,
            send_delay,
        })
    }
}

impl Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session)
            .field("send_delay", &self.send_delay)
            .finish_non_exhaustive()
    }
}
