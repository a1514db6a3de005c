//! The boundary between the batch send and whatever delivers text messages.

use serde::Serialize;

use crate::Error;

/// A composed text message addressed to a phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// Where the message is sent.
    pub phone: String,
    /// The text of the message.
    pub body: String,
}

/// Delivers text messages to beneficiaries.
pub trait NotificationChannel: Send + Sync {
    /// Hand one message over for delivery.
    ///
    /// # Errors
    ///
    /// Returns [Error::DispatchFailed] if the message could not be handed over.
    fn dispatch(&self, message: &OutgoingMessage) -> Result<(), Error>;
}

/// A channel that only logs the messages it is given.
///
/// There is no SMS provider behind this tool, so every dispatch succeeds.
#[derive(Debug, Clone, Default)]
pub struct SimulatedChannel;

impl NotificationChannel for SimulatedChannel {
    fn dispatch(&self, message: &OutgoingMessage) -> Result<(), Error> {
        let logged = OutgoingMessage {
            phone: mask_phone(&message.phone),
            body: message.body.clone(),
        };

        match serde_json::to_string(&logged) {
            Ok(json) => tracing::info!("Simulated SMS dispatch: {json}"),
            Err(error) => tracing::warn!("Could not serialize simulated SMS for logging: {error}"),
        }

        Ok(())
    }
}

/// Hide all but the last two characters of a phone number.
fn mask_phone(phone: &str) -> String {
    let length = phone.chars().count();

    phone
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 2 < length { '*' } else { c })
        .collect()
}

#[cfg(test)]
mod simulated_channel_tests {
    use crate::notification::{NotificationChannel, OutgoingMessage, SimulatedChannel};

    use super::mask_phone;

    #[test]
    fn simulated_dispatch_succeeds() {
        let message = OutgoingMessage {
            phone: "0600000000".to_owned(),
            body: "Bonjour".to_owned(),
        };

        assert_eq!(SimulatedChannel.dispatch(&message), Ok(()));
    }

    #[test]
    fn masks_all_but_last_two_characters() {
        assert_eq!(mask_phone("0612345678"), "********78");
        assert_eq!(mask_phone("12"), "12");
        assert_eq!(mask_phone(""), "");
    }
}
