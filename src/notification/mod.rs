//! Composing notification messages and sending them in a batch.

mod channel;
mod compose;
mod date;
mod send;

pub use channel::{NotificationChannel, OutgoingMessage, SimulatedChannel};
pub use compose::{
    CASH_INSTRUCTION, SmsStats, TRANSFER_INSTRUCTION, compose_message, sms_stats,
};
pub use date::{NotificationDateForm, parse_notification_date, update_notification_date_endpoint};
pub use send::{
    SendBatch, SendState, SendStatus, dismiss_send_status_endpoint, dispatch_batch, send_batch,
    send_notifications_endpoint,
};
