//! # Broadcast Errors
//!
//! Errors raised by subscriber callbacks and by [`publish`](super::Broadcaster::publish)
//! under [`FaultPolicy::Abort`](super::FaultPolicy::Abort).

use thiserror::Error;

use super::SubscriptionId;

/// Returned by a subscriber callback that could not handle a payload.
#[derive(Debug, Error)]
pub enum SubscriberError {
    /// The payload was understood but refused.
    #[error("Payload rejected: {0}")]
    Rejected(String),

    /// The payload could not be decoded into the shape the subscriber expects.
    #[error("Payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Subscriber error: {0}")]
    Custom(String),
}

impl From<String> for SubscriberError {
    fn from(msg: String) -> Self {
        SubscriberError::Custom(msg)
    }
}

/// A publish pass that stopped early.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Subscriber {subscription} failed, {skipped} notification(s) skipped")]
    Aborted {
        subscription: SubscriptionId,
        skipped: usize,
        #[source]
        source: SubscriberError,
    },
}
