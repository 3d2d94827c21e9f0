//! # Routing Results

use wamp_messages::{Event, Message};

/// A message addressed to one session.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageWithRecipient {
    pub recipient: u64,
    pub message: Message,
}

impl MessageWithRecipient {
    #[must_use]
    pub fn new(recipient: u64, message: impl Into<Message>) -> Self {
        Self {
            recipient,
            message: message.into(),
        }
    }
}

/// Outcome of routing one `PUBLISH`.
///
/// `event` is shared verbatim by every entry of `recipients`; it is `None`
/// exactly when `recipients` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    /// Subscriber sessions, ascending.
    pub recipients: Vec<u64>,
    pub event: Option<Event>,
    /// `PUBLISHED` for the publisher, present when it asked for one.
    pub ack: Option<MessageWithRecipient>,
}

impl Publication {
    /// Expands the shared event into one addressed message per recipient.
    #[must_use]
    pub fn deliveries(&self) -> Vec<MessageWithRecipient> {
        let Some(event) = &self.event else {
            return Vec::new();
        };
        self.recipients
            .iter()
            .map(|&recipient| MessageWithRecipient::new(recipient, event.clone()))
            .collect()
    }
}
