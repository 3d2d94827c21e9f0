//! # Routing Errors
//!
//! Every rejection leaves the broker's tables untouched.

use std::fmt;
use thiserror::Error;

/// Broker operation named in [`BrokerError::UnknownSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RemoveSession,
    Subscribe,
    Unsubscribe,
    Publish,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::RemoveSession => "remove session",
            Operation::Subscribe => "subscribe",
            Operation::Unsubscribe => "unsubscribe",
            Operation::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// Errors raised by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    /// `add_session` called for a session that is already active.
    #[error("cannot add session {session_id} twice")]
    DuplicateSession { session_id: u64 },

    /// The session is not active.
    #[error("cannot {operation}, session {session_id} doesn't exist")]
    UnknownSession { operation: Operation, session_id: u64 },

    /// The caller holds no membership in this subscription.
    #[error("cannot unsubscribe, subscription {subscription_id} doesn't exist")]
    UnknownSubscription { subscription_id: u64 },

    /// The broker only routes `SUBSCRIBE` and `UNSUBSCRIBE` messages.
    #[error("message type {message_type} not supported")]
    UnsupportedMessageType { message_type: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_texts() {
        assert_eq!(
            BrokerError::DuplicateSession { session_id: 1 }.to_string(),
            "cannot add session 1 twice"
        );
        assert_eq!(
            BrokerError::UnknownSession {
                operation: Operation::RemoveSession,
                session_id: 4
            }
            .to_string(),
            "cannot remove session, session 4 doesn't exist"
        );
        assert_eq!(
            BrokerError::UnknownSubscription { subscription_id: 9 }.to_string(),
            "cannot unsubscribe, subscription 9 doesn't exist"
        );
        assert_eq!(
            BrokerError::UnsupportedMessageType { message_type: "CALL" }.to_string(),
            "message type CALL not supported"
        );
    }
}
