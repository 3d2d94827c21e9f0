//! # WAMP Broker - Pub/Sub Routing Between Sessions
//!
//! Tracks live sessions and their topic subscriptions, and turns incoming
//! pub/sub messages into replies and fan-out.
//!
//! ## Flow
//!
//! ```text
//! ┌───────────┐  SUBSCRIBE / UNSUBSCRIBE   ┌──────────┐
//! │ Session A │ ─────────────────────────► │          │
//! │           │ ◄───────────────────────── │          │
//! └───────────┘  SUBSCRIBED / UNSUBSCRIBED │  Broker  │
//!                                          │          │
//! ┌───────────┐  PUBLISH                   │          │   EVENT   ┌───────────┐
//! │ Session B │ ─────────────────────────► │          │ ────────► │ Session A │
//! │           │ ◄───────────────────────── │          │           └───────────┘
//! └───────────┘  PUBLISHED (if requested)  └──────────┘
//! ```
//!
//! ## Guarantees
//!
//! - **All-or-nothing:** a rejected operation leaves every index unchanged.
//! - **One subscription per topic:** every subscriber of a topic shares its
//!   subscription ID, so one `EVENT` serves every recipient.
//! - **Cascade:** removing a session releases all of its subscriptions.
//!
//! The broker performs no I/O and no locking; the host owns transport and
//! serializes access.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod broker;
pub mod config;
pub mod errors;
mod subscription;
pub mod types;

pub use broker::Broker;
pub use config::{BrokerConfig, PublicationIdStrategy};
pub use errors::{BrokerError, Operation};
pub use types::{MessageWithRecipient, Publication};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wamp_messages::{Message, Publish, Subscribe, UnSubscribe};

    const TOPICS: [&str; 3] = ["a", "b", "c"];

    #[derive(Debug, Clone)]
    enum Op {
        Add(u64),
        Remove(u64),
        Subscribe(u64, usize),
        Unsubscribe(u64, u64),
        Publish(u64, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1..4_u64).prop_map(Op::Add),
            (1..4_u64).prop_map(Op::Remove),
            (1..4_u64, 0..TOPICS.len()).prop_map(|(s, t)| Op::Subscribe(s, t)),
            (1..4_u64, 1..5_u64).prop_map(|(s, id)| Op::Unsubscribe(s, id)),
            (1..4_u64, 0..TOPICS.len()).prop_map(|(s, t)| Op::Publish(s, t)),
        ]
    }

    fn snapshot(broker: &Broker) -> Vec<(bool, Option<u64>, Vec<u64>)> {
        TOPICS
            .iter()
            .map(|topic| {
                (
                    broker.has_subscription(topic),
                    broker.subscription_id(topic),
                    broker.subscribers(topic),
                )
            })
            .collect()
    }

    proptest! {
        #[test]
        fn test_indices_stay_consistent(ops in prop::collection::vec(op(), 0..40)) {
            let mut broker = Broker::with_config(
                BrokerConfig::default().with_publication_ids(PublicationIdStrategy::Sequential),
            );

            for op in ops {
                let before = snapshot(&broker);
                let result = match op {
                    Op::Add(session) => broker.add_session(session),
                    Op::Remove(session) => broker.remove_session(session),
                    Op::Subscribe(session, topic) => broker
                        .receive_message(session, Message::from(Subscribe::new(1, TOPICS[topic])))
                        .map(|_| ()),
                    Op::Unsubscribe(session, id) => broker
                        .receive_message(session, Message::from(UnSubscribe::new(1, id)))
                        .map(|_| ()),
                    Op::Publish(session, topic) => broker
                        .receive_publish(session, Publish::new(1, TOPICS[topic]))
                        .map(|publication| {
                            assert_eq!(publication.recipients, broker.subscribers(TOPICS[topic]));
                            assert_eq!(publication.event.is_some(), !publication.recipients.is_empty());
                        }),
                };

                if result.is_err() {
                    prop_assert_eq!(&before, &snapshot(&broker));
                }

                for (topic, (live, id, subscribers)) in TOPICS.iter().zip(snapshot(&broker)) {
                    prop_assert_eq!(live, !subscribers.is_empty(), "topic {}", topic);
                    prop_assert_eq!(live, id.is_some(), "topic {}", topic);
                    for session in subscribers {
                        prop_assert!(broker.has_session(session));
                    }
                }
            }

            for session in 1..4 {
                let _ = broker.remove_session(session);
            }
            for topic in TOPICS {
                prop_assert!(!broker.has_subscription(topic));
            }
        }
    }
}
