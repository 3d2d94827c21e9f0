//! # Broker
//!
//! Routes `SUBSCRIBE`, `UNSUBSCRIBE` and `PUBLISH` between sessions.
//!
//! ## Indices
//!
//! ```text
//! topics:        topic           -> subscription id
//! subscriptions: subscription id -> { topic, subscribers }
//! sessions:      session id      -> { subscription ids }
//! ```
//!
//! A subscription whose subscriber set becomes empty is dropped from both
//! `topics` and `subscriptions`, so `has_subscription` only sees live ones.
//!
//! Every operation validates before it mutates: a rejected call leaves all
//! three indices unchanged.

use crate::config::{BrokerConfig, PublicationIdStrategy};
use crate::errors::{BrokerError, Operation};
use crate::subscription::Subscription;
use crate::types::{MessageWithRecipient, Publication};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};
use wamp_messages::{
    generate_global_id, Event, Message, Publish, Published, SessionScopeIdGenerator, Subscribe,
    Subscribed, UnSubscribe, UnSubscribed,
};

/// Pub/sub routing state for one realm.
///
/// Not internally synchronized; a concurrent host serializes access.
#[derive(Debug, Default)]
pub struct Broker {
    config: BrokerConfig,
    sessions: HashMap<u64, BTreeSet<u64>>,
    topics: HashMap<String, u64>,
    subscriptions: HashMap<u64, Subscription>,
    subscription_ids: SessionScopeIdGenerator,
    publication_ids: SessionScopeIdGenerator,
}

impl Broker {
    /// Create a broker with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BrokerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: BrokerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    // =========================================================================
    // SESSION LIFECYCLE
    // =========================================================================

    /// Register a newly opened session.
    pub fn add_session(&mut self, session_id: u64) -> Result<(), BrokerError> {
        if self.sessions.contains_key(&session_id) {
            warn!(session_id, "Rejected duplicate session");
            return Err(BrokerError::DuplicateSession { session_id });
        }

        self.sessions.insert(session_id, BTreeSet::new());
        debug!(session_id, sessions = self.sessions.len(), "Session added");
        Ok(())
    }

    /// Drop a session and every subscription membership it holds.
    pub fn remove_session(&mut self, session_id: u64) -> Result<(), BrokerError> {
        let Some(memberships) = self.sessions.remove(&session_id) else {
            warn!(session_id, "Cannot remove unknown session");
            return Err(BrokerError::UnknownSession {
                operation: Operation::RemoveSession,
                session_id,
            });
        };

        let released = memberships.len();
        for subscription_id in memberships {
            self.detach(session_id, subscription_id);
        }

        debug!(session_id, released, "Session removed");
        Ok(())
    }

    #[must_use]
    pub fn has_session(&self, session_id: u64) -> bool {
        self.sessions.contains_key(&session_id)
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// True iff the topic has at least one subscriber.
    #[must_use]
    pub fn has_subscription(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    #[must_use]
    pub fn subscription_id(&self, topic: &str) -> Option<u64> {
        self.topics.get(topic).copied()
    }

    /// Current subscribers of a topic, ascending.
    #[must_use]
    pub fn subscribers(&self, topic: &str) -> Vec<u64> {
        self.topics
            .get(topic)
            .and_then(|id| self.subscriptions.get(id))
            .map(|subscription| subscription.subscribers.iter().copied().collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // ROUTING
    // =========================================================================

    /// Route a `SUBSCRIBE` or `UNSUBSCRIBE`; the reply goes back to the sender.
    pub fn receive_message(
        &mut self,
        session_id: u64,
        message: Message,
    ) -> Result<MessageWithRecipient, BrokerError> {
        match message {
            Message::Subscribe(subscribe) => self.subscribe(session_id, subscribe),
            Message::UnSubscribe(unsubscribe) => self.unsubscribe(session_id, unsubscribe),
            other => {
                warn!(session_id, message_type = other.text(), "Unsupported message");
                Err(BrokerError::UnsupportedMessageType {
                    message_type: other.text(),
                })
            }
        }
    }

    /// Fan a `PUBLISH` out to the topic's subscribers.
    ///
    /// Publishing to a topic nobody subscribed to is not an error: the
    /// outcome simply has no recipients and no event.
    pub fn receive_publish(
        &mut self,
        session_id: u64,
        publish: Publish,
    ) -> Result<Publication, BrokerError> {
        self.ensure_session(session_id, Operation::Publish)?;

        let publication_id = self.next_publication_id();
        let acknowledge = publish.acknowledge();

        let (recipients, event) = match self
            .topics
            .get(&publish.topic)
            .and_then(|id| self.subscriptions.get(id))
        {
            Some(subscription) if !subscription.subscribers.is_empty() => {
                let recipients: Vec<u64> = subscription.subscribers.iter().copied().collect();
                let event = Event::new(subscription.id, publication_id)
                    .with_args(publish.args)
                    .with_kwargs(publish.kwargs);
                (recipients, Some(event))
            }
            _ => (Vec::new(), None),
        };

        let ack = acknowledge.then(|| {
            MessageWithRecipient::new(session_id, Published::new(publish.request_id, publication_id))
        });

        debug!(
            session_id,
            topic = %publish.topic,
            publication_id,
            recipients = recipients.len(),
            acknowledged = acknowledge,
            "Publication routed"
        );

        Ok(Publication {
            recipients,
            event,
            ack,
        })
    }

    fn subscribe(
        &mut self,
        session_id: u64,
        subscribe: Subscribe,
    ) -> Result<MessageWithRecipient, BrokerError> {
        self.ensure_session(session_id, Operation::Subscribe)?;

        let subscription_id = match self.topics.get(&subscribe.topic) {
            Some(&id) => id,
            None => {
                let id = self.subscription_ids.next_id();
                self.topics.insert(subscribe.topic.clone(), id);
                self.subscriptions
                    .insert(id, Subscription::new(id, subscribe.topic.clone()));
                id
            }
        };

        if let Some(subscription) = self.subscriptions.get_mut(&subscription_id) {
            subscription.subscribers.insert(session_id);
        }
        if let Some(memberships) = self.sessions.get_mut(&session_id) {
            memberships.insert(subscription_id);
        }

        debug!(
            session_id,
            topic = %subscribe.topic,
            subscription_id,
            "Subscribed"
        );

        Ok(MessageWithRecipient::new(
            session_id,
            Subscribed::new(subscribe.request_id, subscription_id),
        ))
    }

    fn unsubscribe(
        &mut self,
        session_id: u64,
        unsubscribe: UnSubscribe,
    ) -> Result<MessageWithRecipient, BrokerError> {
        self.ensure_session(session_id, Operation::Unsubscribe)?;

        let subscription_id = unsubscribe.subscription_id;
        let removed = self
            .sessions
            .get_mut(&session_id)
            .is_some_and(|memberships| memberships.remove(&subscription_id));
        if !removed {
            warn!(session_id, subscription_id, "Cannot unsubscribe unknown subscription");
            return Err(BrokerError::UnknownSubscription { subscription_id });
        }

        self.detach(session_id, subscription_id);
        debug!(session_id, subscription_id, "Unsubscribed");

        Ok(MessageWithRecipient::new(
            session_id,
            UnSubscribed::new(unsubscribe.request_id),
        ))
    }

    fn ensure_session(&self, session_id: u64, operation: Operation) -> Result<(), BrokerError> {
        if self.sessions.contains_key(&session_id) {
            return Ok(());
        }
        warn!(session_id, %operation, "Unknown session");
        Err(BrokerError::UnknownSession {
            operation,
            session_id,
        })
    }

    /// Remove `session_id` from a subscription, dropping the subscription
    /// once nobody is left.
    fn detach(&mut self, session_id: u64, subscription_id: u64) {
        let Some(subscription) = self.subscriptions.get_mut(&subscription_id) else {
            return;
        };
        subscription.subscribers.remove(&session_id);

        if subscription.subscribers.is_empty() {
            if let Some(subscription) = self.subscriptions.remove(&subscription_id) {
                self.topics.remove(&subscription.topic);
                debug!(
                    subscription_id,
                    topic = %subscription.topic,
                    "Subscription released"
                );
            }
        }
    }

    fn next_publication_id(&mut self) -> u64 {
        match self.config.publication_ids {
            PublicationIdStrategy::Random => generate_global_id(),
            PublicationIdStrategy::Sequential => self.publication_ids.next_id(),
        }
    }
}
