//! # Broker Flows
//!
//! Sessions exchanging JSON frames through one broker: frames are decoded,
//! parsed, routed, and every outgoing message is encoded back to a frame.
//!
//! ## Flows Tested
//!
//! 1. **Subscribe → Subscribed** addressed to the subscriber
//! 2. **Unsubscribe → Unsubscribed**, then rejection on repeat
//! 3. **Publish fan-out** with and without acknowledgment
//! 4. **Session teardown** releasing every subscription

#[cfg(test)]
mod tests {
    use crate::integration::{decode, encode};
    use wamp_broker::{
        Broker, BrokerConfig, BrokerError, MessageWithRecipient, Operation, PublicationIdStrategy,
    };
    use wamp_messages::{Message, Publish, WampMessage};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn broker() -> Broker {
        wamp_telemetry::init_test_telemetry();
        Broker::with_config(
            BrokerConfig::default().with_publication_ids(PublicationIdStrategy::Sequential),
        )
    }

    /// Route one inbound frame and return `(recipient, outbound frame)`.
    fn route(broker: &mut Broker, session_id: u64, frame: &str) -> Result<(u64, String), BrokerError> {
        let message = Message::parse(&decode(frame)).expect("valid frame");
        let MessageWithRecipient { recipient, message } =
            broker.receive_message(session_id, message)?;
        Ok((recipient, encode(&message.to_value())))
    }

    fn publish(frame: &str) -> Publish {
        Publish::parse(&decode(frame)).expect("valid PUBLISH frame")
    }

    // =============================================================================
    // SUBSCRIBE / UNSUBSCRIBE
    // =============================================================================

    #[test]
    fn test_subscribe_then_unsubscribe() {
        let mut broker = broker();
        broker.add_session(1).unwrap();

        let reply = route(&mut broker, 1, r#"[32,1,{},"io.x.test"]"#).unwrap();
        assert_eq!(reply, (1, "[33,1,1]".to_string()));
        assert!(broker.has_subscription("io.x.test"));

        let reply = route(&mut broker, 1, "[34,2,1]").unwrap();
        assert_eq!(reply, (1, "[35,2]".to_string()));
        assert!(!broker.has_subscription("io.x.test"));

        let error = route(&mut broker, 1, "[34,3,1]").unwrap_err();
        assert_eq!(error.to_string(), "cannot unsubscribe, subscription 1 doesn't exist");
    }

    #[test]
    fn test_second_subscriber_reuses_subscription() {
        let mut broker = broker();
        broker.add_session(1).unwrap();
        broker.add_session(2).unwrap();

        let first = route(&mut broker, 1, r#"[32,1,{},"io.x.test"]"#).unwrap();
        let second = route(&mut broker, 2, r#"[32,7,{},"io.x.test"]"#).unwrap();

        assert_eq!(first, (1, "[33,1,1]".to_string()));
        assert_eq!(second, (2, "[33,7,1]".to_string()));
    }

    #[test]
    fn test_rpc_frames_are_not_routed() {
        let mut broker = broker();
        broker.add_session(1).unwrap();

        let error = route(&mut broker, 1, r#"[48,1,{},"io.x.ping"]"#).unwrap_err();
        assert_eq!(error.to_string(), "message type CALL not supported");
    }

    #[test]
    fn test_unknown_session_cannot_subscribe() {
        let mut broker = broker();
        let error = route(&mut broker, 42, r#"[32,1,{},"io.x.test"]"#).unwrap_err();
        assert_eq!(
            error,
            BrokerError::UnknownSession {
                operation: Operation::Subscribe,
                session_id: 42
            }
        );
    }

    // =============================================================================
    // PUBLISH
    // =============================================================================

    #[test]
    fn test_publish_fan_out() {
        let mut broker = broker();
        broker.add_session(1).unwrap();
        route(&mut broker, 1, r#"[32,1,{},"t"]"#).unwrap();

        // One subscriber, no acknowledgment requested.
        let publication = broker
            .receive_publish(1, publish(r#"[16,2,{},"t",[1,2,3]]"#))
            .unwrap();
        assert_eq!(publication.recipients, vec![1]);
        let event = publication.event.as_ref().expect("event");
        assert_eq!(encode(&event.to_value()), "[36,1,1,{},[1,2,3]]");
        assert!(publication.ack.is_none());

        // Nobody listens on this topic.
        let publication = broker
            .receive_publish(1, publish(r#"[16,3,{},"unsubscribed-topic"]"#))
            .unwrap();
        assert!(publication.recipients.is_empty());
        assert!(publication.event.is_none());
        assert!(publication.ack.is_none());

        // Acknowledged publish.
        let publication = broker
            .receive_publish(1, publish(r#"[16,4,{"acknowledge":true},"t"]"#))
            .unwrap();
        assert_eq!(publication.recipients, vec![1]);
        let event = publication.event.as_ref().expect("event");
        assert_eq!(encode(&event.to_value()), "[36,1,3,{}]");
        let ack = publication.ack.as_ref().expect("ack");
        assert_eq!(ack.recipient, 1);
        assert_eq!(encode(&ack.message.to_value()), "[17,4,3]");
    }

    #[test]
    fn test_publish_reaches_every_subscriber_once() {
        let mut broker = broker();
        for session in 1..=3 {
            broker.add_session(session).unwrap();
        }
        route(&mut broker, 1, r#"[32,1,{},"news"]"#).unwrap();
        route(&mut broker, 3, r#"[32,1,{},"news"]"#).unwrap();

        let publication = broker
            .receive_publish(2, publish(r#"[16,1,{},"news",["hi"]]"#))
            .unwrap();

        let deliveries = publication.deliveries();
        let recipients: Vec<_> = deliveries.iter().map(|d| d.recipient).collect();
        assert_eq!(recipients, vec![1, 3]);
        assert!(deliveries
            .iter()
            .all(|d| encode(&d.message.to_value()) == r#"[36,1,1,{},["hi"]]"#));
    }

    #[test]
    fn test_unknown_publisher_is_rejected() {
        let mut broker = broker();
        let error = broker
            .receive_publish(8, publish(r#"[16,1,{},"t"]"#))
            .unwrap_err();
        assert_eq!(error.to_string(), "cannot publish, session 8 doesn't exist");
    }

    // =============================================================================
    // SESSION LIFECYCLE
    // =============================================================================

    #[test]
    fn test_session_teardown_releases_subscriptions() {
        let mut broker = broker();
        broker.add_session(1).unwrap();
        broker.add_session(2).unwrap();
        route(&mut broker, 1, r#"[32,1,{},"a"]"#).unwrap();
        route(&mut broker, 1, r#"[32,2,{},"b"]"#).unwrap();
        route(&mut broker, 2, r#"[32,1,{},"b"]"#).unwrap();

        broker.remove_session(1).unwrap();

        assert!(!broker.has_subscription("a"));
        assert_eq!(broker.subscribers("b"), vec![2]);
        assert_eq!(broker.session_count(), 1);

        let publication = broker
            .receive_publish(2, publish(r#"[16,1,{},"b"]"#))
            .unwrap();
        assert_eq!(publication.recipients, vec![2]);

        assert_eq!(
            broker.remove_session(1),
            Err(BrokerError::UnknownSession {
                operation: Operation::RemoveSession,
                session_id: 1
            })
        );
    }

    #[test]
    fn test_duplicate_session_is_rejected() {
        let mut broker = broker();
        broker.add_session(1).unwrap();
        route(&mut broker, 1, r#"[32,1,{},"t"]"#).unwrap();

        assert_eq!(
            broker.add_session(1),
            Err(BrokerError::DuplicateSession { session_id: 1 })
        );
        assert_eq!(broker.subscribers("t"), vec![1]);
    }
}
