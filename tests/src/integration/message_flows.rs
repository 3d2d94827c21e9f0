//! # Message Flows
//!
//! JSON frames decoded into wire values, parsed through the catalog, and
//! encoded back. Frames and error texts are the interop vectors peers share.

#[cfg(test)]
mod tests {
    use crate::integration::{decode, encode};
    use wamp_messages::{
        Call, Message, Publish, ValidationError, ValidationErrorKind, Value, WampMessage,
    };

    // =============================================================================
    // ROUND TRIPS THROUGH JSON
    // =============================================================================

    #[test]
    fn test_frames_survive_decode_parse_marshal_encode() {
        let frames = [
            r#"[1,"realm1",{"authid":"mahad","roles":{"callee":{},"caller":{}}}]"#,
            r#"[2,9129137332,{"authrole":"anonymous","roles":{"publisher":{}}}]"#,
            r#"[3,{"message":"realm does not exist"},"wamp.error.no_such_realm"]"#,
            r#"[4,"wampcra",{"challenge":"nonce"}]"#,
            r#"[5,"signature",{}]"#,
            r#"[6,{},"wamp.close.close_realm"]"#,
            r#"[8,48,7,{},"wamp.error.no_such_procedure",[],{"why":"gone"}]"#,
            r#"[16,1,{"acknowledge":true},"io.xconn.test",[1,2,3]]"#,
            r#"[17,1,5]"#,
            r#"[32,1,{"match":"prefix"},"io.xconn"]"#,
            r#"[33,1,5]"#,
            r#"[34,2,5]"#,
            r#"[35,2]"#,
            r#"[36,5,6,{},["hello"],{"k":"v"}]"#,
            r#"[48,7,{},"io.xconn.ping"]"#,
            r#"[49,7,{"mode":"kill"}]"#,
            r#"[50,7,{},["pong"]]"#,
            r#"[64,3,{},"io.xconn.echo"]"#,
            r#"[65,3,44]"#,
            r#"[66,4,44]"#,
            r#"[67,4]"#,
            r#"[68,8,44,{},[1]]"#,
            r#"[69,8,{}]"#,
            r#"[70,8,{},[1],{"extra":true}]"#,
        ];

        for frame in frames {
            let message = Message::parse(&decode(frame))
                .unwrap_or_else(|error| panic!("{frame} failed to parse: {error}"));
            assert_eq!(encode(&message.to_value()), frame, "{}", message.text());
        }
    }

    #[test]
    fn test_publish_args_default_differs_from_call() {
        let publish = Publish::parse(&decode(r#"[16,1,{},"t"]"#)).unwrap();
        assert!(publish.args.is_empty());

        let call = Call::parse(&decode(r#"[48,1,{},"p"]"#)).unwrap();
        assert!(call.payload.args().is_none());

        // Neither invents a payload slot on the way back out.
        assert_eq!(encode(&publish.to_value()), r#"[16,1,{},"t"]"#);
        assert_eq!(encode(&call.to_value()), r#"[48,1,{},"p"]"#);
    }

    #[test]
    fn test_kwargs_only_frames_carry_args_placeholder() {
        let call = Call::new(1, "p").with_kwargs(
            [("name".to_string(), Value::from("mahad"))]
                .into_iter()
                .collect(),
        );
        assert_eq!(encode(&call.to_value()), r#"[48,1,{},"p",[],{"name":"mahad"}]"#);
    }

    // =============================================================================
    // REJECTIONS
    // =============================================================================

    #[test]
    fn test_call_rejection_texts() {
        let cases = [
            (
                r#"[48,-1,{},"io.xconn.ping"]"#,
                "invalid request ID -1 for CALL, must be between 1 and 9007199254740992",
            ),
            (
                r#"[48,1,"options","io.xconn.ping"]"#,
                "invalid options 'options' for CALL, type should be a dictionary",
            ),
            (
                r#"[48,1,{},null]"#,
                "invalid uri 'null' for CALL, type should be a string",
            ),
            (
                r#"[48,1,{},"io.xconn.ping","args"]"#,
                "invalid args 'args' for CALL, type should be a list",
            ),
            (
                r#"[48,1,{}]"#,
                "invalid message length 3, must be at least 4",
            ),
        ];

        for (frame, expected) in cases {
            let error = Call::parse(&decode(frame)).unwrap_err();
            assert_eq!(error.to_string(), expected, "{frame}");
        }
    }

    #[test]
    fn test_hello_reports_every_problem() {
        let error = Message::parse(&decode(r#"[1,null,{"roles":{"dealer":{}},"authextra":[]}]"#))
            .unwrap_err();

        let kinds: Vec<_> = error.errors().iter().map(ValidationError::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::Uri,
                ValidationErrorKind::Role,
                ValidationErrorKind::TypeMismatch,
            ]
        );
        assert_eq!(error.to_string().lines().count(), 3);
    }

    #[test]
    fn test_id_bounds_on_the_wire() {
        assert!(Message::parse(&decode("[35,9007199254740992]")).is_ok());

        for frame in ["[35,0]", "[35,-3]", "[35,9007199254740993]", "[35,1.5]"] {
            let error = Message::parse(&decode(frame)).unwrap_err();
            assert!(
                matches!(
                    error.kind(),
                    ValidationErrorKind::Range | ValidationErrorKind::TypeMismatch
                ),
                "{frame}: {error}"
            );
        }
    }

    #[test]
    fn test_catalog_rejects_non_messages() {
        for frame in ["{}", "[]", "[999,1]", r#"["PUBLISH",1]"#] {
            assert!(Message::parse(&decode(frame)).is_err(), "{frame}");
        }
    }

    #[test]
    fn test_kind_constants_match_catalog() {
        let message = Message::from(Call::new(1, "p"));
        assert_eq!(message.message_type(), Call::TYPE);
        assert_eq!(message.text(), Call::TEXT);
    }
}
