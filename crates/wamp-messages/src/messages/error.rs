//! # Error Message
//!
//! `[ERROR, REQUEST.Type|int, REQUEST.Request|id, Details|dict, Error|uri,
//! Arguments|list?, ArgumentsKw|dict?]`

use super::WampMessage;
use crate::errors::ValidationError;
use crate::payload::Payload;
use crate::validation::{sanity_check, validate_dict, validate_id, validate_uri, CollectErrors};
use crate::value::{Dict, List, Value};

/// Failure reply to a request of kind `message_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Type code of the request being answered.
    pub message_type: u64,
    pub request_id: u64,
    pub details: Dict,
    pub uri: String,
    pub payload: Payload,
}

impl Error {
    #[must_use]
    pub fn new(message_type: u64, request_id: u64, uri: impl Into<String>) -> Self {
        Self {
            message_type,
            request_id,
            details: Dict::new(),
            uri: uri.into(),
            payload: Payload::default(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Dict) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: List) -> Self {
        self.payload = self.payload.with_args(args);
        self
    }

    #[must_use]
    pub fn with_kwargs(mut self, kwargs: Dict) -> Self {
        self.payload = self.payload.with_kwargs(kwargs);
        self
    }
}

impl WampMessage for Error {
    const TYPE: u64 = 8;
    const TEXT: &'static str = "ERROR";
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 7;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (message_type, request_id, details, uri, payload) = (
            validate_id(&fields[1], Self::TEXT, "message type"),
            validate_id(&fields[2], Self::TEXT, "request ID"),
            validate_dict(&fields[3], Self::TEXT, "details"),
            validate_uri(&fields[4], Self::TEXT, "uri"),
            Payload::parse(fields, 5, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            message_type,
            request_id,
            details,
            uri,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.message_type),
            Value::from(self.request_id),
            Value::from(self.details.clone()),
            Value::from(self.uri.as_str()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorKind;
    use crate::messages::Call;
    use serde_json::json;

    #[test]
    fn test_error_reply_to_call() {
        let error = Error::new(Call::TYPE, 7, "wamp.error.no_such_procedure")
            .with_args(vec![Value::from("no callee")]);

        assert_eq!(
            error.to_value(),
            Value::from(json!([8, 48, 7, {}, "wamp.error.no_such_procedure", ["no callee"]]))
        );
        assert_eq!(Error::parse(&error.to_value()), Ok(error));
    }

    #[test]
    fn test_error_arity_bounds() {
        let short = Value::from(json!([8, 48, 7, {}]));
        assert_eq!(
            Error::parse(&short).unwrap_err().kind(),
            ValidationErrorKind::LengthOutOfRange
        );

        let long = Value::from(json!([8, 48, 7, {}, "wamp.error", [], {}, 1]));
        assert_eq!(
            Error::parse(&long).unwrap_err().kind(),
            ValidationErrorKind::LengthOutOfRange
        );

        let max = Value::from(json!([8, 48, 7, {}, "wamp.error", [], {}]));
        assert!(Error::parse(&max).is_ok());
    }

    #[test]
    fn test_error_rejects_bad_kwargs() {
        let msg = Value::from(json!([8, 48, 7, {}, "wamp.error", [], ["kwargs"]]));
        let error = Error::parse(&msg).unwrap_err();
        assert_eq!(
            error.to_string(),
            r#"invalid kwargs '["kwargs"]' for ERROR, type should be a dictionary"#
        );
    }
}
