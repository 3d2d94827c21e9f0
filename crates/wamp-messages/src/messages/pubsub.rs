//! # Publish & Subscribe Messages
//!
//! `Publish`/`Event` are the two kinds whose payload defaults to empty
//! collections instead of being absent.

use super::WampMessage;
use crate::errors::ValidationError;
use crate::payload::{marshal_defaulted, parse_defaulted};
use crate::validation::{sanity_check, validate_dict, validate_id, validate_uri, CollectErrors};
use crate::value::{Dict, List, Value};

/// `[PUBLISH, Request|id, Options|dict, Topic|uri, Arguments|list?, ArgumentsKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Publish {
    pub request_id: u64,
    pub options: Dict,
    pub topic: String,
    pub args: List,
    pub kwargs: Dict,
}

impl Publish {
    #[must_use]
    pub fn new(request_id: u64, topic: impl Into<String>) -> Self {
        Self {
            request_id,
            options: Dict::new(),
            topic: topic.into(),
            args: List::new(),
            kwargs: Dict::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Dict) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: List) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_kwargs(mut self, kwargs: Dict) -> Self {
        self.kwargs = kwargs;
        self
    }

    /// Whether the publisher asked for a `Published` acknowledgment.
    #[must_use]
    pub fn acknowledge(&self) -> bool {
        self.options
            .get("acknowledge")
            .is_some_and(Value::is_truthy)
    }
}

impl WampMessage for Publish {
    const TYPE: u64 = 16;
    const TEXT: &'static str = "PUBLISH";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 6;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, options, topic, (args, kwargs)) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "options"),
            validate_uri(&fields[3], Self::TEXT, "uri"),
            parse_defaulted(fields, 4, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            options,
            topic,
            args,
            kwargs,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
            Value::from(self.topic.as_str()),
        ];
        marshal_defaulted(&self.args, &self.kwargs, &mut out);
        out
    }
}

/// `[PUBLISHED, PUBLISH.Request|id, Publication|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub request_id: u64,
    pub publication_id: u64,
}

impl Published {
    #[must_use]
    pub fn new(request_id: u64, publication_id: u64) -> Self {
        Self {
            request_id,
            publication_id,
        }
    }
}

impl WampMessage for Published {
    const TYPE: u64 = 17;
    const TEXT: &'static str = "PUBLISHED";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, publication_id) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_id(&fields[2], Self::TEXT, "publication ID"),
        )
            .collect_errors()?;

        Ok(Self::new(request_id, publication_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.publication_id),
        ]
    }
}

/// `[SUBSCRIBE, Request|id, Options|dict, Topic|uri]`
#[derive(Debug, Clone, PartialEq)]
pub struct Subscribe {
    pub request_id: u64,
    pub options: Dict,
    pub topic: String,
}

impl Subscribe {
    #[must_use]
    pub fn new(request_id: u64, topic: impl Into<String>) -> Self {
        Self {
            request_id,
            options: Dict::new(),
            topic: topic.into(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Dict) -> Self {
        self.options = options;
        self
    }
}

impl WampMessage for Subscribe {
    const TYPE: u64 = 32;
    const TEXT: &'static str = "SUBSCRIBE";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 4;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, options, topic) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "options"),
            validate_uri(&fields[3], Self::TEXT, "uri"),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            options,
            topic,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
            Value::from(self.topic.as_str()),
        ]
    }
}

/// `[SUBSCRIBED, SUBSCRIBE.Request|id, Subscription|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct Subscribed {
    pub request_id: u64,
    pub subscription_id: u64,
}

impl Subscribed {
    #[must_use]
    pub fn new(request_id: u64, subscription_id: u64) -> Self {
        Self {
            request_id,
            subscription_id,
        }
    }
}

impl WampMessage for Subscribed {
    const TYPE: u64 = 33;
    const TEXT: &'static str = "SUBSCRIBED";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, subscription_id) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_id(&fields[2], Self::TEXT, "subscription ID"),
        )
            .collect_errors()?;

        Ok(Self::new(request_id, subscription_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.subscription_id),
        ]
    }
}

/// `[UNSUBSCRIBE, Request|id, SUBSCRIBED.Subscription|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct UnSubscribe {
    pub request_id: u64,
    pub subscription_id: u64,
}

impl UnSubscribe {
    #[must_use]
    pub fn new(request_id: u64, subscription_id: u64) -> Self {
        Self {
            request_id,
            subscription_id,
        }
    }
}

impl WampMessage for UnSubscribe {
    const TYPE: u64 = 34;
    const TEXT: &'static str = "UNSUBSCRIBE";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, subscription_id) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_id(&fields[2], Self::TEXT, "subscription ID"),
        )
            .collect_errors()?;

        Ok(Self::new(request_id, subscription_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.subscription_id),
        ]
    }
}

/// `[UNSUBSCRIBED, UNSUBSCRIBE.Request|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct UnSubscribed {
    pub request_id: u64,
}

impl UnSubscribed {
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self { request_id }
    }
}

impl WampMessage for UnSubscribed {
    const TYPE: u64 = 35;
    const TEXT: &'static str = "UNSUBSCRIBED";
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 2;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;
        let request_id = validate_id(&fields[1], Self::TEXT, "request ID")?;
        Ok(Self::new(request_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![Value::from(Self::TYPE), Value::from(self.request_id)]
    }
}

/// `[EVENT, SUBSCRIBED.Subscription|id, PUBLISHED.Publication|id, Details|dict,
/// PUBLISH.Arguments|list?, PUBLISH.ArgumentKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub subscription_id: u64,
    pub publication_id: u64,
    pub details: Dict,
    pub args: List,
    pub kwargs: Dict,
}

impl Event {
    #[must_use]
    pub fn new(subscription_id: u64, publication_id: u64) -> Self {
        Self {
            subscription_id,
            publication_id,
            details: Dict::new(),
            args: List::new(),
            kwargs: Dict::new(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Dict) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: List) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_kwargs(mut self, kwargs: Dict) -> Self {
        self.kwargs = kwargs;
        self
    }
}

impl WampMessage for Event {
    const TYPE: u64 = 36;
    const TEXT: &'static str = "EVENT";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 6;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (subscription_id, publication_id, details, (args, kwargs)) = (
            validate_id(&fields[1], Self::TEXT, "subscription ID"),
            validate_id(&fields[2], Self::TEXT, "publication ID"),
            validate_dict(&fields[3], Self::TEXT, "details"),
            parse_defaulted(fields, 4, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            subscription_id,
            publication_id,
            details,
            args,
            kwargs,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.subscription_id),
            Value::from(self.publication_id),
            Value::from(self.details.clone()),
        ];
        marshal_defaulted(&self.args, &self.kwargs, &mut out);
        out
    }
}
