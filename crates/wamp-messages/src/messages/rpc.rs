//! # Remote Procedure Call Messages
//!
//! Caller side: `Call`, `Cancel`, `CallResult`.
//! Callee side: `Register`, `Registered`, `UnRegister`, `UnRegistered`,
//! `Invocation`, `Interrupt`, `Yield`.
//!
//! Every payload-carrying kind here keeps args/kwargs optional.

use super::WampMessage;
use crate::errors::ValidationError;
use crate::payload::Payload;
use crate::validation::{sanity_check, validate_dict, validate_id, validate_uri, CollectErrors};
use crate::value::{Dict, List, Value};

/// Builder methods shared by kinds carrying a [`Payload`].
macro_rules! payload_builders {
    ($ty:ty) => {
        impl $ty {
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
    };
}

/// Parses the `[TYPE, Request|id, SecondId|id]` shape.
fn parse_id_pair<M: WampMessage>(
    msg: &Value,
    second: &'static str,
) -> Result<(u64, u64), ValidationError> {
    let fields = sanity_check::<M>(msg)?;
    (
        validate_id(&fields[1], M::TEXT, "request ID"),
        validate_id(&fields[2], M::TEXT, second),
    )
        .collect_errors()
}

/// Parses the `[TYPE, Request|id, Options|dict]` shape.
fn parse_request_options<M: WampMessage>(msg: &Value) -> Result<(u64, Dict), ValidationError> {
    let fields = sanity_check::<M>(msg)?;
    (
        validate_id(&fields[1], M::TEXT, "request ID"),
        validate_dict(&fields[2], M::TEXT, "options"),
    )
        .collect_errors()
}

// =============================================================================
// CALLER
// =============================================================================

/// `[CALL, Request|id, Options|dict, Procedure|uri, Arguments|list?, ArgumentsKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub request_id: u64,
    pub options: Dict,
    pub procedure: String,
    pub payload: Payload,
}

impl Call {
    #[must_use]
    pub fn new(request_id: u64, procedure: impl Into<String>) -> Self {
        Self {
            request_id,
            options: Dict::new(),
            procedure: procedure.into(),
            payload: Payload::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Dict) -> Self {
        self.options = options;
        self
    }
}

payload_builders!(Call);

impl WampMessage for Call {
    const TYPE: u64 = 48;
    const TEXT: &'static str = "CALL";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 6;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, options, procedure, payload) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "options"),
            validate_uri(&fields[3], Self::TEXT, "uri"),
            Payload::parse(fields, 4, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            options,
            procedure,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
            Value::from(self.procedure.as_str()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}

/// `[CANCEL, CALL.Request|id, Options|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Cancel {
    pub request_id: u64,
    pub options: Dict,
}

impl Cancel {
    #[must_use]
    pub fn new(request_id: u64, options: Dict) -> Self {
        Self {
            request_id,
            options,
        }
    }
}

impl WampMessage for Cancel {
    const TYPE: u64 = 49;
    const TEXT: &'static str = "CANCEL";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let (request_id, options) = parse_request_options::<Self>(msg)?;
        Ok(Self::new(request_id, options))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
        ]
    }
}

/// `[RESULT, CALL.Request|id, Details|dict, YIELD.Arguments|list?, YIELD.ArgumentsKw|dict?]`
///
/// Named `CallResult` to keep `Result` free for the standard type.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub request_id: u64,
    pub details: Dict,
    pub payload: Payload,
}

impl CallResult {
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self {
            request_id,
            details: Dict::new(),
            payload: Payload::default(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Dict) -> Self {
        self.details = details;
        self
    }
}

payload_builders!(CallResult);

impl WampMessage for CallResult {
    const TYPE: u64 = 50;
    const TEXT: &'static str = "RESULT";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 5;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, details, payload) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "details"),
            Payload::parse(fields, 3, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            details,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.details.clone()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}

// =============================================================================
// CALLEE
// =============================================================================

/// `[REGISTER, Request|id, Options|dict, Procedure|uri]`
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    pub request_id: u64,
    pub options: Dict,
    pub procedure: String,
}

impl Register {
    #[must_use]
    pub fn new(request_id: u64, procedure: impl Into<String>) -> Self {
        Self {
            request_id,
            options: Dict::new(),
            procedure: procedure.into(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Dict) -> Self {
        self.options = options;
        self
    }
}

impl WampMessage for Register {
    const TYPE: u64 = 64;
    const TEXT: &'static str = "REGISTER";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 4;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, options, procedure) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "options"),
            validate_uri(&fields[3], Self::TEXT, "uri"),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            options,
            procedure,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
            Value::from(self.procedure.as_str()),
        ]
    }
}

/// `[REGISTERED, REGISTER.Request|id, Registration|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    pub request_id: u64,
    pub registration_id: u64,
}

impl Registered {
    #[must_use]
    pub fn new(request_id: u64, registration_id: u64) -> Self {
        Self {
            request_id,
            registration_id,
        }
    }
}

impl WampMessage for Registered {
    const TYPE: u64 = 65;
    const TEXT: &'static str = "REGISTERED";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let (request_id, registration_id) = parse_id_pair::<Self>(msg, "registration ID")?;
        Ok(Self::new(request_id, registration_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.registration_id),
        ]
    }
}

/// `[UNREGISTER, Request|id, REGISTERED.Registration|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct UnRegister {
    pub request_id: u64,
    pub registration_id: u64,
}

impl UnRegister {
    #[must_use]
    pub fn new(request_id: u64, registration_id: u64) -> Self {
        Self {
            request_id,
            registration_id,
        }
    }
}

impl WampMessage for UnRegister {
    const TYPE: u64 = 66;
    const TEXT: &'static str = "UNREGISTER";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let (request_id, registration_id) = parse_id_pair::<Self>(msg, "registration ID")?;
        Ok(Self::new(request_id, registration_id))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.registration_id),
        ]
    }
}

/// `[UNREGISTERED, UNREGISTER.Request|id]`
#[derive(Debug, Clone, PartialEq)]
pub struct UnRegistered {
    pub request_id: u64,
}

impl UnRegistered {
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self { request_id }
    }
}

impl WampMessage for UnRegistered {
    const TYPE: u64 = 67;
    const TEXT: &'static str = "UNREGISTERED";
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

/// `[INVOCATION, Request|id, REGISTERED.Registration|id, Details|dict,
/// CALL.Arguments|list?, CALL.ArgumentsKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub request_id: u64,
    pub registration_id: u64,
    pub details: Dict,
    pub payload: Payload,
}

impl Invocation {
    #[must_use]
    pub fn new(request_id: u64, registration_id: u64) -> Self {
        Self {
            request_id,
            registration_id,
            details: Dict::new(),
            payload: Payload::default(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Dict) -> Self {
        self.details = details;
        self
    }
}

payload_builders!(Invocation);

impl WampMessage for Invocation {
    const TYPE: u64 = 68;
    const TEXT: &'static str = "INVOCATION";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 6;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, registration_id, details, payload) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_id(&fields[2], Self::TEXT, "registration ID"),
            validate_dict(&fields[3], Self::TEXT, "details"),
            Payload::parse(fields, 4, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            registration_id,
            details,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.registration_id),
            Value::from(self.details.clone()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}

/// `[INTERRUPT, INVOCATION.Request|id, Options|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Interrupt {
    pub request_id: u64,
    pub options: Dict,
}

impl Interrupt {
    #[must_use]
    pub fn new(request_id: u64, options: Dict) -> Self {
        Self {
            request_id,
            options,
        }
    }
}

impl WampMessage for Interrupt {
    const TYPE: u64 = 69;
    const TEXT: &'static str = "INTERRUPT";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let (request_id, options) = parse_request_options::<Self>(msg)?;
        Ok(Self::new(request_id, options))
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
        ]
    }
}

/// `[YIELD, INVOCATION.Request|id, Options|dict, Arguments|list?, ArgumentsKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    pub request_id: u64,
    pub options: Dict,
    pub payload: Payload,
}

impl Yield {
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self {
            request_id,
            options: Dict::new(),
            payload: Payload::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Dict) -> Self {
        self.options = options;
        self
    }
}

payload_builders!(Yield);

impl WampMessage for Yield {
    const TYPE: u64 = 70;
    const TEXT: &'static str = "YIELD";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 5;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (request_id, options, payload) = (
            validate_id(&fields[1], Self::TEXT, "request ID"),
            validate_dict(&fields[2], Self::TEXT, "options"),
            Payload::parse(fields, 3, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            request_id,
            options,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.request_id),
            Value::from(self.options.clone()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}
