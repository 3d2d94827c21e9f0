//! # Session Messages
//!
//! Opening, authenticating and closing a session: `Hello`, `Welcome`,
//! `Abort`, `Challenge`, `Authenticate`, `Goodbye`.

use super::WampMessage;
use crate::errors::ValidationError;
use crate::payload::Payload;
use crate::validation::{
    optional_dict, optional_string, optional_string_list, sanity_check, validate_dict,
    validate_id, validate_roles, validate_string, validate_uri, CollectErrors,
};
use crate::value::{Dict, List, Value};

// =============================================================================
// HELLO
// =============================================================================

/// `[HELLO, Realm|uri, Details|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Hello {
    pub realm: String,
    pub roles: Dict,
    pub authid: Option<String>,
    pub authrole: Option<String>,
    /// Emitted only when non-empty.
    pub authmethods: Vec<String>,
    pub authextra: Option<Dict>,
}

impl Hello {
    #[must_use]
    pub fn new(realm: impl Into<String>, roles: Dict) -> Self {
        Self {
            realm: realm.into(),
            roles,
            authid: None,
            authrole: None,
            authmethods: Vec::new(),
            authextra: None,
        }
    }

    #[must_use]
    pub fn with_authid(mut self, authid: impl Into<String>) -> Self {
        self.authid = Some(authid.into());
        self
    }

    #[must_use]
    pub fn with_authrole(mut self, authrole: impl Into<String>) -> Self {
        self.authrole = Some(authrole.into());
        self
    }

    #[must_use]
    pub fn with_authmethods(mut self, authmethods: Vec<String>) -> Self {
        self.authmethods = authmethods;
        self
    }

    #[must_use]
    pub fn with_authextra(mut self, authextra: Dict) -> Self {
        self.authextra = Some(authextra);
        self
    }

    fn details(&self) -> Dict {
        let mut details = Dict::new();
        details.insert("roles".to_string(), Value::from(self.roles.clone()));
        if let Some(authid) = &self.authid {
            details.insert("authid".to_string(), Value::from(authid.as_str()));
        }
        if let Some(authrole) = &self.authrole {
            details.insert("authrole".to_string(), Value::from(authrole.as_str()));
        }
        if !self.authmethods.is_empty() {
            let methods: List = self
                .authmethods
                .iter()
                .map(|method| Value::from(method.as_str()))
                .collect();
            details.insert("authmethods".to_string(), Value::List(methods));
        }
        if let Some(authextra) = &self.authextra {
            details.insert("authextra".to_string(), Value::from(authextra.clone()));
        }
        details
    }
}

impl WampMessage for Hello {
    const TYPE: u64 = 1;
    const TEXT: &'static str = "HELLO";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        // Realm and every details entry are reported together.
        let (realm, details) = (
            validate_uri(&fields[1], Self::TEXT, "realm"),
            validate_dict(&fields[2], Self::TEXT, "details").and_then(|details| {
                (
                    validate_roles(&details, Self::TEXT),
                    optional_string(&details, "authid", Self::TEXT),
                    optional_string(&details, "authrole", Self::TEXT),
                    optional_string_list(&details, "authmethods", Self::TEXT),
                    optional_dict(&details, "authextra", Self::TEXT),
                )
                    .collect_errors()
            }),
        )
            .collect_errors()?;

        let (roles, authid, authrole, authmethods, authextra) = details;
        Ok(Self {
            realm,
            roles,
            authid,
            authrole,
            authmethods,
            authextra,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.realm.as_str()),
            Value::from(self.details()),
        ]
    }
}

// =============================================================================
// WELCOME
// =============================================================================

/// `[WELCOME, Session|id, Details|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Welcome {
    pub session_id: u64,
    pub roles: Dict,
    pub authid: Option<String>,
    pub authrole: Option<String>,
    pub authmethod: Option<String>,
    pub authextra: Option<Dict>,
}

impl Welcome {
    #[must_use]
    pub fn new(session_id: u64, roles: Dict) -> Self {
        Self {
            session_id,
            roles,
            authid: None,
            authrole: None,
            authmethod: None,
            authextra: None,
        }
    }

    #[must_use]
    pub fn with_authid(mut self, authid: impl Into<String>) -> Self {
        self.authid = Some(authid.into());
        self
    }

    #[must_use]
    pub fn with_authrole(mut self, authrole: impl Into<String>) -> Self {
        self.authrole = Some(authrole.into());
        self
    }

    #[must_use]
    pub fn with_authmethod(mut self, authmethod: impl Into<String>) -> Self {
        self.authmethod = Some(authmethod.into());
        self
    }

    #[must_use]
    pub fn with_authextra(mut self, authextra: Dict) -> Self {
        self.authextra = Some(authextra);
        self
    }

    fn details(&self) -> Dict {
        let mut details = Dict::new();
        details.insert("roles".to_string(), Value::from(self.roles.clone()));
        let optional = [
            ("authid", &self.authid),
            ("authrole", &self.authrole),
            ("authmethod", &self.authmethod),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                details.insert(key.to_string(), Value::from(value.as_str()));
            }
        }
        if let Some(authextra) = &self.authextra {
            details.insert("authextra".to_string(), Value::from(authextra.clone()));
        }
        details
    }
}

impl WampMessage for Welcome {
    const TYPE: u64 = 2;
    const TEXT: &'static str = "WELCOME";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (session_id, details) = (
            validate_id(&fields[1], Self::TEXT, "session ID"),
            validate_dict(&fields[2], Self::TEXT, "details").and_then(|details| {
                (
                    validate_roles(&details, Self::TEXT),
                    optional_string(&details, "authid", Self::TEXT),
                    optional_string(&details, "authrole", Self::TEXT),
                    optional_string(&details, "authmethod", Self::TEXT),
                    optional_dict(&details, "authextra", Self::TEXT),
                )
                    .collect_errors()
            }),
        )
            .collect_errors()?;

        let (roles, authid, authrole, authmethod, authextra) = details;
        Ok(Self {
            session_id,
            roles,
            authid,
            authrole,
            authmethod,
            authextra,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.session_id),
            Value::from(self.details()),
        ]
    }
}

// =============================================================================
// ABORT
// =============================================================================

/// `[ABORT, Details|dict, Reason|uri, Arguments|list?, ArgumentsKw|dict?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Abort {
    pub details: Dict,
    pub reason: String,
    pub payload: Payload,
}

impl Abort {
    #[must_use]
    pub fn new(details: Dict, reason: impl Into<String>) -> Self {
        Self {
            details,
            reason: reason.into(),
            payload: Payload::default(),
        }
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

impl WampMessage for Abort {
    const TYPE: u64 = 3;
    const TEXT: &'static str = "ABORT";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 5;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (details, reason, payload) = (
            validate_dict(&fields[1], Self::TEXT, "details"),
            validate_uri(&fields[2], Self::TEXT, "reason"),
            Payload::parse(fields, 3, Self::TEXT),
        )
            .collect_errors()?;

        Ok(Self {
            details,
            reason,
            payload,
        })
    }

    fn marshal(&self) -> Vec<Value> {
        let mut out = vec![
            Value::from(Self::TYPE),
            Value::from(self.details.clone()),
            Value::from(self.reason.as_str()),
        ];
        self.payload.marshal_into(&mut out);
        out
    }
}

// =============================================================================
// CHALLENGE / AUTHENTICATE
// =============================================================================

/// `[CHALLENGE, AuthMethod|string, Extra|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub authmethod: String,
    pub extra: Dict,
}

impl Challenge {
    #[must_use]
    pub fn new(authmethod: impl Into<String>, extra: Dict) -> Self {
        Self {
            authmethod: authmethod.into(),
            extra,
        }
    }
}

impl WampMessage for Challenge {
    const TYPE: u64 = 4;
    const TEXT: &'static str = "CHALLENGE";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (authmethod, extra) = (
            validate_string(&fields[1], Self::TEXT, "authmethod"),
            validate_dict(&fields[2], Self::TEXT, "extra"),
        )
            .collect_errors()?;

        Ok(Self { authmethod, extra })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.authmethod.as_str()),
            Value::from(self.extra.clone()),
        ]
    }
}

/// `[AUTHENTICATE, Signature|string, Extra|dict]`
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticate {
    pub signature: String,
    pub extra: Dict,
}

impl Authenticate {
    #[must_use]
    pub fn new(signature: impl Into<String>, extra: Dict) -> Self {
        Self {
            signature: signature.into(),
            extra,
        }
    }
}

impl WampMessage for Authenticate {
    const TYPE: u64 = 5;
    const TEXT: &'static str = "AUTHENTICATE";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (signature, extra) = (
            validate_string(&fields[1], Self::TEXT, "signature"),
            validate_dict(&fields[2], Self::TEXT, "extra"),
        )
            .collect_errors()?;

        Ok(Self { signature, extra })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.signature.as_str()),
            Value::from(self.extra.clone()),
        ]
    }
}

// =============================================================================
// GOODBYE
// =============================================================================

/// `[GOODBYE, Details|dict, Reason|uri]`
#[derive(Debug, Clone, PartialEq)]
pub struct Goodbye {
    pub details: Dict,
    pub reason: String,
}

impl Goodbye {
    #[must_use]
    pub fn new(details: Dict, reason: impl Into<String>) -> Self {
        Self {
            details,
            reason: reason.into(),
        }
    }
}

impl WampMessage for Goodbye {
    const TYPE: u64 = 6;
    const TEXT: &'static str = "GOODBYE";
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 3;

    fn parse(msg: &Value) -> Result<Self, ValidationError> {
        let fields = sanity_check::<Self>(msg)?;

        let (details, reason) = (
            validate_dict(&fields[1], Self::TEXT, "details"),
            validate_uri(&fields[2], Self::TEXT, "reason"),
        )
            .collect_errors()?;

        Ok(Self { details, reason })
    }

    fn marshal(&self) -> Vec<Value> {
        vec![
            Value::from(Self::TYPE),
            Value::from(self.details.clone()),
            Value::from(self.reason.as_str()),
        ]
    }
}
