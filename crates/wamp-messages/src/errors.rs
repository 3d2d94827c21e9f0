//! # Validation Errors
//!
//! Every way a positional message can fail to parse. Texts carry the
//! offending field, value and bound verbatim so interop test vectors can be
//! compared across implementations.

use crate::ids::MAX_ID;
use crate::roles::Role;
use crate::value::{Value, ValueKind};
use std::fmt;
use thiserror::Error;

/// Errors raised while validating a message's positional representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The message is not a list.
    #[error("invalid message type {actual} for {message}, type should be a list")]
    NotAList {
        message: &'static str,
        actual: ValueKind,
    },

    /// Fewer fields than the kind's minimum arity.
    #[error("invalid message length {length}, must be at least {min}")]
    TooShort {
        message: &'static str,
        length: usize,
        min: usize,
    },

    /// More fields than the kind's maximum arity.
    #[error("invalid message length {length}, must be at most {max}")]
    TooLong {
        message: &'static str,
        length: usize,
        max: usize,
    },

    /// The first field is not this kind's type code.
    #[error("invalid message id {actual} for {message}, expected {expected}")]
    UnexpectedMessageId {
        message: &'static str,
        expected: u64,
        actual: Value,
    },

    /// The first field is not a type code of any known kind.
    #[error("unknown message type {actual}")]
    UnknownMessageType { actual: Value },

    /// A field holds the wrong wire type.
    #[error(
        "invalid {field} '{actual}' for {message}, type should be {} {expected}",
        .expected.article()
    )]
    InvalidFieldType {
        message: &'static str,
        field: &'static str,
        expected: ValueKind,
        actual: Value,
    },

    /// An ID field is outside `[1, MAX_ID]`.
    #[error("invalid {field} {value} for {message}, must be between 1 and {}", MAX_ID)]
    IdOutOfRange {
        message: &'static str,
        field: &'static str,
        value: Value,
    },

    /// A dictionary field contains a non-string key.
    #[error("invalid type for key '{key}' in {field} for {message}")]
    InvalidKey {
        message: &'static str,
        field: &'static str,
        key: Value,
    },

    /// `roles` is absent or empty.
    #[error("roles are missing in details for {message}, allowed roles are {}", Role::allowed())]
    MissingRoles { message: &'static str },

    /// `roles` names a role outside the allowed set.
    #[error(
        "invalid role '{role}' in 'roles' details for {message}, allowed roles are {}",
        Role::allowed()
    )]
    UnknownRole { message: &'static str, role: String },

    /// A URI field is null or not a string.
    #[error("invalid {field} '{actual}' for {message}, type should be a string")]
    InvalidUri {
        message: &'static str,
        field: &'static str,
        actual: Value,
    },

    /// Several independent field errors on one message, in field order.
    #[error("{}", join_errors(.0))]
    Multiple(Vec<ValidationError>),
}

/// Abstract category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    TypeMismatch,
    LengthOutOfRange,
    Range,
    KeyType,
    Role,
    Uri,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationErrorKind::TypeMismatch => "type mismatch",
            ValidationErrorKind::LengthOutOfRange => "length out of range",
            ValidationErrorKind::Range => "range error",
            ValidationErrorKind::KeyType => "key type error",
            ValidationErrorKind::Role => "role error",
            ValidationErrorKind::Uri => "uri error",
        };
        f.write_str(name)
    }
}

impl ValidationError {
    /// Category of this error. An aggregate reports its first sub-error's kind.
    #[must_use]
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::NotAList { .. }
            | ValidationError::UnexpectedMessageId { .. }
            | ValidationError::UnknownMessageType { .. }
            | ValidationError::InvalidFieldType { .. } => ValidationErrorKind::TypeMismatch,
            ValidationError::TooShort { .. } | ValidationError::TooLong { .. } => {
                ValidationErrorKind::LengthOutOfRange
            }
            ValidationError::IdOutOfRange { .. } => ValidationErrorKind::Range,
            ValidationError::InvalidKey { .. } => ValidationErrorKind::KeyType,
            ValidationError::MissingRoles { .. } | ValidationError::UnknownRole { .. } => {
                ValidationErrorKind::Role
            }
            ValidationError::InvalidUri { .. } => ValidationErrorKind::Uri,
            ValidationError::Multiple(errors) => errors
                .first()
                .map_or(ValidationErrorKind::TypeMismatch, ValidationError::kind),
        }
    }

    /// Individual errors; a single error yields itself.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationError::Multiple(errors) => errors,
            single => std::slice::from_ref(single),
        }
    }

    /// Combines errors into one, flattening nested aggregates.
    ///
    /// A single error is returned unchanged.
    #[must_use]
    pub fn aggregate(errors: Vec<ValidationError>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                ValidationError::Multiple(inner) => flat.extend(inner),
                single => flat.push(single),
            }
        }
        if flat.len() == 1 {
            if let Some(single) = flat.pop() {
                return single;
            }
        }
        ValidationError::Multiple(flat)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
