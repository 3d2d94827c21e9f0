//! # Validation Utilities
//!
//! Shared primitives every message kind builds its `parse` from:
//!
//! - `sanity_check`: list shape, arity bounds, type code
//! - `validate_id`: integer in `[1, MAX_ID]`
//! - `validate_uri` / `validate_string` / `validate_list` / `validate_dict`
//! - `validate_roles` and the optional-detail helpers used by `Hello`/`Welcome`
//! - `CollectErrors`: run independent field checks and report every failure

use crate::errors::ValidationError;
use crate::ids::MAX_ID;
use crate::messages::WampMessage;
use crate::roles::Role;
use crate::value::{Dict, List, Value, ValueKind};

/// Checks list shape, arity and type code; returns the fields on success.
pub fn sanity_check<M: WampMessage>(msg: &Value) -> Result<&[Value], ValidationError> {
    let Value::List(fields) = msg else {
        return Err(ValidationError::NotAList {
            message: M::TEXT,
            actual: msg.kind(),
        });
    };

    if fields.len() < M::MIN_LENGTH {
        return Err(ValidationError::TooShort {
            message: M::TEXT,
            length: fields.len(),
            min: M::MIN_LENGTH,
        });
    }

    if fields.len() > M::MAX_LENGTH {
        return Err(ValidationError::TooLong {
            message: M::TEXT,
            length: fields.len(),
            max: M::MAX_LENGTH,
        });
    }

    let code = fields.first().cloned().unwrap_or(Value::Null);
    if code.as_integer() != Some(i128::from(M::TYPE)) {
        return Err(ValidationError::UnexpectedMessageId {
            message: M::TEXT,
            expected: M::TYPE,
            actual: code,
        });
    }

    Ok(fields)
}

/// Validates an ID field against `[1, MAX_ID]`.
pub fn validate_id(
    value: &Value,
    message: &'static str,
    field: &'static str,
) -> Result<u64, ValidationError> {
    let Some(id) = value.as_integer() else {
        return Err(ValidationError::InvalidFieldType {
            message,
            field,
            expected: ValueKind::Integer,
            actual: value.clone(),
        });
    };

    if id < 1 || id > i128::from(MAX_ID) {
        return Err(ValidationError::IdOutOfRange {
            message,
            field,
            value: value.clone(),
        });
    }

    u64::try_from(id).map_err(|_| ValidationError::IdOutOfRange {
        message,
        field,
        value: value.clone(),
    })
}

/// Validates a URI field: non-null string.
pub fn validate_uri(
    value: &Value,
    message: &'static str,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Value::String(uri) => Ok(uri.clone()),
        other => Err(ValidationError::InvalidUri {
            message,
            field,
            actual: other.clone(),
        }),
    }
}

pub fn validate_string(
    value: &Value,
    message: &'static str,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(type_mismatch(other, ValueKind::String, message, field)),
    }
}

pub fn validate_list(
    value: &Value,
    message: &'static str,
    field: &'static str,
) -> Result<List, ValidationError> {
    match value {
        Value::List(items) => Ok(items.clone()),
        other => Err(type_mismatch(other, ValueKind::List, message, field)),
    }
}

/// Validates a mapping whose keys must all be strings.
pub fn validate_dict(
    value: &Value,
    message: &'static str,
    field: &'static str,
) -> Result<Dict, ValidationError> {
    let Value::Map(entries) = value else {
        return Err(type_mismatch(value, ValueKind::Dictionary, message, field));
    };

    let mut dict = Dict::new();
    for (key, item) in entries {
        let Value::String(key) = key else {
            return Err(ValidationError::InvalidKey {
                message,
                field,
                key: key.clone(),
            });
        };
        dict.insert(key.clone(), item.clone());
    }
    Ok(dict)
}

/// Validates the optional trailing `args` field.
pub fn validate_args(
    value: Option<&Value>,
    message: &'static str,
) -> Result<Option<List>, ValidationError> {
    value.map(|v| validate_list(v, message, "args")).transpose()
}

/// Validates the optional trailing `kwargs` field.
pub fn validate_kwargs(
    value: Option<&Value>,
    message: &'static str,
) -> Result<Option<Dict>, ValidationError> {
    value.map(|v| validate_dict(v, message, "kwargs")).transpose()
}

/// Validates `details["roles"]`: a non-empty mapping of allowed role names.
pub fn validate_roles(details: &Dict, message: &'static str) -> Result<Dict, ValidationError> {
    let Some(roles) = details.get("roles") else {
        return Err(ValidationError::MissingRoles { message });
    };

    let roles = validate_dict(roles, message, "roles")?;
    if roles.is_empty() {
        return Err(ValidationError::MissingRoles { message });
    }

    if let Some(unknown) = roles.keys().find(|name| name.parse::<Role>().is_err()) {
        return Err(ValidationError::UnknownRole {
            message,
            role: unknown.clone(),
        });
    }

    Ok(roles)
}

/// Optional string entry of a details mapping.
pub fn optional_string(
    details: &Dict,
    key: &'static str,
    message: &'static str,
) -> Result<Option<String>, ValidationError> {
    details
        .get(key)
        .map(|value| validate_string(value, message, key))
        .transpose()
}

/// Optional dictionary entry of a details mapping.
pub fn optional_dict(
    details: &Dict,
    key: &'static str,
    message: &'static str,
) -> Result<Option<Dict>, ValidationError> {
    details
        .get(key)
        .map(|value| validate_dict(value, message, key))
        .transpose()
}

/// Optional list-of-strings entry of a details mapping; absent is empty.
pub fn optional_string_list(
    details: &Dict,
    key: &'static str,
    message: &'static str,
) -> Result<Vec<String>, ValidationError> {
    let Some(value) = details.get(key) else {
        return Ok(Vec::new());
    };

    let items = validate_list(value, message, key)?;
    items
        .iter()
        .map(|item| validate_string(item, message, key))
        .collect()
}

fn type_mismatch(
    actual: &Value,
    expected: ValueKind,
    message: &'static str,
    field: &'static str,
) -> ValidationError {
    ValidationError::InvalidFieldType {
        message,
        field,
        expected,
        actual: actual.clone(),
    }
}

// =============================================================================
// ERROR AGGREGATION
// =============================================================================

/// Runs a tuple of independent field checks and reports every failure.
///
/// On success the unwrapped values come back in the same positions; on
/// failure the errors are combined with [`ValidationError::aggregate`] in
/// tuple order.
pub trait CollectErrors {
    type Output;

    fn collect_errors(self) -> Result<Self::Output, ValidationError>;
}

macro_rules! impl_collect_errors {
    ($($name:ident: $ty:ident),+) => {
        impl<$($ty),+> CollectErrors for ($(Result<$ty, ValidationError>,)+) {
            type Output = ($($ty,)+);

            fn collect_errors(self) -> Result<Self::Output, ValidationError> {
                let ($($name,)+) = self;
                let mut errors = Vec::new();
                $(
                    let $name = match $name {
                        Ok(value) => Some(value),
                        Err(error) => {
                            errors.push(error);
                            None
                        }
                    };
                )+
                match ($($name,)+) {
                    ($(Some($name),)+) => Ok(($($name,)+)),
                    _ => Err(ValidationError::aggregate(errors)),
                }
            }
        }
    };
}

impl_collect_errors!(a: A);
impl_collect_errors!(a: A, b: B);
impl_collect_errors!(a: A, b: B, c: C);
impl_collect_errors!(a: A, b: B, c: C, d: D);
impl_collect_errors!(a: A, b: B, c: C, d: D, e: E);
impl_collect_errors!(a: A, b: B, c: C, d: D, e: E, f: F);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationErrorKind;
    use serde_json::json;

    #[test]
    fn test_validate_id_bounds() {
        assert_eq!(validate_id(&Value::Integer(1), "CALL", "request ID"), Ok(1));
        assert_eq!(
            validate_id(&Value::from(MAX_ID), "CALL", "request ID"),
            Ok(MAX_ID)
        );

        for bad in [Value::Integer(0), Value::Integer(-1), Value::from(MAX_ID + 1)] {
            let error = validate_id(&bad, "CALL", "request ID").unwrap_err();
            assert_eq!(error.kind(), ValidationErrorKind::Range);
        }
    }

    #[test]
    fn test_validate_id_rejects_non_integer() {
        let error = validate_id(&Value::Float(1.0), "CALL", "request ID").unwrap_err();
        assert_eq!(error.kind(), ValidationErrorKind::TypeMismatch);
    }

    #[test]
    fn test_validate_dict_rejects_non_string_key() {
        let value = Value::Map(vec![(Value::Integer(1), Value::from("v"))]);
        let error = validate_dict(&value, "GOODBYE", "details").unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::KeyType);
        assert_eq!(
            error.to_string(),
            "invalid type for key '1' in details for GOODBYE"
        );
    }

    #[test]
    fn test_validate_uri_rejects_null() {
        let error = validate_uri(&Value::Null, "CALL", "uri").unwrap_err();
        assert_eq!(error.kind(), ValidationErrorKind::Uri);
        assert_eq!(
            error.to_string(),
            "invalid uri 'null' for CALL, type should be a string"
        );
    }

    #[test]
    fn test_validate_roles() {
        let details = validate_dict(&Value::from(json!({"roles": {"caller": {}}})), "HELLO", "details")
            .expect("details");
        assert!(validate_roles(&details, "HELLO").is_ok());

        let missing = Dict::new();
        assert_eq!(
            validate_roles(&missing, "HELLO"),
            Err(ValidationError::MissingRoles { message: "HELLO" })
        );

        let unknown = validate_dict(&Value::from(json!({"roles": {"new_role": {}}})), "HELLO", "details")
            .expect("details");
        assert_eq!(
            validate_roles(&unknown, "HELLO"),
            Err(ValidationError::UnknownRole {
                message: "HELLO",
                role: "new_role".to_string()
            })
        );

        let wrong_type = validate_dict(&Value::from(json!({"roles": "new_role"})), "HELLO", "details")
            .expect("details");
        let error = validate_roles(&wrong_type, "HELLO").unwrap_err();
        assert_eq!(error.kind(), ValidationErrorKind::TypeMismatch);
    }

    #[test]
    fn test_optional_string_list() {
        let details = validate_dict(
            &Value::from(json!({"authmethods": ["ticket", "wampcra"], "bad": ["ok", 1]})),
            "HELLO",
            "details",
        )
        .expect("details");

        assert_eq!(
            optional_string_list(&details, "authmethods", "HELLO"),
            Ok(vec!["ticket".to_string(), "wampcra".to_string()])
        );
        assert_eq!(optional_string_list(&details, "absent", "HELLO"), Ok(vec![]));
        assert!(optional_string_list(&details, "bad", "HELLO").is_err());
    }

    #[test]
    fn test_collect_errors_reports_all_failures() {
        let result = (
            validate_id(&Value::Integer(0), "CALL", "request ID"),
            validate_dict(&Value::from("options"), "CALL", "options"),
            validate_uri(&Value::from("io.xconn.ping"), "CALL", "uri"),
        )
            .collect_errors();

        let error = result.unwrap_err();
        assert_eq!(error.errors().len(), 2);
        assert_eq!(error.errors()[0].kind(), ValidationErrorKind::Range);
        assert_eq!(error.errors()[1].kind(), ValidationErrorKind::TypeMismatch);
    }

    #[test]
    fn test_collect_errors_success() {
        let (id, uri) = (
            validate_id(&Value::Integer(7), "CALL", "request ID"),
            validate_uri(&Value::from("io.xconn.ping"), "CALL", "uri"),
        )
            .collect_errors()
            .expect("valid");

        assert_eq!(id, 7);
        assert_eq!(uri, "io.xconn.ping");
    }
}
