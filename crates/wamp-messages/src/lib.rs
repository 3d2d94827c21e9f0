//! # WAMP Messages Crate
//!
//! The closed catalog of WAMP message kinds and their positional wire form.
//!
//! ## Layers
//!
//! - [`value`]: dynamic wire values as produced by any serde codec
//! - [`validation`]: shared field checks and error aggregation
//! - [`messages`]: one typed record per message kind plus the [`Message`] union
//! - [`ids`]: ID domain and generators
//!
//! ## Design Principles
//!
//! - **Parse, don't trust**: a typed message exists only after its positional
//!   form passed every check for its kind.
//! - **Round-trip**: `M::parse(&m.to_value()) == Ok(m)` for every kind.
//! - **Complete reports**: independent field errors are collected, not
//!   short-circuited, so a peer sees every problem at once.
//!
//! ```
//! use serde_json::json;
//! use wamp_messages::{Message, Value};
//!
//! let wire = Value::from(json!([32, 1, {}, "io.xconn.test"]));
//! let message = Message::parse(&wire).unwrap();
//! assert_eq!(message.text(), "SUBSCRIBE");
//! assert_eq!(message.to_value(), wire);
//! ```

pub mod errors;
pub mod ids;
pub mod messages;
pub mod payload;
pub mod roles;
pub mod validation;
pub mod value;

pub use errors::{ValidationError, ValidationErrorKind};
pub use ids::{generate_global_id, is_valid_id, SessionScopeIdGenerator, MAX_ID};
pub use messages::*;
pub use payload::Payload;
pub use roles::Role;
pub use value::{Dict, List, Value, ValueKind};
