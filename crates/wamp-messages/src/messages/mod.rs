//! # Message Catalog
//!
//! The closed set of WAMP message kinds. Every kind has:
//!
//! - a type code (`TYPE`) and name (`TEXT`)
//! - an arity range (`MIN_LENGTH..=MAX_LENGTH`) including the type code
//! - `parse`, which validates a positional list into the typed message
//! - `marshal`, which emits the positional list back
//!
//! For every valid message `m`: `M::parse(&m.to_value()) == Ok(m)`.
//!
//! | Code | Kind | Arity | Module |
//! |------|------|-------|--------|
//! | 1 | Hello | 3 | `session` |
//! | 2 | Welcome | 3 | `session` |
//! | 3 | Abort | 3-5 | `session` |
//! | 4 | Challenge | 3 | `session` |
//! | 5 | Authenticate | 3 | `session` |
//! | 6 | Goodbye | 3 | `session` |
//! | 8 | Error | 5-7 | `error` |
//! | 16 | Publish | 4-6 | `pubsub` |
//! | 17 | Published | 3 | `pubsub` |
//! | 32 | Subscribe | 4 | `pubsub` |
//! | 33 | Subscribed | 3 | `pubsub` |
//! | 34 | UnSubscribe | 3 | `pubsub` |
//! | 35 | UnSubscribed | 2 | `pubsub` |
//! | 36 | Event | 4-6 | `pubsub` |
//! | 48 | Call | 4-6 | `rpc` |
//! | 49 | Cancel | 3 | `rpc` |
//! | 50 | Result | 3-5 | `rpc` |
//! | 64 | Register | 4 | `rpc` |
//! | 65 | Registered | 3 | `rpc` |
//! | 66 | UnRegister | 3 | `rpc` |
//! | 67 | UnRegistered | 2 | `rpc` |
//! | 68 | Invocation | 4-6 | `rpc` |
//! | 69 | Interrupt | 3 | `rpc` |
//! | 70 | Yield | 3-5 | `rpc` |

mod error;
mod pubsub;
mod rpc;
mod session;

pub use error::Error;
pub use pubsub::{Event, Publish, Published, Subscribe, Subscribed, UnSubscribe, UnSubscribed};
pub use rpc::{
    Call, CallResult, Cancel, Interrupt, Invocation, Register, Registered, UnRegister,
    UnRegistered, Yield,
};
pub use session::{Abort, Authenticate, Challenge, Goodbye, Hello, Welcome};

use crate::errors::ValidationError;
use crate::value::Value;

/// A message kind with a positional wire representation.
pub trait WampMessage: Sized {
    /// Type code, the first element on the wire.
    const TYPE: u64;
    /// Upper-case kind name used in error texts.
    const TEXT: &'static str;
    /// Minimum list length, type code included.
    const MIN_LENGTH: usize;
    /// Maximum list length, type code included.
    const MAX_LENGTH: usize;

    /// Validates a positional list into this kind.
    fn parse(msg: &Value) -> Result<Self, ValidationError>;

    /// Emits the positional list, type code first.
    fn marshal(&self) -> Vec<Value>;

    /// [`marshal`](Self::marshal) wrapped as a list value.
    fn to_value(&self) -> Value {
        Value::List(self.marshal())
    }
}

macro_rules! message_catalog {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any message of the catalog.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Message {
            $($variant($ty),)+
        }

        impl Message {
            /// Parses any kind, dispatching on the leading type code.
            pub fn parse(msg: &Value) -> Result<Self, ValidationError> {
                let code = leading_type_code(msg)?;
                $(
                    if code == i128::from(<$ty as WampMessage>::TYPE) {
                        return <$ty as WampMessage>::parse(msg).map(Message::$variant);
                    }
                )+
                Err(ValidationError::UnknownMessageType {
                    actual: Value::from(msg.as_list().and_then(|fields| fields.first()).cloned()),
                })
            }

            #[must_use]
            pub fn marshal(&self) -> Vec<Value> {
                match self {
                    $(Message::$variant(m) => m.marshal(),)+
                }
            }

            #[must_use]
            pub fn to_value(&self) -> Value {
                Value::List(self.marshal())
            }

            /// Type code of the contained kind.
            #[must_use]
            pub fn message_type(&self) -> u64 {
                match self {
                    $(Message::$variant(_) => <$ty as WampMessage>::TYPE,)+
                }
            }

            /// Name of the contained kind.
            #[must_use]
            pub fn text(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => <$ty as WampMessage>::TEXT,)+
                }
            }
        }

        $(
            impl From<$ty> for Message {
                fn from(message: $ty) -> Self {
                    Message::$variant(message)
                }
            }
        )+
    };
}

message_catalog! {
    Hello(Hello),
    Welcome(Welcome),
    Abort(Abort),
    Challenge(Challenge),
    Authenticate(Authenticate),
    Goodbye(Goodbye),
    Error(Error),
    Publish(Publish),
    Published(Published),
    Subscribe(Subscribe),
    Subscribed(Subscribed),
    UnSubscribe(UnSubscribe),
    UnSubscribed(UnSubscribed),
    Event(Event),
    Call(Call),
    Cancel(Cancel),
    Result(CallResult),
    Register(Register),
    Registered(Registered),
    UnRegister(UnRegister),
    UnRegistered(UnRegistered),
    Invocation(Invocation),
    Interrupt(Interrupt),
    Yield(Yield),
}

const CATALOG_TEXT: &str = "MESSAGE";

fn leading_type_code(msg: &Value) -> Result<i128, ValidationError> {
    let Value::List(fields) = msg else {
        return Err(ValidationError::NotAList {
            message: CATALOG_TEXT,
            actual: msg.kind(),
        });
    };

    let Some(first) = fields.first() else {
        return Err(ValidationError::TooShort {
            message: CATALOG_TEXT,
            length: 0,
            min: 1,
        });
    };

    first
        .as_integer()
        .ok_or_else(|| ValidationError::UnknownMessageType {
            actual: first.clone(),
        })
}
