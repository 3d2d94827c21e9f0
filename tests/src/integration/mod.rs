//! # Integration Flows
//!
//! Raw positional values are parsed by `wamp-messages`, routed by
//! `wamp-broker`, and the broker's replies are marshalled back to the wire.

pub mod broker_flows;
pub mod message_flows;

use wamp_messages::Value;

/// Decode a JSON frame the way a transport would hand it over.
pub fn decode(frame: &str) -> Value {
    match serde_json::from_str(frame) {
        Ok(value) => value,
        Err(error) => panic!("test frame is not JSON: {error}"),
    }
}

/// Encode a positional value back into a JSON frame.
pub fn encode(value: &Value) -> String {
    match serde_json::to_string(value) {
        Ok(frame) => frame,
        Err(error) => panic!("value is not serializable: {error}"),
    }
}
