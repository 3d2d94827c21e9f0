//! # WAMP Core Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── message_flows.rs   # wire values through the catalog and back
//!     └── broker_flows.rs    # parsed messages driving the broker
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wamp-tests
//! cargo test -p wamp-tests integration::broker_flows
//! ```

pub mod integration;
