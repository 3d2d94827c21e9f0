//! # Identifiers
//!
//! Request, session, subscription, publication and registration IDs all share
//! one domain: integers in `[1, 2^53]`, so they survive a round trip through
//! IEEE-754 doubles in peers that have no native 64-bit integers.
//!
//! Two allocation scopes exist:
//!
//! - **Global scope** (`generate_global_id`): drawn uniformly at random.
//!   Used for session and publication IDs.
//! - **Session scope** (`SessionScopeIdGenerator`): sequential from 1.
//!   Used for request and subscription IDs.

use rand::Rng;

/// Largest legal ID value (2^53).
pub const MAX_ID: u64 = 1 << 53;

/// Returns true if `id` lies in `[1, MAX_ID]`.
#[must_use]
pub fn is_valid_id(id: u64) -> bool {
    (1..=MAX_ID).contains(&id)
}

/// Draws a random ID from the global scope.
#[must_use]
pub fn generate_global_id() -> u64 {
    rand::thread_rng().gen_range(1..=MAX_ID)
}

/// Sequential ID allocator; wraps back to 1 after `MAX_ID`.
#[derive(Debug, Default)]
pub struct SessionScopeIdGenerator {
    last: u64,
}

impl SessionScopeIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next ID.
    pub fn next_id(&mut self) -> u64 {
        if self.last >= MAX_ID {
            self.last = 0;
        }
        self.last += 1;
        self.last
    }
}
