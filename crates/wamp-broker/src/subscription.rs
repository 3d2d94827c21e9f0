//! Topic subscription record.

use std::collections::BTreeSet;

/// One subscription per topic, shared by every subscriber of that topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Subscription {
    pub(crate) id: u64,
    pub(crate) topic: String,
    pub(crate) subscribers: BTreeSet<u64>,
}

impl Subscription {
    pub(crate) fn new(id: u64, topic: String) -> Self {
        Self {
            id,
            topic,
            subscribers: BTreeSet::new(),
        }
    }
}
