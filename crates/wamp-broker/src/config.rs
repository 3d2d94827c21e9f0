//! Broker configuration

use serde::{Deserialize, Serialize};

/// How publication IDs are allocated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationIdStrategy {
    /// Uniformly random over the ID domain (global scope).
    #[default]
    Random,
    /// 1, 2, 3, ... per broker; deterministic for replayable tests.
    Sequential,
}

/// Broker configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Publication ID allocation
    pub publication_ids: PublicationIdStrategy,
}

impl BrokerConfig {
    /// Builder-style method to set the publication ID strategy
    #[must_use]
    pub fn with_publication_ids(mut self, strategy: PublicationIdStrategy) -> Self {
        self.publication_ids = strategy;
        self
    }
}
