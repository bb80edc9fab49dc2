//! Explicit registration table resolving driver implementations.
//!
//! Resolution is a plain map lookup from the configuration discriminator to
//! a factory function; nothing is discovered dynamically, so the set of
//! available drivers is always visible at the registration site.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{Driver, DriverConfig};
use crate::error::{Result, ScopeError};

/// Constructs a driver from its configuration.
pub type DriverFactory = fn(&DriverConfig) -> Result<Arc<dyn Driver>>;

/// Maps configuration discriminators to driver factories.
#[derive(Debug, Default, Clone)]
pub struct DriverRegistry {
    factories: BTreeMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a discriminator, replacing any previous
    /// registration for the same kind.
    pub fn register(&mut self, kind: impl Into<String>, factory: DriverFactory) {
        let kind = kind.into();
        debug!(%kind, "registered driver factory");
        self.factories.insert(kind, factory);
    }

    /// Resolves a driver for the given configuration.
    pub fn resolve(&self, config: &DriverConfig) -> Result<Arc<dyn Driver>> {
        let factory = self
            .factories
            .get(&config.kind)
            .ok_or_else(|| ScopeError::UnknownDriver {
                kind: config.kind.clone(),
                registered: self.kinds().join(", "),
            })?;

        factory(config)
    }

    /// The registered discriminators, sorted.
    pub fn kinds(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
