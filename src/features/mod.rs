//! Feature registry: support matrices keyed by feature name

mod support;

pub use support::{Feature, FeatureRecord, SupportMatrix, SupportState};

use crate::utils::{Result, StatsError};
use std::collections::BTreeMap;

/// Registered features of a dataset snapshot
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    features: BTreeMap<String, Feature>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a feature; a later registration under the same name wins
    pub fn register(&mut self, feature: Feature) {
        if let Some(previous) = self.features.insert(feature.name().to_string(), feature) {
            log::debug!("Feature {} re-registered", previous.name());
        }
    }

    /// Look up a feature that the caller requires to exist
    pub fn lookup(&self, name: &str) -> Result<&Feature> {
        self.features
            .get(name)
            .ok_or_else(|| StatsError::UnknownFeature(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    /// Feature names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.features.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }
}
