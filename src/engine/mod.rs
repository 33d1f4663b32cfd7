//! Aggregation engine answering feature-support queries
//!
//! A query runs in three steps:
//! 1. Collect the browser versions whose state for each requested feature is
//!    one of the acceptable states (every tracked version when no feature is
//!    requested)
//! 2. Intersect those candidate lists
//! 3. Resolve each surviving key against the agent index
//!
//! The grouped views ([`StatsEngine::browsers_by_feature`] and
//! [`StatsEngine::types_by_feature`]) reduce the resolved records per browser
//! name or per browser type.

mod aggregate;

pub use aggregate::{aggregate, AggregateResult, GroupBy};

use crate::agents::{AgentIndex, BrowserVersionKey, VersionRank};
use crate::features::{Feature, FeatureRegistry, SupportState};
use crate::utils::Result;
use serde::Serialize;
use std::collections::HashSet;

/// One browser version satisfying a query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserMatch {
    /// Composite key, e.g. `chrome+90`
    pub key: BrowserVersionKey,
    /// Version label exactly as in the dataset
    pub version: String,
    #[serde(rename = "type")]
    pub browser_type: String,
    /// Browser display name
    pub name: String,
    /// Usage share of this version
    pub browser_share: f64,
    #[serde(skip)]
    pub rank: VersionRank,
}

/// Query engine over one immutable dataset snapshot
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    agents: AgentIndex,
    features: FeatureRegistry,
}

impl StatsEngine {
    /// Create an engine from an agent index and a feature registry
    pub fn new(agents: AgentIndex, features: FeatureRegistry) -> Self {
        Self { agents, features }
    }

    pub fn agents(&self) -> &AgentIndex {
        &self.agents
    }

    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    /// Known feature names, sorted
    pub fn list_features(&self) -> Vec<&str> {
        self.features.names()
    }

    pub fn get_feature(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    /// Browser versions supporting every feature in `features` with one of
    /// `states`.
    ///
    /// An empty feature list matches every tracked browser version. Fails
    /// with `UnknownFeature` if any requested name is not registered.
    pub fn query<S: AsRef<str>>(
        &self,
        features: &[S],
        states: &[SupportState],
    ) -> Result<Vec<BrowserMatch>> {
        let candidates = self.candidates(features, states)?;
        let keys = intersect(candidates);

        let matches: Vec<BrowserMatch> = keys
            .into_iter()
            .filter_map(|key| self.resolve(key))
            .collect();

        log::debug!(
            "Query {:?} with states {:?} matched {} browser versions",
            features.iter().map(|name| name.as_ref()).collect::<Vec<&str>>(),
            states.iter().map(SupportState::as_str).collect::<Vec<_>>(),
            matches.len()
        );

        Ok(matches)
    }

    /// Per-browser summary of [`query`](Self::query)
    pub fn browsers_by_feature<S: AsRef<str>>(
        &self,
        features: &[S],
        states: &[SupportState],
    ) -> Result<Vec<AggregateResult>> {
        self.features_by_property(features, states, GroupBy::Name)
    }

    /// Per-type summary of [`query`](Self::query)
    pub fn types_by_feature<S: AsRef<str>>(
        &self,
        features: &[S],
        states: &[SupportState],
    ) -> Result<Vec<AggregateResult>> {
        self.features_by_property(features, states, GroupBy::Type)
    }

    pub fn features_by_property<S: AsRef<str>>(
        &self,
        features: &[S],
        states: &[SupportState],
        group_by: GroupBy,
    ) -> Result<Vec<AggregateResult>> {
        let matches = self.query(features, states)?;
        Ok(aggregate(&matches, group_by))
    }

    /// One candidate list per requested feature
    fn candidates<S: AsRef<str>>(
        &self,
        features: &[S],
        states: &[SupportState],
    ) -> Result<Vec<Vec<BrowserVersionKey>>> {
        if features.is_empty() {
            return Ok(vec![self.agents.version_keys()]);
        }

        features
            .iter()
            .map(|name| {
                self.features
                    .lookup(name.as_ref())
                    .map(|feature| feature.matching_keys(states))
            })
            .collect()
    }

    fn resolve(&self, key: BrowserVersionKey) -> Option<BrowserMatch> {
        let Some(agent) = self.agents.get(key.browser()) else {
            log::debug!("Dropping {}: browser not in agent index", key);
            return None;
        };

        Some(BrowserMatch {
            version: key.version().to_string(),
            browser_type: agent.browser_type().to_string(),
            name: agent.name().to_string(),
            browser_share: agent.share_of(key.version()),
            rank: key.rank(),
            key,
        })
    }
}

/// Keys present in every list, deduplicated, in the order of the first list
fn intersect(lists: Vec<Vec<BrowserVersionKey>>) -> Vec<BrowserVersionKey> {
    let mut lists = lists.into_iter();
    let Some(first) = lists.next() else {
        return Vec::new();
    };

    let others: Vec<HashSet<BrowserVersionKey>> =
        lists.map(|list| list.into_iter().collect()).collect();
    let mut seen = HashSet::new();

    first
        .into_iter()
        .filter(|key| others.iter().all(|set| set.contains(key)))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
