//! Agent index: the browsers of a dataset snapshot
//!
//! Each [`Agent`] carries its display name, type classification and
//! per-version usage shares. The [`AgentIndex`] maps browser keys to agents
//! and is iterated in key order.

mod agent;
mod version;

pub use agent::{Agent, AgentRecord, VersionSlots};
pub use version::{BrowserVersionKey, VersionRank, KEY_SEPARATOR};

use std::collections::BTreeMap;

/// Browsers known to an engine, keyed by browser key
#[derive(Debug, Clone, Default)]
pub struct AgentIndex {
    agents: BTreeMap<String, Agent>,
}

impl AgentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent, replacing any agent with the same key
    pub fn insert(&mut self, agent: Agent) {
        self.agents.insert(agent.key().to_string(), agent);
    }

    pub fn get(&self, key: &str) -> Option<&Agent> {
        self.agents.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.agents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agents in key order
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Every composite key of every agent, in key then slot order
    pub fn version_keys(&self) -> Vec<BrowserVersionKey> {
        self.iter().flat_map(Agent::version_keys).collect()
    }
}

impl FromIterator<Agent> for AgentIndex {
    fn from_iter<I: IntoIterator<Item = Agent>>(iter: I) -> Self {
        let mut index = Self::new();
        for agent in iter {
            index.insert(agent);
        }
        index
    }
}
