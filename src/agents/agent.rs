//! A single tracked browser and its usage data

use super::version::BrowserVersionKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Version slots as they appear in the dataset.
///
/// caniuse ships them as an array with `null` holes, hand-written datasets
/// tend to use an object keyed by slot name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionSlots {
    List(Vec<Option<String>>),
    Map(BTreeMap<String, Option<String>>),
}

impl Default for VersionSlots {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl VersionSlots {
    /// Defined, non-empty labels in slot order
    pub fn labels(&self) -> Vec<String> {
        let slots: Vec<&Option<String>> = match self {
            Self::List(list) => list.iter().collect(),
            Self::Map(map) => map.values().collect(),
        };

        slots
            .into_iter()
            .filter_map(|label| label.as_deref())
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Agent entry of the dataset document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Display name, e.g. "Chrome"
    pub browser: String,
    /// Type classification, e.g. "desktop" or "mobile"
    #[serde(rename = "type")]
    pub browser_type: String,
    /// Overall share as published with the dataset
    #[serde(default)]
    pub share: f64,
    #[serde(default)]
    pub versions: VersionSlots,
    /// Version label to global usage fraction
    #[serde(default)]
    pub usage_global: BTreeMap<String, f64>,
}

impl AgentRecord {
    /// Create an empty record
    pub fn new(browser: &str, browser_type: &str) -> Self {
        Self {
            browser: browser.to_string(),
            browser_type: browser_type.to_string(),
            share: 0.0,
            versions: VersionSlots::default(),
            usage_global: BTreeMap::new(),
        }
    }

    /// Append a tracked version with its usage share
    pub fn version(mut self, label: &str, share: f64) -> Self {
        if let VersionSlots::List(list) = &mut self.versions {
            list.push(Some(label.to_string()));
        } else if let VersionSlots::Map(map) = &mut self.versions {
            map.insert(format!("v{}", map.len() + 1), Some(label.to_string()));
        }
        self.usage_global.insert(label.to_string(), share);
        self
    }

    /// Set the published overall share
    pub fn share(mut self, share: f64) -> Self {
        self.share = share;
        self
    }
}

/// A tracked browser with per-version usage lookups
#[derive(Debug, Clone)]
pub struct Agent {
    key: String,
    name: String,
    browser_type: String,
    share: f64,
    versions: Vec<String>,
    usage: HashMap<String, f64>,
    total_share: f64,
}

impl Agent {
    /// Build an agent from its dataset record
    pub fn new(key: &str, record: AgentRecord) -> Self {
        let versions = record.versions.labels();
        let total_share: f64 = record.usage_global.values().sum();

        Self {
            key: key.to_string(),
            name: record.browser,
            browser_type: record.browser_type,
            share: record.share,
            versions,
            usage: record.usage_global.into_iter().collect(),
            total_share,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn browser_type(&self) -> &str {
        &self.browser_type
    }

    /// Overall share as published, informational only
    pub fn share(&self) -> f64 {
        self.share
    }

    /// Sum of all per-version usage shares
    pub fn total_share(&self) -> f64 {
        self.total_share
    }

    /// Tracked version labels in slot order
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Composite keys for every tracked version
    pub fn version_keys(&self) -> Vec<BrowserVersionKey> {
        self.versions
            .iter()
            .filter_map(|version| BrowserVersionKey::new(&self.key, version).ok())
            .collect()
    }

    /// Usage share of a version, 0 when the version has no usage data
    pub fn share_of(&self, version: &str) -> f64 {
        self.usage.get(version).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> Agent {
        Agent::new(
            "chrome",
            AgentRecord::new("Chrome", "desktop")
                .share(0.6)
                .version("89", 0.1)
                .version("90", 0.5),
        )
    }

    #[test]
    fn test_agent_accessors() {
        let agent = chrome();
        assert_eq!(agent.key(), "chrome");
        assert_eq!(agent.name(), "Chrome");
        assert_eq!(agent.browser_type(), "desktop");
        assert_eq!(agent.share(), 0.6);
        assert!((agent.total_share() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_version_keys() {
        let keys: Vec<String> = chrome().version_keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["chrome+89", "chrome+90"]);
    }

    #[test]
    fn test_share_of_unknown_version_is_zero() {
        let agent = chrome();
        assert_eq!(agent.share_of("90"), 0.5);
        assert_eq!(agent.share_of("91"), 0.0);
    }

    #[test]
    fn test_null_and_empty_slots_are_skipped() {
        let record: AgentRecord = serde_json::from_str(
            r#"{
                "browser": "Firefox",
                "type": "desktop",
                "share": 0.3,
                "versions": [null, "", "87", "88", null],
                "usage_global": {"88": 0.3}
            }"#,
        )
        .unwrap();

        let agent = Agent::new("firefox", record);
        assert_eq!(agent.versions(), &["87".to_string(), "88".to_string()]);
        assert_eq!(agent.version_keys().len(), 2);
    }

    #[test]
    fn test_object_version_slots() {
        let record: AgentRecord = serde_json::from_str(
            r#"{
                "browser": "Chrome",
                "type": "desktop",
                "versions": {"v1": "90", "v2": null},
                "usage_global": {"90": 0.5}
            }"#,
        )
        .unwrap();

        let agent = Agent::new("chrome", record);
        assert_eq!(agent.versions(), &["90".to_string()]);
        assert_eq!(agent.share(), 0.0);
    }
}
