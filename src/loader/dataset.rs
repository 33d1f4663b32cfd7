//! Dataset document and agent-type filtering

use crate::agents::{Agent, AgentIndex, AgentRecord};
use crate::engine::StatsEngine;
use crate::features::{Feature, FeatureRecord, FeatureRegistry};
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The JSON document consumed by the loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub agents: BTreeMap<String, AgentRecord>,
    /// Feature name to feature entry
    #[serde(default)]
    pub data: BTreeMap<String, FeatureRecord>,
}

impl Dataset {
    /// Decode a dataset from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a dataset from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Build an engine from the agents accepted by `filter`.
    ///
    /// Browser columns of rejected agents are removed from every feature
    /// matrix.
    pub fn into_engine(self, filter: &AgentFilter) -> StatsEngine {
        let agents: AgentIndex = self
            .agents
            .into_iter()
            .filter(|(_, record)| filter.accepts(&record.browser_type))
            .map(|(key, record)| Agent::new(&key, record))
            .collect();

        let mut features = FeatureRegistry::new();
        for (name, record) in self.data {
            let mut feature = Feature::new(&name, record);
            feature.retain_browsers(|browser| agents.contains(browser));
            features.register(feature);
        }

        log::info!(
            "Loaded {} agents ({}) and {} features",
            agents.len(),
            filter,
            features.len()
        );

        StatsEngine::new(agents, features)
    }
}

/// Which agents a loaded engine includes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AgentFilter {
    #[default]
    All,
    /// Only agents of this type, e.g. "desktop"
    Type(String),
}

impl AgentFilter {
    pub fn accepts(&self, browser_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Type(wanted) => wanted == browser_type,
        }
    }
}

impl FromStr for AgentFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "" | "all" => Self::All,
            other => Self::Type(other.to_string()),
        })
    }
}

impl fmt::Display for AgentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Type(browser_type) => f.write_str(browser_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::SupportState;

    const DOCUMENT: &str = r#"{
        "agents": {
            "chrome": {
                "browser": "Chrome",
                "type": "desktop",
                "share": 0.5,
                "versions": [null, "90"],
                "usage_global": {"90": 0.5}
            },
            "and_chr": {
                "browser": "Chrome for Android",
                "type": "mobile",
                "share": 0.2,
                "versions": ["91"],
                "usage_global": {"91": 0.2}
            }
        },
        "data": {
            "grid": {
                "title": "CSS Grid Layout",
                "stats": {
                    "chrome": {"90": "y"},
                    "and_chr": {"91": "y"}
                }
            }
        }
    }"#;

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<AgentFilter>().unwrap(), AgentFilter::All);
        assert_eq!(
            "mobile".parse::<AgentFilter>().unwrap(),
            AgentFilter::Type("mobile".into())
        );
        assert!(AgentFilter::Type("mobile".into()).accepts("mobile"));
        assert!(!AgentFilter::Type("mobile".into()).accepts("desktop"));
    }

    #[test]
    fn test_into_engine_all() {
        let engine = Dataset::from_json(DOCUMENT)
            .unwrap()
            .into_engine(&AgentFilter::All);
        assert_eq!(engine.agents().len(), 2);
        assert_eq!(engine.list_features(), vec!["grid"]);
    }

    #[test]
    fn test_into_engine_filters_agents_and_columns() {
        let engine = Dataset::from_json(DOCUMENT)
            .unwrap()
            .into_engine(&AgentFilter::Type("desktop".into()));

        assert_eq!(engine.agents().len(), 1);
        let grid = engine.get_feature("grid").unwrap();
        assert!(grid.stats().contains_key("chrome"));
        assert!(!grid.stats().contains_key("and_chr"));

        let matches = engine.query(&["grid"], &[SupportState::Supported]).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key.to_string(), "chrome+90");
    }

    #[test]
    fn test_empty_document() {
        let engine = Dataset::from_json("{}").unwrap().into_engine(&AgentFilter::All);
        assert!(engine.agents().is_empty());
        assert!(engine.features().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        assert!(Dataset::from_json(r#"{"agents": []}"#).is_err());
    }
}
