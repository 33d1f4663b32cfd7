//! Support states and per-feature support matrices

use crate::agents::BrowserVersionKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a browser version handles a feature.
///
/// The single-letter caniuse codes get their own variants. Anything else,
/// including combined codes with notes such as `"a x #2"`, is kept verbatim
/// and only matches an identical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SupportState {
    Supported,
    Unsupported,
    Partial,
    Polyfill,
    Unknown,
    Prefixed,
    Other(String),
}

impl SupportState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Supported => "y",
            Self::Unsupported => "n",
            Self::Partial => "a",
            Self::Polyfill => "p",
            Self::Unknown => "u",
            Self::Prefixed => "x",
            Self::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "y" => Self::Supported,
            "n" => Self::Unsupported,
            "a" => Self::Partial,
            "p" => Self::Polyfill,
            "u" => Self::Unknown,
            "x" => Self::Prefixed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SupportState {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for SupportState {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<SupportState> for String {
    fn from(state: SupportState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for SupportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `browser key -> version label -> state`
pub type SupportMatrix = BTreeMap<String, BTreeMap<String, SupportState>>;

/// Feature entry of the dataset document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub stats: SupportMatrix,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state of one browser version
    pub fn stat(mut self, browser: &str, version: &str, state: &str) -> Self {
        self.stats
            .entry(browser.to_string())
            .or_default()
            .insert(version.to_string(), SupportState::parse(state));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// A registered feature and its support matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    title: Option<String>,
    stats: SupportMatrix,
}

impl Feature {
    pub fn new(name: &str, record: FeatureRecord) -> Self {
        Self {
            name: name.to_string(),
            title: record.title,
            stats: record.stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn stats(&self) -> &SupportMatrix {
        &self.stats
    }

    /// State of one browser version, if the matrix has an entry for it
    pub fn state(&self, browser: &str, version: &str) -> Option<&SupportState> {
        self.stats.get(browser)?.get(version)
    }

    /// Keys of every entry whose state is one of `states`, in matrix order
    pub fn matching_keys(&self, states: &[SupportState]) -> Vec<BrowserVersionKey> {
        let mut keys = Vec::new();

        for (browser, versions) in &self.stats {
            for (version, state) in versions {
                if !states.contains(state) {
                    continue;
                }
                match BrowserVersionKey::new(browser, version) {
                    Ok(key) => keys.push(key),
                    Err(e) => log::warn!("Skipping entry of feature {}: {}", self.name, e),
                }
            }
        }

        keys
    }

    /// Drop every browser column not accepted by `keep`
    pub fn retain_browsers<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.stats.retain(|browser, _| keep(browser));
    }
}
