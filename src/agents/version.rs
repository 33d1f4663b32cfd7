//! Composite browser/version keys and version ranking

use crate::utils::{Result, StatsError};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Separator between browser key and version label in a composite key
pub const KEY_SEPARATOR: char = '+';

/// One concrete browser-version pair, e.g. `chrome+90`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrowserVersionKey {
    browser: String,
    version: String,
}

impl BrowserVersionKey {
    /// Create a key from its parts.
    ///
    /// The browser key must not contain the separator, otherwise the composite
    /// form could not be split back unambiguously.
    pub fn new(browser: &str, version: &str) -> Result<Self> {
        if browser.is_empty() || browser.contains(KEY_SEPARATOR) {
            return Err(StatsError::InvalidKey(format!(
                "{}{}{}",
                browser, KEY_SEPARATOR, version
            )));
        }

        Ok(Self {
            browser: browser.to_string(),
            version: version.to_string(),
        })
    }

    /// Parse a composite key, splitting at the first separator only
    pub fn parse(key: &str) -> Result<Self> {
        match key.split_once(KEY_SEPARATOR) {
            Some((browser, version)) => Self::new(browser, version),
            None => Err(StatsError::InvalidKey(key.to_string())),
        }
    }

    pub fn browser(&self) -> &str {
        &self.browser
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rank of the version label, for "since" computations
    pub fn rank(&self) -> VersionRank {
        VersionRank::parse(&self.version)
    }
}

impl fmt::Display for BrowserVersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.browser, KEY_SEPARATOR, self.version)
    }
}

impl Serialize for BrowserVersionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Numeric rank of a version label.
///
/// Labels are ranked by the leading decimal digits of the part before the
/// first `-`: `"79-80"` ranks as 79 and `"15.2-15.3"` as 15. Labels with no
/// such prefix (`"TP"`, `"all"`) rank as [`VersionRank::Unbounded`], which
/// sorts after every numeric rank so it never wins a minimum against one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionRank {
    /// Leading major version number
    Numeric(u64),
    /// No numeric prefix; treated as positive infinity
    Unbounded,
}

impl VersionRank {
    pub fn parse(label: &str) -> Self {
        let head = label.split('-').next().unwrap_or("").trim_start();
        let digits: &str = match head.find(|c: char| !c.is_ascii_digit()) {
            Some(end) => &head[..end],
            None => head,
        };

        digits
            .parse::<u64>()
            .map(Self::Numeric)
            .unwrap_or(Self::Unbounded)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// The rank as a float, with `Unbounded` mapped to positive infinity
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Numeric(n) => *n as f64,
            Self::Unbounded => f64::INFINITY,
        }
    }
}

impl Ord for VersionRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Numeric(_), Self::Unbounded) => Ordering::Less,
            (Self::Unbounded, Self::Numeric(_)) => Ordering::Greater,
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
        }
    }
}

impl PartialOrd for VersionRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Unbounded => write!(f, "∞"),
        }
    }
}

// Serialized as a JSON number, or null for the unbounded rank.
impl Serialize for VersionRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(n) => serializer.serialize_u64(*n),
            Self::Unbounded => serializer.serialize_none(),
        }
    }
}
