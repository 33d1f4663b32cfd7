//! Grouped aggregation of match records

use super::BrowserMatch;
use crate::agents::VersionRank;
use serde::Serialize;
use std::collections::HashMap;

/// Property match records are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// Browser display name
    Name,
    /// Browser type classification
    Type,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
        }
    }

    fn key<'a>(&self, record: &'a BrowserMatch) -> &'a str {
        match self {
            Self::Name => &record.name,
            Self::Type => &record.browser_type,
        }
    }
}

/// Summary of one group of match records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Group key: browser name or type
    pub name: String,
    /// Rank of every version in the group
    pub versions: Vec<VersionRank>,
    /// Raw version labels, parallel to `versions`
    pub labels: Vec<String>,
    /// Earliest version in the group
    pub since: VersionRank,
    /// Summed usage share of the group
    pub share: f64,
}

impl AggregateResult {
    fn start(name: &str, record: &BrowserMatch) -> Self {
        Self {
            name: name.to_string(),
            versions: vec![record.rank],
            labels: vec![record.version.clone()],
            since: record.rank,
            share: record.browser_share,
        }
    }

    fn add(&mut self, record: &BrowserMatch) {
        self.versions.push(record.rank);
        self.labels.push(record.version.clone());
        self.since = self.since.min(record.rank);
        self.share += record.browser_share;
    }

    /// Number of versions in the group
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Group records by `group_by`, keeping groups in order of first appearance
pub fn aggregate(records: &[BrowserMatch], group_by: GroupBy) -> Vec<AggregateResult> {
    let mut groups: Vec<AggregateResult> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let key = group_by.key(record);
        match positions.get(key) {
            Some(&position) => groups[position].add(record),
            None => {
                positions.insert(key, groups.len());
                groups.push(AggregateResult::start(key, record));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::BrowserVersionKey;

    fn record(browser: &str, name: &str, kind: &str, version: &str, share: f64) -> BrowserMatch {
        BrowserMatch {
            key: BrowserVersionKey::new(browser, version).unwrap(),
            version: version.to_string(),
            browser_type: kind.to_string(),
            name: name.to_string(),
            browser_share: share,
            rank: VersionRank::parse(version),
        }
    }

    fn records() -> Vec<BrowserMatch> {
        vec![
            record("chrome", "Chrome", "desktop", "90", 0.5),
            record("chrome", "Chrome", "desktop", "89", 0.1),
            record("and_chr", "Chrome for Android", "mobile", "91", 0.2),
            record("safari", "Safari", "desktop", "TP", 0.0),
            record("safari", "Safari", "desktop", "15.2-15.3", 0.05),
        ]
    }

    #[test]
    fn test_group_by_name() {
        let groups = aggregate(&records(), GroupBy::Name);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Chrome", "Chrome for Android", "Safari"]);

        let chrome = &groups[0];
        assert_eq!(chrome.since, VersionRank::Numeric(89));
        assert_eq!(chrome.labels, vec!["90", "89"]);
        assert!((chrome.share - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_group_by_type() {
        let groups = aggregate(&records(), GroupBy::Type);
        assert_eq!(groups.len(), 2);

        let desktop = &groups[0];
        assert_eq!(desktop.name, "desktop");
        assert_eq!(desktop.len(), 4);
        assert_eq!(desktop.since, VersionRank::Numeric(15));
        assert!((desktop.share - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_non_numeric_never_wins_since() {
        let groups = aggregate(
            &[
                record("safari", "Safari", "desktop", "TP", 0.0),
                record("safari", "Safari", "desktop", "14", 0.1),
            ],
            GroupBy::Name,
        );
        assert_eq!(groups[0].since, VersionRank::Numeric(14));
    }

    #[test]
    fn test_all_non_numeric_is_unbounded() {
        let groups = aggregate(
            &[record("op_mini", "Opera Mini", "mobile", "all", 0.01)],
            GroupBy::Name,
        );
        assert_eq!(groups[0].since, VersionRank::Unbounded);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], GroupBy::Name).is_empty());
    }
}
