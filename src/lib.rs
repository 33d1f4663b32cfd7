//! # browserstats - Browser feature support statistics
//!
//! Computes which browser versions support a set of web platform features and
//! how much global usage share they represent, from a caniuse-style dataset.
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **agents**: Browsers, their tracked versions and usage shares
//! - **features**: Per-feature support matrices and the feature registry
//! - **engine**: Intersection queries and grouped aggregation
//! - **loader**: Dataset decoding, agent-type filtering, file/HTTP loading
//! - **utils**: Shared utilities and error types
//!
//! ```no_run
//! use browserstats::{DataSource, DatasetLoader, SupportState};
//!
//! let source: DataSource = "data.json".parse()?;
//! let engine = DatasetLoader::default().load(&source)?;
//! for browser in engine.browsers_by_feature(&["css-grid"], &[SupportState::Supported])? {
//!     println!("{} since {} ({:.2}%)", browser.name, browser.since, browser.share);
//! }
//! # Ok::<(), browserstats::StatsError>(())
//! ```

pub mod agents;
pub mod engine;
pub mod features;
pub mod loader;
pub mod utils;

// Re-export main types for convenience
pub use agents::{Agent, AgentIndex, BrowserVersionKey, VersionRank};
pub use engine::{AggregateResult, BrowserMatch, GroupBy, StatsEngine};
pub use features::{Feature, FeatureRegistry, SupportState};
pub use loader::{AgentFilter, DataSource, Dataset, DatasetLoader, LoaderConfig};
pub use utils::error::{LoadError, Result, StatsError};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "browserstats";
