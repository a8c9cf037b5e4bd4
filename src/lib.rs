// Line extraction and the keyed account store
pub mod patterns;
pub mod record;
pub mod aggregate;

// Directory runs, reports and notifications
pub mod processor;
pub mod report;
pub mod notify;

pub mod config;
pub mod constants;
pub mod error;
pub mod utils;

// Re-export main types for convenience
pub use aggregate::{Aggregator, IngestStats, MergeOutcome, SharedAggregator, StatsSnapshot};
pub use config::Config;
pub use error::{LoadError, SkippedFile};
pub use processor::{RunOutcome, RunStats, SortProcessor};
pub use record::{extract, Flag, Record};
