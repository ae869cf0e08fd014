pub mod filter;
pub mod normalize;

pub use filter::{bounce_set, drop_bounced, FilterCounts};
pub use normalize::normalize_email;

use serde::Serialize;
use std::path::PathBuf;

/// Final result of a cleaning run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanOutcome {
    pub email_column: String,
    pub bounce_count: usize,
    pub rows_before: usize,
    pub rows_removed: usize,
    pub rows_after: usize,
    pub output_path: PathBuf,
}
