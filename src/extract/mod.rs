pub mod harvest;
pub mod pattern;

pub use harvest::{BounceHarvester, CorpusSource, ScanOutcome, ScanProgress};
pub use pattern::AddressExtractor;

use serde::Serialize;
use std::path::PathBuf;

/// Final result of an extraction run. `output_path` is `None` when no
/// addresses were found and therefore no file was written.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutcome {
    pub addresses: Vec<String>,
    pub files_scanned: usize,
    pub output_path: Option<PathBuf>,
}
