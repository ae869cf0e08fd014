use crate::decode::read_text_file;
use crate::error::{MailscrubError, Result};
use crate::extract::pattern::AddressExtractor;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Corpus root resolved to a walkable directory.
pub struct CorpusSource {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl CorpusSource {
    /// Resolve the corpus root. Directories are walked in place; zip
    /// archives are extracted into a scratch directory that is removed
    /// when the source is dropped.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MailscrubError::InputNotFound {
                path: path.display().to_string(),
            });
        }

        if path.is_dir() {
            return Ok(Self {
                root: path.to_path_buf(),
                scratch: None,
            });
        }

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(|_| MailscrubError::InvalidInput {
            path: path.display().to_string(),
        })?;

        let scratch = TempDir::new()?;
        archive
            .extract(scratch.path())
            .map_err(|source| MailscrubError::Archive {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            root: scratch.path().to_path_buf(),
            scratch: Some(scratch),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_archive(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Counters reported to the progress callback once per scanned file.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub files_scanned: usize,
    pub addresses_found: usize,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            addresses_found: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub addresses: BTreeSet<String>,
    pub progress: ScanProgress,
}

impl ScanOutcome {
    /// Unique addresses in ascending order.
    pub fn sorted_addresses(&self) -> Vec<String> {
        self.addresses.iter().cloned().collect()
    }
}

pub struct BounceHarvester {
    extractor: AddressExtractor,
}

impl BounceHarvester {
    pub fn new() -> Self {
        Self {
            extractor: AddressExtractor::new(),
        }
    }

    /// Every regular file under the root, sorted for a deterministic scan
    /// order. Symlinks are not followed; unreadable entries are skipped.
    pub fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    /// Scan the files and accumulate normalized addresses. Files that
    /// cannot be read are skipped; decoding itself never fails.
    pub fn scan_files(
        &self,
        files: &[PathBuf],
        progress_callback: Option<&dyn Fn(&ScanProgress)>,
    ) -> ScanOutcome {
        let mut progress = ScanProgress::new();
        let mut addresses = BTreeSet::new();

        for path in files {
            progress.current_file = Some(path.display().to_string());

            if let Some(text) = read_text_file(path) {
                for address in self.extractor.extract_addresses(&text) {
                    addresses.insert(address.trim().to_lowercase());
                }
            }

            progress.files_scanned += 1;
            progress.addresses_found = addresses.len();

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        progress.current_file = None;
        ScanOutcome {
            addresses,
            progress,
        }
    }
}

impl Default for BounceHarvester {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn sample_zip(dir: &Path) -> PathBuf {
        let path = dir.join("corpus.zip");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        writer.start_file("bounce1.txt", options).unwrap();
        writer
            .write_all(b"Final-Recipient: rfc822; zipped@example.com\n")
            .unwrap();
        writer.add_directory("nested", options).unwrap();
        writer.start_file("nested/bounce2.txt", options).unwrap();
        writer
            .write_all(b"Final-Recipient: rfc822; deep@example.com\n")
            .unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_open_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = CorpusSource::open(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(MailscrubError::InputNotFound { .. })));
    }

    #[test]
    fn test_open_directory_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let source = CorpusSource::open(temp_dir.path()).unwrap();
        assert_eq!(source.root(), temp_dir.path());
        assert!(!source.is_archive());
    }

    #[test]
    fn test_open_plain_file_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "notes.txt", "not an archive");
        let result = CorpusSource::open(&path);
        assert!(matches!(result, Err(MailscrubError::InvalidInput { .. })));
    }

    #[test]
    fn test_open_zip_extracts_to_scratch() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = sample_zip(temp_dir.path());

        let scratch_root;
        {
            let source = CorpusSource::open(&zip_path).unwrap();
            scratch_root = source.root().to_path_buf();
            assert!(source.is_archive());
            assert!(scratch_root.join("bounce1.txt").exists());
            assert!(scratch_root.join("nested/bounce2.txt").exists());
        }

        // Scratch directory is gone once the source is dropped.
        assert!(!scratch_root.exists());
    }

    #[test]
    fn test_collect_files_recurses_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        write_file(temp_dir.path(), "b.txt", "");
        write_file(temp_dir.path(), "a.txt", "");
        write_file(&temp_dir.path().join("sub"), "c.txt", "");

        let harvester = BounceHarvester::new();
        let files = harvester.collect_files(temp_dir.path());

        assert_eq!(files.len(), 3);
        assert!(files.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_scan_deduplicates_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(
            temp_dir.path(),
            "a.txt",
            "Final-Recipient: rfc822; User@Example.com\n",
        );
        let b = write_file(
            temp_dir.path(),
            "b.txt",
            "Final-Recipient: rfc822; user@example.COM\nFinal-Recipient: rfc822; other@site.org\n",
        );

        let harvester = BounceHarvester::new();
        let outcome = harvester.scan_files(&[a, b], None);

        assert_eq!(outcome.progress.files_scanned, 2);
        assert_eq!(
            outcome.sorted_addresses(),
            vec!["other@site.org", "user@example.com"]
        );
    }

    #[test]
    fn test_scan_skips_unreadable_files() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.txt");

        let harvester = BounceHarvester::new();
        let outcome = harvester.scan_files(&[missing], None);

        assert_eq!(outcome.progress.files_scanned, 1);
        assert!(outcome.addresses.is_empty());
    }

    #[test]
    fn test_scan_reports_progress_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(temp_dir.path(), "a.txt", "nothing here");
        let b = write_file(
            temp_dir.path(),
            "b.txt",
            "Final-Recipient: rfc822; one@example.com\n",
        );

        let seen = std::cell::RefCell::new(Vec::new());
        let callback = |progress: &ScanProgress| {
            seen.borrow_mut()
                .push((progress.files_scanned, progress.addresses_found));
        };

        let harvester = BounceHarvester::new();
        harvester.scan_files(&[a, b], Some(&callback));

        assert_eq!(*seen.borrow(), vec![(1, 0), (2, 1)]);
    }
}
