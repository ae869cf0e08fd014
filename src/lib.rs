pub mod cli;
pub mod clean;
pub mod decode;
pub mod error;
pub mod extract;
pub mod table;
pub mod ui;

// Public API re-exports
pub use cli::{CleanCli, ExtractCli, OutputFormat, DEFAULT_BOUNCE_TABLE};
pub use error::{MailscrubError, Result, UserFriendlyError};

// Core functionality re-exports
pub use clean::{CleanOutcome, FilterCounts};
pub use extract::{
    AddressExtractor, BounceHarvester, CorpusSource, ExtractOutcome, ScanOutcome, ScanProgress,
};
pub use table::{Table, TableFormat};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// Column label of the extractor's single-column output table.
pub const OUTPUT_EMAIL_COLUMN: &str = "Email";

/// Pipeline for harvesting bounced addresses out of a mail corpus.
pub struct BounceExtractor {
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl BounceExtractor {
    pub fn new(output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(!quiet),
        }
    }

    /// Create a BounceExtractor instance from CLI arguments
    pub fn from_cli(cli: &ExtractCli) -> Self {
        Self::new(
            output_mode_for(&cli.output_format),
            cli.verbosity_level(),
            cli.quiet,
        )
    }

    /// Run the full extraction pipeline: resolve the corpus, scan every
    /// file under it, and write the sorted address list. No file is
    /// written when nothing was found.
    pub fn extract_bounces(&self, path: &Path, output: &Path) -> Result<ExtractOutcome> {
        self.output_formatter
            .start_operation("Extracting bounced addresses");

        let source = self.open_corpus(path)?;

        let harvester = BounceHarvester::new();
        let files = harvester.collect_files(source.root());
        if files.is_empty() {
            self.output_formatter
                .warning("No files found under the corpus root");
        } else {
            self.output_formatter
                .info(&format!("Found {} files to scan", files.len()));
        }

        let outcome = self.scan_corpus(&harvester, &files);

        if outcome.addresses.is_empty() {
            return Ok(ExtractOutcome {
                addresses: Vec::new(),
                files_scanned: outcome.progress.files_scanned,
                output_path: None,
            });
        }

        let addresses = outcome.sorted_addresses();
        let table = Table::single_column(OUTPUT_EMAIL_COLUMN, addresses.iter().cloned());
        table::write_table(&table, output)?;
        self.output_formatter.success(&format!(
            "Saved {} addresses to {}",
            addresses.len(),
            output.display()
        ));

        Ok(ExtractOutcome {
            addresses,
            files_scanned: outcome.progress.files_scanned,
            output_path: Some(canonical_or_given(output)),
        })
    }

    /// Resolve the corpus root with a spinner while zip archives extract.
    fn open_corpus(&self, path: &Path) -> Result<CorpusSource> {
        let spinner = self.progress_manager.create_spinner("Resolving corpus");
        let source = CorpusSource::open(path);
        spinner.finish_and_clear();

        let source = source?;
        if source.is_archive() {
            self.output_formatter.info(&format!(
                "Extracted archive {} to a scratch directory",
                path.display()
            ));
        } else {
            self.output_formatter
                .info(&format!("Scanning directory {}", path.display()));
        }
        self.output_formatter.debug(&format!(
            "Corpus root resolved to {}",
            source.root().display()
        ));

        Ok(source)
    }

    /// Scan files with progress tracking.
    fn scan_corpus(&self, harvester: &BounceHarvester, files: &[PathBuf]) -> ScanOutcome {
        let file_progress = self.progress_manager.create_file_progress(files.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ScanProgress| {
                ui::progress::update_scan_progress(&pb, progress);
            }
        };

        let outcome = harvester.scan_files(files, Some(&progress_callback));

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!(
                "Scanned {} files, {} unique addresses",
                outcome.progress.files_scanned,
                outcome.addresses.len()
            ),
            outcome.progress.elapsed(),
        );

        outcome
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &MailscrubError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Pipeline for subtracting bounced addresses from a contact table.
pub struct ContactCleaner {
    output_formatter: OutputFormatter,
}

impl ContactCleaner {
    pub fn new(output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    /// Create a ContactCleaner instance from CLI arguments
    pub fn from_cli(cli: &CleanCli) -> Self {
        Self::new(
            output_mode_for(&cli.output_format),
            cli.verbosity_level(),
            cli.quiet,
        )
    }

    /// Run the full cleaning pipeline. Both tables load fully before any
    /// row is dropped; the output is written only after filtering ends.
    pub fn clean_contacts(
        &self,
        contacts_path: &Path,
        bounces_path: &Path,
        email_column: Option<&str>,
        output: &Path,
    ) -> Result<CleanOutcome> {
        self.output_formatter.start_operation("Cleaning contact list");

        if !contacts_path.exists() {
            return Err(MailscrubError::InputNotFound {
                path: contacts_path.display().to_string(),
            });
        }
        if !bounces_path.exists() {
            return Err(MailscrubError::InputNotFound {
                path: bounces_path.display().to_string(),
            });
        }

        let mut contacts = table::read_table(contacts_path)?;
        self.output_formatter.info(&format!(
            "Loaded {} contact rows from {}",
            contacts.row_count(),
            contacts_path.display()
        ));
        self.output_formatter
            .debug(&format!("Contact columns: {}", contacts.columns.join(", ")));

        let column_index = resolve_email_column(&contacts, email_column)?;
        let column_name = contacts.columns[column_index].clone();
        self.output_formatter
            .info(&format!("Using email column: {}", column_name));

        let bounces = table::read_table(bounces_path)?;
        let bounce_column =
            table::bounce_email_column(&bounces.columns).ok_or_else(|| MailscrubError::TableRead {
                path: bounces_path.display().to_string(),
                message: "table has no columns".to_string(),
            })?;
        let bounced = clean::bounce_set(&bounces, bounce_column);
        if bounced.is_empty() {
            self.output_formatter
                .warning("Bounce table contains no addresses; nothing will be removed");
        } else {
            self.output_formatter
                .info(&format!("Loaded {} bounced addresses", bounced.len()));
        }

        let counts = clean::drop_bounced(&mut contacts, column_index, &bounced);

        table::write_table(&contacts, output)?;
        self.output_formatter.success(&format!(
            "Cleaned roster written to {}",
            output.display()
        ));

        Ok(CleanOutcome {
            email_column: column_name,
            bounce_count: bounced.len(),
            rows_before: counts.rows_before,
            rows_removed: counts.rows_removed,
            rows_after: counts.rows_after,
            output_path: canonical_or_given(output),
        })
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &MailscrubError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Explicit column override, or detection when none was given.
fn resolve_email_column(contacts: &Table, requested: Option<&str>) -> Result<usize> {
    match requested {
        Some(name) => {
            table::resolve_column(&contacts.columns, name).ok_or_else(|| {
                MailscrubError::ColumnNotFound {
                    column: name.to_string(),
                    available: contacts.columns.clone(),
                }
            })
        }
        None => table::detect_email_column(&contacts.columns).ok_or_else(|| {
            MailscrubError::EmailColumnUndetected {
                available: contacts.columns.clone(),
            }
        }),
    }
}

fn output_mode_for(format: &OutputFormat) -> OutputMode {
    match format {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Json,
        OutputFormat::Plain => OutputMode::Plain,
    }
}

fn canonical_or_given(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
