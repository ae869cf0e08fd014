use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Default artifact shared by both binaries: the extractor writes it,
/// the cleaner reads it when no bounce table is named.
pub const DEFAULT_BOUNCE_TABLE: &str = "correos_rebotados.xlsx";

#[derive(Parser, Debug)]
#[command(name = "extract-bounces")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract bounced email addresses from raw mail files")]
#[command(
    long_about = "extract-bounces walks a directory (or a zip archive) of raw bounce \
                       messages, collects every address reported after a Final-Recipient \
                       header, and writes the unique sorted list to a spreadsheet or CSV."
)]
#[command(before_help = "📬 Mailscrub - Bounce Extraction Tool")]
#[command(after_help = "EXAMPLES:\n  \
    extract-bounces\n  \
    extract-bounces rebotes/ --output rebotados.csv\n  \
    extract-bounces correos.zip -o rebotados.xlsx --verbose\n\n\
    For more information, visit: https://github.com/user/mailscrub")]
pub struct ExtractCli {
    /// Directory of raw bounce messages, or a zip archive of them
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output file for the harvested addresses (.xlsx, .xls or CSV)
    #[arg(short, long, default_value = DEFAULT_BOUNCE_TABLE)]
    pub output: PathBuf,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(name = "clean-contacts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Remove bounced addresses from a contact table")]
#[command(
    long_about = "clean-contacts loads a contact table and a table of bounced addresses, \
                       drops every contact whose email appears in the bounce list, and \
                       writes the cleaned roster next to the original."
)]
#[command(before_help = "🧹 Mailscrub - Contact Cleaning Tool")]
#[command(after_help = "EXAMPLES:\n  \
    clean-contacts contactos.xlsx\n  \
    clean-contacts contactos.csv rebotados.csv -o depurados.csv\n  \
    clean-contacts contactos.xlsx --email-column \"Correo Electrónico\"\n\n\
    For more information, visit: https://github.com/user/mailscrub")]
#[command(arg_required_else_help = true)]
pub struct CleanCli {
    /// Contact table to clean (.xlsx, .xls or CSV)
    pub contacts: PathBuf,

    /// Table of bounced addresses to remove
    #[arg(default_value = DEFAULT_BOUNCE_TABLE)]
    pub bounces: PathBuf,

    /// Name of the email column in the contact table (detected when omitted)
    #[arg(short = 'c', long)]
    pub email_column: Option<String>,

    /// Output file for the cleaned table (defaults to <contacts>_limpios.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl ExtractCli {
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

impl CleanCli {
    /// Output path, defaulting to the contact file with `_limpios` inserted
    /// before its extension.
    pub fn resolved_output(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_clean_output(&self.contacts),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn default_clean_output(contacts: &Path) -> PathBuf {
    let stem = contacts
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contactos");

    let name = match contacts.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_limpios.{}", stem, ext),
        None => format!("{}_limpios", stem),
    };

    contacts.with_file_name(name)
}
