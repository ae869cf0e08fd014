use crate::clean::CleanOutcome;
use crate::error::{MailscrubError, UserFriendlyError};
use crate::extract::ExtractOutcome;
use console::{style, Emoji, Term};
use serde::Serialize;
use serde_json;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    #[allow(dead_code)]
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &MailscrubError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    println!();
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    println!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_extract_summary(&self, outcome: &ExtractOutcome) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_extract_summary(outcome),
            OutputMode::Json => self.print_json_summary(outcome),
            OutputMode::Plain => self.print_plain_extract_summary(outcome),
        }
    }

    pub fn print_clean_summary(&self, outcome: &CleanOutcome) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_clean_summary(outcome),
            OutputMode::Json => self.print_json_summary(outcome),
            OutputMode::Plain => self.print_plain_clean_summary(outcome),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_extract_summary(&self, outcome: &ExtractOutcome) {
        println!();
        self.print_separator();

        if outcome.addresses.is_empty() {
            if self.use_colors {
                println!(
                    "{}{}",
                    WARNING,
                    style("No bounced addresses found; no file was written.")
                        .yellow()
                        .bold()
                );
            } else {
                println!("! No bounced addresses found; no file was written.");
            }
            println!();
            println!("  Files scanned:    {}", self.styled_count(outcome.files_scanned));
            self.print_separator();
            return;
        }

        if self.use_colors {
            println!(
                "{} {}",
                style("Bounce extraction completed!").green().bold(),
                CHECKMARK
            );
        } else {
            println!("✓ Bounce extraction completed!");
        }

        println!();
        println!("  Files scanned:    {}", self.styled_count(outcome.files_scanned));
        println!(
            "  Unique addresses: {}",
            self.styled_count(outcome.addresses.len())
        );
        if let Some(path) = &outcome.output_path {
            println!(
                "  Saved to:         {}",
                self.styled_text(&path.display().to_string())
            );
        }

        self.print_separator();
    }

    /// Serialize an outcome struct directly, tagged and timestamped so the
    /// summary object is distinguishable from message events on the same
    /// stream.
    fn print_json_summary<T: Serialize>(&self, outcome: &T) {
        #[derive(Serialize)]
        struct Summary<'a, T: Serialize> {
            #[serde(rename = "type")]
            kind: &'static str,
            #[serde(flatten)]
            outcome: &'a T,
            timestamp: String,
        }

        let summary = Summary {
            kind: "summary",
            outcome,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_plain_extract_summary(&self, outcome: &ExtractOutcome) {
        if outcome.addresses.is_empty() {
            println!("COMPLETED: No bounced addresses found");
            println!("Files scanned: {}", outcome.files_scanned);
            println!("No output file written");
            return;
        }

        println!("COMPLETED: Bounce extraction");
        println!("Files scanned: {}", outcome.files_scanned);
        println!("Unique addresses: {}", outcome.addresses.len());
        if let Some(path) = &outcome.output_path {
            println!("Output: {}", path.display());
        }
    }

    fn print_human_clean_summary(&self, outcome: &CleanOutcome) {
        println!();
        self.print_separator();

        if self.use_colors {
            println!(
                "{} {}",
                style("Contact cleaning completed!").green().bold(),
                CHECKMARK
            );
        } else {
            println!("✓ Contact cleaning completed!");
        }

        println!();
        println!("  Email column:    {}", self.styled_text(&outcome.email_column));
        println!("  Bounced loaded:  {}", self.styled_count(outcome.bounce_count));
        println!("  Contacts before: {}", self.styled_count(outcome.rows_before));
        println!("  Removed:         {}", self.styled_count(outcome.rows_removed));
        println!("  Remaining:       {}", self.styled_count(outcome.rows_after));
        println!(
            "  Saved to:        {}",
            self.styled_text(&outcome.output_path.display().to_string())
        );

        self.print_separator();
    }

    fn print_plain_clean_summary(&self, outcome: &CleanOutcome) {
        println!("COMPLETED: Contact cleaning");
        println!("Email column: {}", outcome.email_column);
        println!("Bounced addresses: {}", outcome.bounce_count);
        println!("Rows before: {}", outcome.rows_before);
        println!("Rows removed: {}", outcome.rows_removed);
        println!("Rows after: {}", outcome.rows_after);
        println!("Output: {}", outcome.output_path.display());
    }

    fn styled_count(&self, value: usize) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn styled_text(&self, value: &str) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
        assert_eq!(formatter.mode, OutputMode::Human);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.quiet);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(formatter.should_show_message(2));
        assert!(!formatter.should_show_message(3));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
        assert!(!quiet_formatter.should_show_message(1));
        assert!(!quiet_formatter.should_show_message(2));
    }

    #[test]
    fn test_summaries_print_without_panicking() {
        let extract_outcome = ExtractOutcome {
            addresses: vec!["a@x.com".to_string()],
            files_scanned: 3,
            output_path: Some(PathBuf::from("out.xlsx")),
        };
        let clean_outcome = CleanOutcome {
            email_column: "Email".to_string(),
            bounce_count: 2,
            rows_before: 5,
            rows_removed: 1,
            rows_after: 4,
            output_path: PathBuf::from("contactos_limpios.xlsx"),
        };

        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        formatter.print_extract_summary(&extract_outcome);
        formatter.print_extract_summary(&ExtractOutcome {
            addresses: Vec::new(),
            files_scanned: 0,
            output_path: None,
        });
        formatter.print_clean_summary(&clean_outcome);

        let json_formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        json_formatter.print_extract_summary(&extract_outcome);
        json_formatter.print_clean_summary(&clean_outcome);
    }
}
