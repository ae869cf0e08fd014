use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailscrubError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input path not found: {path}")]
    InputNotFound { path: String },

    #[error("Input is neither a directory nor a zip archive: {path}")]
    InvalidInput { path: String },

    #[error("Failed to extract archive: {path}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to read table {path}: {message}")]
    TableRead { path: String, message: String },

    #[error("Failed to write table {path}: {message}")]
    TableWrite { path: String, message: String },

    #[error("Column not found: {column}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("Could not detect an email column")]
    EmailColumnUndetected { available: Vec<String> },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for MailscrubError {
    fn user_message(&self) -> String {
        match self {
            MailscrubError::InputNotFound { path } => {
                format!("Input path not found: {}", path)
            }
            MailscrubError::InvalidInput { path } => {
                format!("Input is neither a directory nor a zip archive: {}", path)
            }
            MailscrubError::Archive { path, .. } => {
                format!("Failed to extract archive: {}", path)
            }
            MailscrubError::TableRead { path, message } => {
                format!("Failed to read table {}: {}", path, message)
            }
            MailscrubError::TableWrite { path, message } => {
                format!("Failed to write table {}: {}", path, message)
            }
            MailscrubError::ColumnNotFound { column, .. } => {
                format!("Column not found: {}", column)
            }
            MailscrubError::EmailColumnUndetected { .. } => {
                "Could not detect an email column in the contact table".to_string()
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            MailscrubError::InputNotFound { .. } => Some(
                "Check that the path exists and is spelled correctly.".to_string()
            ),
            MailscrubError::InvalidInput { .. } => Some(
                "Pass a directory containing raw bounce messages, or a .zip archive of them.".to_string()
            ),
            MailscrubError::Archive { .. } => Some(
                "Check that the file is a valid zip archive and is not truncated.".to_string()
            ),
            MailscrubError::TableRead { .. } => Some(
                "Supported formats are .xlsx, .xls and comma-separated text; any other extension is read as CSV.".to_string()
            ),
            MailscrubError::ColumnNotFound { available, .. } => Some(format!(
                "Available columns: {}. Matching is case-insensitive; check the name passed to --email-column.",
                format_columns(available)
            )),
            MailscrubError::EmailColumnUndetected { available } => Some(format!(
                "Available columns: {}. Re-run with --email-column to name the one that holds the addresses.",
                format_columns(available)
            )),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MailscrubError>;

fn format_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        "(none)".to_string()
    } else {
        columns.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = MailscrubError::InvalidInput {
            path: "notes.txt".to_string(),
        };
        assert!(error.user_message().contains("neither a directory"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_undetected_column_lists_available() {
        let error = MailscrubError::EmailColumnUndetected {
            available: vec!["Nombre".to_string(), "Ciudad".to_string()],
        };
        let suggestion = error.suggestion().unwrap();
        assert!(suggestion.contains("Nombre, Ciudad"));
        assert!(suggestion.contains("--email-column"));
    }

    #[test]
    fn test_format_columns() {
        assert_eq!(format_columns(&[]), "(none)");
        assert_eq!(
            format_columns(&["Email".to_string(), "Name".to_string()]),
            "Email, Name"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = MailscrubError::from(io_error);
        assert!(matches!(error, MailscrubError::Io(_)));
    }
}
