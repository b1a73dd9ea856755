use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupingError {
    #[error("Failed to decode spreadsheet: {message}")]
    DecodeError { message: String },

    #[error("Not enough input data: {message}")]
    EmptyInputError { message: String },

    #[error("Invalid {field}: '{value}' ({reason})")]
    InvalidGroupCountError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No members loaded; upload a file before grouping")]
    NoDataError,

    #[error("No groups generated; run grouping before exporting")]
    NoGroupsError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("XLSX write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Grouping,
    Export,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GroupingError {
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInputError {
            message: message.into(),
        }
    }

    pub fn decode(message: impl std::fmt::Display) -> Self {
        Self::DecodeError {
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DecodeError { .. } | Self::EmptyInputError { .. } | Self::CsvError(_) => {
                ErrorCategory::Input
            }
            Self::InvalidGroupCountError { .. } | Self::NoDataError => ErrorCategory::Grouping,
            Self::NoGroupsError | Self::XlsxWriteError(_) | Self::SerializationError(_) => {
                ErrorCategory::Export
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者可直接重試的動作錯誤
            ErrorCategory::Input | ErrorCategory::Grouping => ErrorSeverity::Medium,
            ErrorCategory::Export | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 單行、給使用者看的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DecodeError { .. } => {
                "Could not parse the file. Make sure it is a valid spreadsheet.".to_string()
            }
            Self::EmptyInputError { message } => format!("Not enough data: {}", message),
            Self::InvalidGroupCountError { field, .. } => {
                format!("Please enter a valid {}.", field)
            }
            Self::NoDataError => "Please upload a spreadsheet first.".to_string(),
            Self::NoGroupsError => "Please generate groups first.".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::CsvError(e) => format!("Could not read CSV data: {}", e),
            Self::XlsxWriteError(e) => format!("Could not write the spreadsheet: {}", e),
            Self::SerializationError(e) => format!("Could not serialize the report: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DecodeError { .. } | Self::CsvError(_) => {
                "Re-save the file as .xlsx or .csv and try again"
            }
            Self::EmptyInputError { .. } => {
                "Keep the header in the first row and put names in the second column"
            }
            Self::InvalidGroupCountError { .. } => "Use a whole number of at least 1 (at most 10000 groups)",
            Self::NoDataError => "Load a file with --input before grouping",
            Self::NoGroupsError => "Generate groups before exporting",
            Self::IoError(_) => "Check that the path exists and is readable/writable",
            Self::XlsxWriteError(_) | Self::SerializationError(_) => {
                "Check the output directory and try again"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_errors_are_recoverable() {
        let errors = [
            GroupingError::decode("bad zip"),
            GroupingError::empty_input("no data rows"),
            GroupingError::NoDataError,
            GroupingError::InvalidGroupCountError {
                field: "group count".to_string(),
                value: "abc".to_string(),
                reason: "not a number".to_string(),
            },
        ];

        for error in errors {
            assert_eq!(error.severity(), ErrorSeverity::Medium, "{}", error);
        }
        assert_eq!(GroupingError::NoGroupsError.category(), ErrorCategory::Export);
    }

    #[test]
    fn test_user_friendly_message_is_single_line() {
        let error = GroupingError::InvalidGroupCountError {
            field: "group size".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        };
        let message = error.user_friendly_message();
        assert_eq!(message, "Please enter a valid group size.");
        assert!(!message.contains('\n'));
    }
}
