use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Input error in {path}: {message}")]
    InputError { path: String, message: String },

    #[error("Report sink '{sink}' failed: {message}")]
    ReportError { sink: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AnalyzerError::CsvError(_) | AnalyzerError::InputError { .. } => ErrorCategory::Input,
            AnalyzerError::ReportError { .. } | AnalyzerError::SerializationError(_) => {
                ErrorCategory::Output
            }
            AnalyzerError::IoError(_) => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A sink failing leaves the other outputs intact.
            AnalyzerError::ReportError { .. } => ErrorSeverity::Medium,
            AnalyzerError::SerializationError(_) => ErrorSeverity::Medium,
            AnalyzerError::CsvError(_) | AnalyzerError::InputError { .. } => ErrorSeverity::High,
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ConfigValidationError { .. } => ErrorSeverity::High,
            AnalyzerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnalyzerError::CsvError(_) => {
                "Check that the input is a delimited text file and that --delimiter matches it"
                    .to_string()
            }
            AnalyzerError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            AnalyzerError::SerializationError(_) => {
                "Try a different output format (text or csv)".to_string()
            }
            AnalyzerError::ConfigError { .. } | AnalyzerError::ConfigValidationError { .. } => {
                "Review the configuration file for syntax errors".to_string()
            }
            AnalyzerError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it on the command line", field)
            }
            AnalyzerError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            AnalyzerError::InputError { path, .. } => {
                format!("Inspect '{}' for a header row and 7 columns per listing", path)
            }
            AnalyzerError::ReportError { sink, .. } => {
                format!("Disable the '{}' output or fix its destination", sink)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read guitar listings: {}", self),
            ErrorCategory::Output => format!("Could not write the report: {}", self),
            ErrorCategory::Processing => format!("Analysis failed: {}", self),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = AnalyzerError::InvalidConfigValueError {
            field: "report.top_n".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("report.top_n"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = AnalyzerError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "listings.csv",
        ));
        assert_eq!(err.category(), ErrorCategory::Processing);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().starts_with("Analysis failed"));
    }

    #[test]
    fn test_undecodable_input_is_input_error() {
        let err = AnalyzerError::InputError {
            path: "listings.csv".to_string(),
            message: "none of the 3 rows could be decoded".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Could not read guitar listings"));
        assert!(err.recovery_suggestion().contains("listings.csv"));
    }

    #[test]
    fn test_report_error_message_names_sink() {
        let err = AnalyzerError::ReportError {
            sink: "file".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Report sink 'file' failed: disk full");
        assert_eq!(err.exit_code(), 2);
    }
}
