use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearnError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data error: {message}")]
    DataError { message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Data,
    Model,
    Network,
    Storage,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LearnError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LearnError::ConfigError { .. }
            | LearnError::MissingConfigError { .. }
            | LearnError::InvalidConfigValueError { .. }
            | LearnError::TomlError(_) => ErrorCategory::Config,
            LearnError::CsvError(_)
            | LearnError::DataError { .. }
            | LearnError::ValidationError { .. } => ErrorCategory::Data,
            LearnError::ModelError { .. } | LearnError::ProcessingError { .. } => {
                ErrorCategory::Model
            }
            LearnError::HttpError(_) => ErrorCategory::Network,
            LearnError::IoError(_) | LearnError::ZipError(_) => ErrorCategory::Storage,
            LearnError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
            ErrorCategory::Config | ErrorCategory::Data | ErrorCategory::Model => {
                ErrorSeverity::High
            }
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LearnError::HttpError(_) => {
                "Check the dataset URL and network connectivity, then retry".to_string()
            }
            LearnError::CsvError(_) | LearnError::DataError { .. } => {
                "Check that the dataset has numeric feature columns and a trailing label column"
                    .to_string()
            }
            LearnError::IoError(_) | LearnError::ZipError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            LearnError::TomlError(_) => {
                "Check the configuration file against the documented TOML layout".to_string()
            }
            LearnError::ConfigError { .. }
            | LearnError::MissingConfigError { .. }
            | LearnError::InvalidConfigValueError { .. }
            | LearnError::ValidationError { .. } => {
                "Run with --help and correct the offending option".to_string()
            }
            LearnError::ModelError { .. } | LearnError::ProcessingError { .. } => {
                "Try a larger dataset or looser model limits (--max-depth, --min-samples-leaf)"
                    .to_string()
            }
            LearnError::SerializationError(_) => {
                "This is an internal report encoding problem, please file a bug".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Dataset problem: {}", self),
            ErrorCategory::Model => format!("Training problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Storage => format!("Storage problem: {}", self),
            ErrorCategory::Internal => format!("Internal problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LearnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = LearnError::InvalidConfigValueError {
            field: "test_size".to_string(),
            value: "1.5".to_string(),
            reason: "must be between 0 and 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_errors_are_storage_critical() {
        let err = LearnError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_messages_mention_the_field() {
        let err = LearnError::MissingConfigError {
            field: "output_path".to_string(),
        };
        assert!(err.to_string().contains("output_path"));
        assert!(!err.recovery_suggestion().is_empty());
    }
}
