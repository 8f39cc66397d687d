use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Invalid model: {model:?}")]
    InvalidModelFormat { model: String },

    #[error("Power cannot be less than {min} hp (got {power})")]
    PowerTooLow { power: u32, min: u32 },

    #[error("Transport collection is absent")]
    NullCollection,

    #[error("Transport at index {index} is absent")]
    NullElement { index: usize },

    #[error("Malformed transport record: {line:?}")]
    RecordParseError { line: String },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal error: {message}")]
    TerminalError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, FleetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Contract,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FleetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FleetError::InvalidModelFormat { .. }
            | FleetError::PowerTooLow { .. }
            | FleetError::RecordParseError { .. } => ErrorCategory::Validation,
            FleetError::NullCollection | FleetError::NullElement { .. } => {
                ErrorCategory::Contract
            }
            FleetError::WriteError { .. }
            | FleetError::IoError(_)
            | FleetError::TerminalError { .. } => ErrorCategory::Io,
            FleetError::ConfigError { .. }
            | FleetError::ConfigValidationError { .. }
            | FleetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Rejected draws are part of normal generation.
            FleetError::InvalidModelFormat { .. } | FleetError::PowerTooLow { .. } => {
                ErrorSeverity::Low
            }
            FleetError::RecordParseError { .. } | FleetError::WriteError { .. } => {
                ErrorSeverity::Medium
            }
            FleetError::NullCollection
            | FleetError::NullElement { .. }
            | FleetError::ConfigError { .. }
            | FleetError::ConfigValidationError { .. }
            | FleetError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            FleetError::IoError(_) | FleetError::TerminalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Construction failures are retried by drawing a new transport.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FleetError::InvalidModelFormat { .. } | FleetError::PowerTooLow { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FleetError::InvalidModelFormat { model } => format!("Invalid model {}", model),
            FleetError::PowerTooLow { min, .. } => {
                format!("Power cannot be less than {} hp", min)
            }
            FleetError::WriteError { path, .. } => {
                format!("An error occurred while writing to {}", path.display())
            }
            FleetError::TerminalError { .. } => "Could not read from the terminal".to_string(),
            FleetError::ConfigError { message } => format!("Configuration problem: {}", message),
            FleetError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            FleetError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' has invalid value '{}': {}", field, value, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Models are 5 characters of A-Z or 0-9 and power is at least 20 hp"
            }
            ErrorCategory::Contract => "Pass a complete list of transports to the classifier",
            ErrorCategory::Io => {
                "Check that the output directory exists and is writable, or pass --output-dir"
            }
            ErrorCategory::Configuration => {
                "Check the configuration file and command line flags (see --help)"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_errors_are_retryable() {
        let model = FleetError::InvalidModelFormat {
            model: "abc".to_string(),
        };
        let power = FleetError::PowerTooLow { power: 12, min: 20 };
        assert!(model.is_retryable());
        assert!(power.is_retryable());
        assert_eq!(power.severity(), ErrorSeverity::Low);
        assert_eq!(power.user_friendly_message(), "Power cannot be less than 20 hp");
    }

    #[test]
    fn test_contract_errors_are_not_retryable() {
        let err = FleetError::NullElement { index: 3 };
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Contract);
        assert_eq!(err.to_string(), "Transport at index 3 is absent");
    }

    #[test]
    fn test_write_error_mentions_path() {
        let err = FleetError::WriteError {
            path: PathBuf::from("/tmp/Cars.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.user_friendly_message().contains("Cars.txt"));
    }
}
