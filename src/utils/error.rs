use thiserror::Error;

/// Sentinel text the configuration store reports when no file was chosen.
pub const NO_PATH_GIVEN: &str = "No path given.";

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Service responded with status {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    #[error("Plan cannot be created yet, missing: {}", missing.join(", "))]
    NotReady { missing: Vec<&'static str> },

    #[error("Invalid building configuration: {message}")]
    InvalidBuilding { message: String },

    #[error("{}", NO_PATH_GIVEN)]
    NoPathGiven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// An action was triggered before its inputs were complete.
    Precondition,
    /// A collaborator (HTTP service, file store) failed.
    Collaborator,
    Configuration,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::NotReady { .. } => ErrorCategory::Precondition,
            PlannerError::InvalidSelection { .. } => ErrorCategory::Selection,
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlannerError::HttpError(_)
            | PlannerError::IoError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::ServiceError { .. }
            | PlannerError::InvalidBuilding { .. }
            | PlannerError::NoPathGiven => ErrorCategory::Collaborator,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::NoPathGiven => ErrorSeverity::Low,
            PlannerError::HttpError(_) | PlannerError::ServiceError { .. } => {
                ErrorSeverity::Medium
            }
            PlannerError::NotReady { .. }
            | PlannerError::InvalidSelection { .. }
            | PlannerError::InvalidBuilding { .. }
            | PlannerError::SerializationError(_) => ErrorSeverity::High,
            PlannerError::IoError(_)
            | PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// True for the "user closed the file picker" outcome, which is never shown.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PlannerError::NoPathGiven)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::HttpError(e) if e.is_decode() => {
                "The remote service answered with an unexpected payload.".to_string()
            }
            PlannerError::HttpError(_) => {
                "The remote service could not be reached.".to_string()
            }
            PlannerError::ServiceError { status, message } => {
                format!("The remote service rejected the request ({}): {}", status, message)
            }
            PlannerError::SerializationError(e) => format!("Invalid configuration: {}", e),
            PlannerError::InvalidBuilding { message } => {
                format!("Invalid configuration: {}", message)
            }
            PlannerError::NotReady { missing } => {
                format!("Please fill in: {}", missing.join(", "))
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Precondition => "Complete the highlighted fields and try again",
            ErrorCategory::Selection => "Pick one of the offered options",
            ErrorCategory::Configuration => "Check the settings file and command line arguments",
            ErrorCategory::Collaborator => match self {
                PlannerError::HttpError(_) | PlannerError::ServiceError { .. } => {
                    "Check the network connection and the service endpoint, then retry"
                }
                PlannerError::NoPathGiven => "Choose a file to continue",
                _ => "Check that the configuration file exists and is valid JSON",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_given_is_the_silent_sentinel() {
        let err = PlannerError::NoPathGiven;
        assert_eq!(err.to_string(), NO_PATH_GIVEN);
        assert!(err.is_cancellation());
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_not_ready_lists_missing_fields() {
        let err = PlannerError::NotReady {
            missing: vec!["title", "floor"],
        };
        assert_eq!(err.category(), ErrorCategory::Precondition);
        assert_eq!(err.user_friendly_message(), "Please fill in: title, floor");
        assert!(!err.is_cancellation());
    }

    #[test]
    fn test_service_error_is_collaborator_failure() {
        let err = PlannerError::ServiceError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Collaborator);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
