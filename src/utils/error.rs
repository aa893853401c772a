use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
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

    #[error("Book '{title}' has neither an id nor a BRN")]
    MissingBookId { title: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::ConfigError { .. }
            | LookupError::ConfigValidationError { .. }
            | LookupError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LookupError::SerializationError(_)
            | LookupError::MissingBookId { .. }
            | LookupError::ValidationError { .. } => ErrorCategory::Input,
            LookupError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LookupError::ValidationError { .. } => ErrorSeverity::Medium,
            LookupError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error: Low 0, Medium 2, High 1, Critical 3.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags or the TOML configuration file"
            }
            ErrorCategory::Input => {
                "Check that the catalogue is valid JSON and every book has an id or a BRN"
            }
            ErrorCategory::System => "Check that the input and output paths exist and are writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::IoError(e) => format!("Could not read or write a file: {}", e),
            LookupError::SerializationError(e) => format!("The book data could not be parsed: {}", e),
            LookupError::ValidationError { message } => message.clone(),
            LookupError::MissingBookId { title } => {
                format!("The book \"{}\" cannot be rendered without an identifier", title)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
