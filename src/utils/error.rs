use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}")]
    HttpStatusError { status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DirectoryError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => {
                "Could not reach the doctor directory service".to_string()
            }
            DirectoryError::ConfigValidationError { field, .. }
            | DirectoryError::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem with '{}': {}", field, self)
            }
            DirectoryError::IoError(e) => format!("File access failed: {}", e),
            DirectoryError::CsvError(_) | DirectoryError::SerializationError(_) => {
                "Could not format the doctor list".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => {
                "Check the --api-endpoint value and your network connection"
            }
            DirectoryError::ConfigValidationError { .. } => {
                "Check that the config file exists and is valid TOML"
            }
            DirectoryError::InvalidConfigValueError { .. } => {
                "Fix the offending option and run again"
            }
            DirectoryError::IoError(_) => "Check file paths and permissions",
            DirectoryError::CsvError(_) | DirectoryError::SerializationError(_) => {
                "Try a different --format"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => 1,
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => 2,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
