use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanApiError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized. Missing or invalid token.")]
    Unauthorized,

    #[error("Unauthorized. Invalid token.")]
    Forbidden,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScanApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Message surfaced to API clients in the `error` field.
    pub fn client_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::NotFound { entity, .. } => format!("{entity} not found"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanApiError>;
