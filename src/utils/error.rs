use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Version {version} not found")]
    VersionNotFound { version: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid resource name: {name}")]
    InvalidPathError { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
