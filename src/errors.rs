use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote service operations
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Image loading and normalisation
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors raised while talking to the remote services
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status other than 200
    #[error("API error: {status}, {body}")]
    Status { status: u16, body: String },

    /// Body could not be interpreted as the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A fixed header could not be encoded
    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    /// A blocking worker (image normalisation) panicked or was cancelled
    #[error("Background task failed: {0}")]
    Worker(String),

    /// JSON (de)serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The image to analyse could not be read at all
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Feedback was requested without a prior analysis id
    #[error("No analysis ID available for feedback")]
    MissingAnalysisId,
}

/// Image errors
///
/// Decode/encode failures never surface here: they fall back to the raw file
/// bytes. Only an unreadable file is a hard failure.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Could not process image at {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for remote service operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for image normalisation
pub type ImageResult<T> = Result<T, ImageError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
