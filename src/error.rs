use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Shop not found: {name}")]
    ShopNotFound { name: String },

    #[error("API responded with status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// HTTP status carried by an `ApiResponse` error, so callers can decide
    /// whether a retry makes sense.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiResponse { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
