use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("GITHUB_REPOSITORY must be in owner/repo form, got {0:?}")]
    InvalidRepository(String),
}

#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("Property not found: {0}")]
    MissingKey(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Failed to read {path}: {source}")]
    ReadProperties {
        path: String,
        source: std::io::Error,
    },

    #[error("Properties error: {0}")]
    Properties(#[from] PropertiesError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}
