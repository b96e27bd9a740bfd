//! Error handling for the application

use thiserror::Error;

/// Pool-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("Invalid pool data: {0}")]
    InvalidPoolData(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),
}

/// Pool data source errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Pool source error: {0}")]
    SourceError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        AppError::Unknown(err.to_string())
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::SourceError(err.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::InvalidResponse(err.to_string())
        } else {
            SourceError::RequestFailed(err.to_string())
        }
    }
}
