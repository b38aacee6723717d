//! Error handling for CollectorOuphe
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for CollectorOuphe application
#[derive(Error, Debug)]
pub enum OupheError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Collector API error: {0}")]
    Collector(#[from] CollectorError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Unknown conversation label: {0}")]
    UnknownLabel(String),
}

/// Collector service specific errors
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Collector request failed: {0}")]
    RequestFailed(String),

    #[error("Collector request timed out")]
    Timeout,

    #[error("Collector service unavailable")]
    ServiceUnavailable,

    #[error("Collector returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid collector response: {0}")]
    InvalidResponse(String),

    #[error("Authorization token is missing")]
    MissingToken,
}

/// Result type alias for CollectorOuphe operations
pub type Result<T> = std::result::Result<T, OupheError>;

/// Result type alias for collector operations
pub type CollectorResult<T> = std::result::Result<T, CollectorError>;

impl CollectorError {
    /// Map a transport failure from reqwest onto the collector taxonomy
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CollectorError::Timeout
        } else if e.is_connect() {
            CollectorError::ServiceUnavailable
        } else {
            CollectorError::RequestFailed(e.to_string())
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CollectorError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl OupheError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            OupheError::Telegram(_) => true,
            OupheError::Collector(CollectorError::MissingToken) => false,
            OupheError::Collector(_) => true,
            OupheError::Config(_) => false,
            OupheError::Redis(_) => true,
            OupheError::Http(_) => true,
            OupheError::UrlParse(_) => false,
            OupheError::UnknownLabel(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OupheError::Config(_) => ErrorSeverity::Critical,
            OupheError::UrlParse(_) => ErrorSeverity::Critical,
            OupheError::UnknownLabel(_) => ErrorSeverity::Warning,
            OupheError::Collector(CollectorError::Status { status, .. }) if *status < 500 => ErrorSeverity::Info,
            OupheError::Collector(CollectorError::ServiceUnavailable | CollectorError::Timeout) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
