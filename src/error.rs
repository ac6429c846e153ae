//! Error types for api-pager
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Code reported by [`Error::kind`] for a response with a non-JSON content type
pub const ERROR_UNKNOWN_CONTENT_TYPE: &str = "UNKNOWN_CONTENT_TYPE";

/// Code reported by [`Error::kind`] for a JSON body that is not an envelope
pub const ERROR_UNKNOWN_RESPONSE_FORMAT: &str = "UNKNOWN_RESPONSE_FORMAT";

/// Code reported by [`Error::kind`] for a page rejected by a guard or shape check
pub const ERROR_FATAL_API_FORMAT: &str = "FATAL_API_FORMAT";

/// The main error type for api-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Envelope Errors
    // ============================================================================
    #[error("Unknown content type: {content_type}")]
    UnknownContentType { content_type: String },

    #[error("Unknown response format: missing envelope metadata")]
    UnknownResponseFormat,

    #[error("API request was successful, but the response format was unrecognized.\n{details}")]
    FatalApiFormat { details: String },

    #[error("API request was successful, but the response output format was that of an error.\n{details}")]
    ErrorEnvelope { details: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Download failed: {message}")]
    Download { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an unknown content type error
    pub fn unknown_content_type(content_type: impl Into<String>) -> Self {
        Self::UnknownContentType {
            content_type: content_type.into(),
        }
    }

    /// Create a fatal API format error from rendered request/response details
    pub fn fatal_api_format(details: impl Into<String>) -> Self {
        Self::FatalApiFormat {
            details: details.into(),
        }
    }

    /// Create an error-envelope error from rendered request/response details
    pub fn error_envelope(details: impl Into<String>) -> Self {
        Self::ErrorEnvelope {
            details: details.into(),
        }
    }

    /// Create a download error
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download {
            message: message.into(),
        }
    }

    /// Stable code identifying the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownContentType { .. } => ERROR_UNKNOWN_CONTENT_TYPE,
            Error::UnknownResponseFormat => ERROR_UNKNOWN_RESPONSE_FORMAT,
            Error::FatalApiFormat { .. } => ERROR_FATAL_API_FORMAT,
            Error::ErrorEnvelope { .. } => "ERROR_ENVELOPE",
            Error::Config { .. } | Error::InvalidConfigValue { .. } => "CONFIG",
            Error::YamlParse(_) | Error::JsonParse(_) => "PARSE",
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } => "TRANSPORT",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::Io(_) | Error::FileNotFound { .. } | Error::Download { .. } => "IO",
            Error::Other(_) => "OTHER",
        }
    }

    /// Check if this error came from the transport below the paginator
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for api-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
