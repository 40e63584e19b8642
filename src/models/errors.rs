//! Centralized Error Handling Module
//!
//! Setiap kegagalan memiliki kode error yang unik, supaya log produksi
//! bisa difilter per kategori.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - UPSTREAM_xxx: indexing API (Sim) errors
//! - API_xxx: REST API errors
//! - CFG_xxx: Configuration errors
//! - TOKEN_xxx: Token/chain lookup errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Upstream (indexing API) Errors
    // ============================================
    /// Could not connect to the indexing API
    UpstreamConnectionFailed,
    /// Request timed out
    UpstreamTimeout,
    /// HTTP 429 from the indexing API
    UpstreamRateLimited,
    /// Non-success HTTP status
    UpstreamBadStatus,
    /// Body could not be decoded
    UpstreamInvalidResponse,

    // ============================================
    // API Errors
    // ============================================
    ApiBadRequest,
    ApiUnauthorized,
    ApiRateLimited,
    ApiInternalError,
    ApiNotFound,

    // ============================================
    // Configuration Errors
    // ============================================
    ConfigMissingEnv,
    ConfigInvalidValue,
    ConfigMissingApiKey,

    // ============================================
    // Token/Chain Errors
    // ============================================
    /// Contract address is not 0x + 40 hex chars
    TokenInvalidAddress,
    /// Chain name missing from the chain table
    TokenUnsupportedChain,
    /// No holders returned for the token on a chain
    TokenNoHolderData,
    /// No metadata returned for the token on a chain
    TokenInfoMissing,

    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpstreamConnectionFailed => "UPSTREAM_CONNECTION_FAILED",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::UpstreamRateLimited => "UPSTREAM_RATE_LIMITED",
            Self::UpstreamBadStatus => "UPSTREAM_BAD_STATUS",
            Self::UpstreamInvalidResponse => "UPSTREAM_INVALID_RESPONSE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiUnauthorized => "API_UNAUTHORIZED",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiNotFound => "API_NOT_FOUND",

            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigMissingApiKey => "CFG_MISSING_API_KEY",

            Self::TokenInvalidAddress => "TOKEN_INVALID_ADDRESS",
            Self::TokenUnsupportedChain => "TOKEN_UNSUPPORTED_CHAIN",
            Self::TokenNoHolderData => "TOKEN_NO_HOLDER_DATA",
            Self::TokenInfoMissing => "TOKEN_INFO_MISSING",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest
            | Self::TokenInvalidAddress
            | Self::TokenUnsupportedChain
            | Self::ConfigInvalidValue => 400,
            Self::ApiUnauthorized | Self::ConfigMissingApiKey => 401,
            Self::ApiNotFound | Self::TokenNoHolderData | Self::TokenInfoMissing => 404,
            Self::ApiRateLimited | Self::UpstreamRateLimited => 429,
            Self::UpstreamConnectionFailed
            | Self::UpstreamTimeout
            | Self::UpstreamBadStatus
            | Self::UpstreamInvalidResponse => 502,
            _ => 500,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout | Self::UpstreamRateLimited | Self::UpstreamConnectionFailed
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn upstream_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamTimeout, msg)
    }

    pub fn upstream_rate_limited() -> Self {
        Self::new(ErrorCode::UpstreamRateLimited, "Rate limited (HTTP 429)")
    }

    /// Non-success status; 5xx responses are retryable as a connection failure
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        let code = if status == 429 {
            ErrorCode::UpstreamRateLimited
        } else if status >= 500 {
            ErrorCode::UpstreamConnectionFailed
        } else {
            ErrorCode::UpstreamBadStatus
        };
        Self::new(code, format!("HTTP {}: {}", status, body.into()))
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamInvalidResponse, msg)
    }

    pub fn invalid_address(address: &str) -> Self {
        Self::new(
            ErrorCode::TokenInvalidAddress,
            format!("Invalid contract address: {}", address),
        )
    }

    pub fn unsupported_chain(chain: &str) -> Self {
        Self::new(
            ErrorCode::TokenUnsupportedChain,
            format!("Unsupported chain: {}", chain),
        )
    }

    pub fn missing_api_key(key_name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingApiKey,
            format!("Missing API key: {}", key_name),
        )
    }

    pub fn invalid_config(key_name: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key_name, value),
        )
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::UpstreamTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::UpstreamConnectionFailed, "Connection failed")
        } else if err.is_decode() {
            Self::new(ErrorCode::UpstreamInvalidResponse, err.to_string())
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::UpstreamInvalidResponse, "JSON parse error", err)
    }
}
