use std::fmt;

use thiserror::Error;

/// Error for OwnerId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OwnerIdError {
    #[error("Owner ID is empty")]
    Empty,

    #[error("Owner ID too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for RefreshRecordId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshRecordIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Name contains control characters")]
    InvalidCharacters,
}

/// Stable classification of an [`AuthError`], safe to expose to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UserNotFound,
    InvalidAccessToken,
    AccessTokenExpired,
    TokenMismatch,
    RefreshTokenNotRegistered,
    Transient,
}

impl ErrorKind {
    /// Machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::UserNotFound => "USER_NOT_FOUND",
            ErrorKind::InvalidAccessToken => "INVALID_ACCESS_TOKEN",
            ErrorKind::AccessTokenExpired => "ACCESS_TOKEN_EXPIRED",
            ErrorKind::TokenMismatch => "TOKEN_MISMATCH",
            ErrorKind::RefreshTokenNotRegistered => "REFRESH_TOKEN_NOT_REGISTERED",
            ErrorKind::Transient => "TRANSIENT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid owner ID: {0}")]
    InvalidOwnerId(#[from] OwnerIdError),

    #[error("Invalid name: {0}")]
    InvalidUserName(#[from] UserNameError),

    // Protocol errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Access token is expired")]
    AccessTokenExpired,

    #[error("Token pair mismatch: invalid refresh token for access token")]
    TokenMismatch,

    #[error("Refresh token is not registered")]
    RefreshTokenNotRegistered,

    // Infrastructure errors, safe to retry
    #[error("{context}: {message}")]
    Transient {
        context: &'static str,
        message: String,
    },
}

impl AuthError {
    /// Wrap an infrastructure failure with the call site it came from.
    pub fn transient(context: &'static str, err: impl fmt::Display) -> Self {
        AuthError::Transient {
            context,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidOwnerId(_) | AuthError::InvalidUserName(_) => ErrorKind::InvalidInput,
            AuthError::UserNotFound(_) => ErrorKind::UserNotFound,
            AuthError::InvalidAccessToken => ErrorKind::InvalidAccessToken,
            AuthError::AccessTokenExpired => ErrorKind::AccessTokenExpired,
            AuthError::TokenMismatch => ErrorKind::TokenMismatch,
            AuthError::RefreshTokenNotRegistered => ErrorKind::RefreshTokenNotRegistered,
            AuthError::Transient { .. } => ErrorKind::Transient,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}
