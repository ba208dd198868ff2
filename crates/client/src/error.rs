// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the co-ops client.
//!
//! | Kind | Variants | Cause |
//! |------|----------|-------|
//! | Usage | `Usage` | Precondition checked before any request |
//! | Unauthorized | `Unauthorized` | Status 401 |
//! | Forbidden | `Forbidden` | Status 403 |
//! | Server | `Server` | Any other status besides 200 and 204 |
//! | Transport | `Transport` | Connection failure below HTTP |
//! | Decode / Encode | `Codec` | Body is not a valid payload |
//! | Config | `InvalidConfig`, `Io`, `Toml` | Endpoint configuration |
//!
//! Errors are surfaced as they occur; the client never retries.

use thiserror::Error;

/// All possible errors returned by the co-ops client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Codec(#[from] coops_core::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Coarse classification for callers that branch on the failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fix the request.
    Usage,
    /// Re-authenticate.
    Unauthorized,
    /// Not permitted.
    Forbidden,
    Server,
    Transport,
    /// The response was malformed.
    Decode,
    Encode,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Usage(_) => ErrorKind::Usage,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::Server { .. } => ErrorKind::Server,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Codec(coops_core::Error::Encode(_)) => ErrorKind::Encode,
            Error::Codec(_) => ErrorKind::Decode,
            Error::InvalidConfig(_) | Error::Io(_) | Error::Toml(_) => ErrorKind::Config,
        }
    }

    /// Returns the response body carried by a status error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Unauthorized(message)
            | Error::Forbidden(message)
            | Error::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the HTTP status behind a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if repeating the same request may succeed.
    ///
    /// Only connection failures and 5xx responses qualify. Whether to retry
    /// is up to the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// A specialized Result type for co-ops client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
