// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for coops-core codec operations.

use thiserror::Error;

/// Errors raised while encoding or decoding protocol payloads.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid timestamp: '{0}'\n  hint: expected ISO-8601 (e.g. 2010-02-03T04:05:06.078Z) or RFC 2822")]
    InvalidTimestamp(String),
}

/// A specialized Result type for coops-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
