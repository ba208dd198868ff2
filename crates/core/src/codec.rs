// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON encoding and decoding of protocol payloads.
//!
//! Unknown fields are ignored on decode so newer servers can add fields
//! without breaking older clients. An empty body decodes to `None`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Serializes a payload to a JSON request body.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Error::Encode)
}

/// Deserializes a JSON response body.
///
/// Returns `None` for an empty or whitespace-only body.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<Option<T>> {
    if json.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(json).map(Some).map_err(Error::Decode)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
