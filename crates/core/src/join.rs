// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result of joining a collaboration session.

use serde::{Deserialize, Serialize};

/// The server's answer to a join request.
///
/// `extensions` lists the algorithms the server accepted, in the server's
/// order. The realtime fields are only present when the server offers a
/// websocket channel; their absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileJoin {
    #[serde(default)]
    pub extensions: Vec<String>,
    pub file_id: String,
    pub revision_number: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_type: String,

    // Websocket extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsecure_web_socket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_web_socket_url: Option<String>,
}

impl FileJoin {
    /// Returns true if the server accepted the given algorithm.
    pub fn supports(&self, algorithm: &str) -> bool {
        self.extensions.iter().any(|ext| ext == algorithm)
    }

    /// Returns true if the server offered a realtime channel.
    pub fn has_realtime_channel(&self) -> bool {
        self.secure_web_socket_url.is_some() || self.unsecure_web_socket_url.is_some()
    }

    /// Picks a websocket URL, falling back to the other flavor when the
    /// preferred one was not offered.
    pub fn realtime_url(&self, prefer_secure: bool) -> Option<&str> {
        let (first, second) = if prefer_secure {
            (&self.secure_web_socket_url, &self.unsecure_web_socket_url)
        } else {
            (&self.unsecure_web_socket_url, &self.secure_web_socket_url)
        };
        first.as_deref().or(second.as_deref())
    }
}

#[cfg(test)]
#[path = "join_tests.rs"]
mod tests;
