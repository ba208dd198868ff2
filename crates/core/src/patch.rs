// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound incremental changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A change against a known revision of a file.
///
/// The payload is opaque to this library; `algorithm` names the format it
/// was produced in and must be one the server accepted on join.
/// `revision_number` and `algorithm` are optional in the type only so an
/// incomplete patch can be represented and rejected before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub patch: String,
    /// Algorithm-specific metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
}

impl Patch {
    /// Creates a patch against `revision_number` in the given algorithm.
    pub fn new(revision_number: u64, algorithm: impl Into<String>, patch: impl Into<String>) -> Self {
        Patch {
            revision_number: Some(revision_number),
            algorithm: Some(algorithm.into()),
            patch: patch.into(),
            properties: None,
        }
    }

    /// Adds a metadata property, creating the map on first use.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the algorithm when it is present and not blank.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm
            .as_deref()
            .filter(|algorithm| !algorithm.trim().is_empty())
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
