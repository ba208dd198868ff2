// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File snapshots and the caller's role on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Permission level of the calling user on a file.
///
/// Known roles match their wire string exactly; any other spelling
/// (including `"owner"`) is an unknown role.
///
/// Roles the library does not know are kept verbatim in [`Role::Unknown`]
/// so a newer server never breaks decoding of an otherwise valid file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full control, including sharing.
    Owner,
    /// May read and modify content.
    Writer,
    /// May only read content.
    Reader,
    /// A role this version of the library does not recognize.
    Unknown(String),
}

impl Role {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Owner => "OWNER",
            Role::Writer => "WRITER",
            Role::Reader => "READER",
            Role::Unknown(raw) => raw,
        }
    }

    /// Returns true if the role allows modifying content.
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Owner | Role::Writer)
    }

    pub fn is_owner(&self) -> bool {
        *self == Role::Owner
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(s.to_string()))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OWNER" => Role::Owner,
            "WRITER" => Role::Writer,
            "READER" => Role::Reader,
            _ => Role::Unknown(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A file as stored on the server.
///
/// Snapshots returned by the server are never modified by the library.
/// `id` and `revision_number` are server-assigned; callers building a file
/// to save leave them as they were received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Opaque document body.
    #[serde(default)]
    pub content: String,
    /// MIME-like tag, possibly carrying editor metadata (`text/html;editor=CKEditor`).
    #[serde(default)]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u64>,
}

impl File {
    /// Creates a file with the given name, content and content type.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        File {
            name: name.into(),
            content: content.into(),
            content_type: content_type.into(),
            ..File::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Sets the revision this snapshot was taken at.
    pub fn with_revision_number(mut self, revision_number: u64) -> Self {
        self.revision_number = Some(revision_number);
        self
    }

    /// Returns the base MIME type without parameters (`text/html;editor=X` → `text/html`).
    pub fn mime_type(&self) -> &str {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Returns the value of a content type parameter such as `editor`.
    pub fn content_type_param(&self, key: &str) -> Option<&str> {
        self.content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim().eq_ignore_ascii_case(key).then_some(value.trim())
        })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
