// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol client for a single co-ops file.
//!
//! Provides a high-level interface for:
//! - Joining a collaboration session
//! - Fetching the current file or a past revision
//! - Saving a full replacement
//! - Submitting a patch against a known revision
//!
//! Arguments that can be checked locally are rejected with
//! [`Error::Usage`] before any request is made.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use coops_core::{codec, File, FileJoin, Patch};
use reqwest::Url;

use crate::auth::Auth;
use crate::config::{ClientConfig, Settings};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Transport};

/// Protocol version sent on join.
pub const PROTOCOL_VERSION: &str = "1.0.0draft2";

/// Content type of request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Client for one file resource.
///
/// Holds only immutable state (endpoint and transport), so a client can be
/// shared between threads whenever its transport can.
pub struct CoOps<T: Transport = HttpTransport> {
    config: ClientConfig,
    base_url: Url,
    transport: T,
}

impl CoOps<HttpTransport> {
    /// Creates a client using the HTTP transport with default options.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?)
    }

    /// Creates a client from loaded settings.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::with_config(&settings.transport)?;
        Self::with_transport(settings.server, transport)
    }
}

impl<T: Transport> CoOps<T> {
    /// Creates a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base_url = config.base_url()?;
        Ok(CoOps {
            config,
            base_url,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Joins the collaboration session for this file.
    ///
    /// `algorithms` are the patch algorithms the caller can produce, in
    /// preference order; at least one is required. Returns `None` when the
    /// server answers 204.
    pub fn join_file<S: AsRef<str>>(
        &self,
        algorithms: &[S],
        auth: Option<&dyn Auth>,
    ) -> Result<Option<FileJoin>> {
        if algorithms.is_empty() {
            return Err(Error::Usage(
                "at least one algorithm needs to be defined\n  hint: pass the patch algorithms this client supports"
                    .to_string(),
            ));
        }

        let mut uri = self.url_for(&join_path(&self.config.base_path));
        {
            let mut query = uri.query_pairs_mut();
            query.append_pair("protocolVersion", PROTOCOL_VERSION);
            for algorithm in algorithms {
                query.append_pair("algorithm", algorithm.as_ref());
            }
        }

        debug!("joining {} with {} algorithm(s)", self.base_url, algorithms.len());
        self.get_json(&uri, auth)
    }

    /// Fetches the current version of the file.
    pub fn get_file(&self, auth: Option<&dyn Auth>) -> Result<Option<File>> {
        debug!("fetching {}", self.base_url);
        self.get_json(&self.base_url, auth)
    }

    /// Fetches the file as it was at `revision_number`.
    pub fn get_file_revision(
        &self,
        revision_number: Option<u64>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<File>> {
        let revision_number = revision_number
            .ok_or_else(|| Error::Usage("revisionNumber is required".to_string()))?;

        let mut uri = self.base_url.clone();
        uri.query_pairs_mut()
            .append_pair("revisionNumber", &revision_number.to_string());

        debug!("fetching {} at revision {}", self.base_url, revision_number);
        self.get_json(&uri, auth)
    }

    /// Replaces the file on the server.
    ///
    /// The response body is discarded; the new revision number is not returned.
    pub fn save_file(&self, file: &File, auth: Option<&dyn Auth>) -> Result<()> {
        let body = encode(file)?;
        debug!("saving {} ({} bytes)", self.base_url, body.len());
        self.transport
            .put(&self.base_url, Some(&body), Some(CONTENT_TYPE_JSON), auth)?;
        Ok(())
    }

    /// Submits a patch against the revision it names.
    ///
    /// Both the algorithm and the revision number are required so the server
    /// can apply the change to the correct base.
    pub fn patch_file(&self, patch: &Patch, auth: Option<&dyn Auth>) -> Result<()> {
        let algorithm = patch
            .algorithm()
            .ok_or_else(|| Error::Usage("algorithm is required".to_string()))?;
        let revision_number = patch
            .revision_number
            .ok_or_else(|| Error::Usage("revisionNumber is required".to_string()))?;

        let body = encode(patch)?;
        debug!(
            "patching {} at revision {} with {}",
            self.base_url, revision_number, algorithm
        );
        self.transport
            .patch(&self.base_url, Some(&body), Some(CONTENT_TYPE_JSON), auth)?;
        Ok(())
    }

    fn url_for(&self, path: &str) -> Url {
        let mut uri = self.base_url.clone();
        uri.set_path(path);
        uri
    }

    fn get_json<R: DeserializeOwned>(&self, uri: &Url, auth: Option<&dyn Auth>) -> Result<Option<R>> {
        match self.transport.get(uri, auth)? {
            Some(body) => Ok(codec::decode(&body)?),
            None => Ok(None),
        }
    }
}

fn encode<V: Serialize>(value: &V) -> Result<String> {
    Ok(codec::encode(value)?)
}

/// `{base_path}/join`, without doubling a trailing slash.
fn join_path(base_path: &str) -> String {
    format!("{}/join", base_path.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
