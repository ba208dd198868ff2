// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for co-ops requests.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production ([`HttpTransport`])
//! - Canned responses for unit testing ([`MockTransport`])
//!
//! Both share [`classify`], the only place a response status is turned into
//! a result.

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedRequest};

use std::fmt;

use reqwest::Url;

use crate::auth::Auth;
use crate::error::{Error, Result};

/// HTTP verbs used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Performs protocol requests.
///
/// Every verb returns the response body for 200, `None` for 204 and an
/// error for anything else (see [`classify`]). Implementations attach the
/// headers produced by `auth`, and set `Content-Type` only when one is given.
/// Calls block until the response has been read.
pub trait Transport: Send + Sync {
    /// Performs a GET request. GET never carries a body.
    fn get(&self, uri: &Url, auth: Option<&dyn Auth>) -> Result<Option<String>>;

    fn post(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>>;

    fn put(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>>;

    fn patch(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>>;
}

/// Maps a response status and body to the transport result.
///
/// | Status | Result |
/// |--------|--------|
/// | 204 | `Ok(None)` |
/// | 200 | `Ok(Some(body))` |
/// | 401 | [`Error::Unauthorized`] |
/// | 403 | [`Error::Forbidden`] |
/// | other | [`Error::Server`] |
pub fn classify(status: u16, body: String) -> Result<Option<String>> {
    match status {
        204 => Ok(None),
        200 => Ok(Some(body)),
        401 => Err(Error::Unauthorized(body)),
        403 => Err(Error::Forbidden(body)),
        status => Err(Error::Server {
            status,
            message: body,
        }),
    }
}

/// Returns the path of `uri` followed by `?query` when a query is present.
pub fn request_key(uri: &Url) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", uri.path(), query),
        _ => uri.path().to_string(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
