// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authentication capability.
//!
//! An [`Auth`] turns an outgoing request into the headers needed to
//! authenticate it. The client and transports only see the trait, so any
//! scheme (bearer token, signed header, cookie) plugs in the same way.
//! Passing `None` sends the request unauthenticated.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;

use crate::transport::Method;

/// The request an [`Auth`] is asked to authenticate.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    pub method: Method,
    pub uri: &'a Url,
    pub body: Option<&'a str>,
}

/// Produces authentication headers for a request.
pub trait Auth: Send + Sync {
    /// Returns header name → value pairs to add to the request.
    fn headers(&self, request: &AuthRequest<'_>) -> BTreeMap<String, String>;
}

impl<F> Auth for F
where
    F: Fn(&AuthRequest<'_>) -> BTreeMap<String, String> + Send + Sync,
{
    fn headers(&self, request: &AuthRequest<'_>) -> BTreeMap<String, String> {
        self(request)
    }
}

/// `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        BearerAuth { token: token.into() }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").field("token", &"<redacted>").finish()
    }
}

impl Auth for BearerAuth {
    fn headers(&self, _request: &AuthRequest<'_>) -> BTreeMap<String, String> {
        BTreeMap::from([("Authorization".to_string(), format!("Bearer {}", self.token))])
    }
}

/// A fixed set of headers sent with every request.
#[derive(Debug, Clone, Default)]
pub struct HeaderAuth {
    headers: BTreeMap<String, String>,
}

impl HeaderAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl From<BTreeMap<String, String>> for HeaderAuth {
    fn from(headers: BTreeMap<String, String>) -> Self {
        HeaderAuth { headers }
    }
}

impl Auth for HeaderAuth {
    fn headers(&self, _request: &AuthRequest<'_>) -> BTreeMap<String, String> {
        self.headers.clone()
    }
}

/// A session cookie (`Cookie: name=value`).
#[derive(Clone)]
pub struct CookieAuth {
    name: String,
    value: String,
}

impl CookieAuth {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CookieAuth {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Debug for CookieAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieAuth")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl Auth for CookieAuth {
    fn headers(&self, _request: &AuthRequest<'_>) -> BTreeMap<String, String> {
        BTreeMap::from([("Cookie".to_string(), format!("{}={}", self.name, self.value))])
    }
}

/// Collects the headers for a request, or none when unauthenticated.
pub(crate) fn collect_headers(
    auth: Option<&dyn Auth>,
    request: &AuthRequest<'_>,
) -> BTreeMap<String, String> {
    auth.map(|auth| auth.headers(request)).unwrap_or_default()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
