// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport backed by a blocking reqwest client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, warn};

use super::{classify, Method, Transport};
use crate::auth::{collect_headers, Auth, AuthRequest};
use crate::config::TransportConfig;
use crate::error::{Error, Result};

const DEFAULT_USER_AGENT: &str = concat!("coops/", env!("CARGO_PKG_VERSION"));

/// Production transport issuing real HTTP requests.
///
/// The underlying connection pool is shared, so one instance (or clones of
/// it) may serve many threads at once.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with no timeouts.
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut builder = Client::builder().user_agent(user_agent);
        // reqwest's blocking client defaults to a 30s timeout; no limit unless configured
        builder = builder.timeout(config.timeout_secs.map(Duration::from_secs));
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(HttpTransport { client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        HttpTransport { client }
    }

    fn execute(
        &self,
        method: Method,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>> {
        let verb = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        };
        let mut request = self.client.request(verb, uri.clone());

        let auth_request = AuthRequest { method, uri, body };
        request = request.headers(request_headers(&auth_request, auth, content_type)?);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        debug!("{} {}", method, uri);
        let response = request.send().map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("{} {} -> {}", method, uri, status);
        if status == 204 {
            return Ok(None);
        }

        let text = response
            .text()
            .map_err(|e| Error::Transport(format!("failed to read response body: {e}")))?;
        if status != 200 {
            warn!("{} {} failed with status {}", method, uri, status);
        }
        classify(status, text)
    }
}

/// Builds the header map for a request.
///
/// The caller's content type is inserted last and replaces any
/// `Content-Type` produced by `auth`.
fn request_headers(
    request: &AuthRequest<'_>,
    auth: Option<&dyn Auth>,
    content_type: Option<&str>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in collect_headers(auth, request) {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Transport(format!("invalid auth header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(&value)
            .map_err(|e| Error::Transport(format!("invalid value for auth header '{name}': {e}")))?;
        headers.insert(header, value);
    }
    if let Some(content_type) = content_type {
        let value = HeaderValue::from_str(content_type)
            .map_err(|e| Error::Transport(format!("invalid content type '{content_type}': {e}")))?;
        headers.insert(CONTENT_TYPE, value);
    }
    Ok(headers)
}

impl Transport for HttpTransport {
    fn get(&self, uri: &Url, auth: Option<&dyn Auth>) -> Result<Option<String>> {
        self.execute(Method::Get, uri, None, None, auth)
    }

    fn post(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>> {
        self.execute(Method::Post, uri, body, content_type, auth)
    }

    fn put(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>> {
        self.execute(Method::Put, uri, body, content_type, auth)
    }

    fn patch(
        &self,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>> {
        self.execute(Method::Patch, uri, body, content_type, auth)
    }
}
