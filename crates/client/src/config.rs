// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint and transport configuration.
//!
//! A client is pointed at one file resource: `scheme://host:port/base_path`.
//! Embedding applications either build a [`ClientConfig`] directly, parse it
//! from a URL, or load [`Settings`] from a TOML file:
//!
//! ```toml
//! [server]
//! scheme = "https"
//! host = "docs.example.com"
//! port = 8443
//! base_path = "/1/files/42"
//!
//! [transport]
//! timeout_secs = 30
//! connect_timeout_secs = 5
//! user_agent = "my-editor/1.0"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use reqwest::Url;

use crate::error::{Error, Result};

const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// Location of the file resource a client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `http` or `https` (default: `https`).
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    /// Port number; the scheme's default port when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Path prefix identifying the file, e.g. `/1/files/42`. May be empty.
    #[serde(default)]
    pub base_path: String,
}

fn default_scheme() -> String {
    "https".to_string()
}

impl ClientConfig {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        base_path: impl Into<String>,
    ) -> Self {
        ClientConfig {
            scheme: scheme.into(),
            host: host.into(),
            port: Some(port),
            base_path: base_path.into(),
        }
    }

    /// Parses a config from a full URL such as `http://localhost:8080/files/1`.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidConfig(format!("{url}: {e}")))?;
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(Error::InvalidConfig(format!(
                "{url}: query and fragment are not allowed\n  hint: the URL should name the file resource only"
            )));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::InvalidConfig(format!("{url}: missing host")))?;
        let base_path = match parsed.path() {
            "/" => String::new(),
            path => path.to_string(),
        };
        let config = ClientConfig {
            scheme: parsed.scheme().to_string(),
            host: host.trim_start_matches('[').trim_end_matches(']').to_string(),
            port: parsed.port(),
            base_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the config can produce a valid base URL.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_SCHEMES.contains(&self.scheme.to_ascii_lowercase().as_str()) {
            return Err(Error::InvalidConfig(format!(
                "unsupported scheme '{}'\n  hint: valid schemes are: http, https",
                self.scheme
            )));
        }
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host is required".to_string()));
        }
        if self.host.contains(['/', '?', '#', ' ']) {
            return Err(Error::InvalidConfig(format!("invalid host '{}'", self.host)));
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "invalid base path '{}'\n  hint: base path must be empty or start with '/'",
                self.base_path
            )));
        }
        if self.base_path.contains(['?', '#']) {
            return Err(Error::InvalidConfig(format!(
                "invalid base path '{}'\n  hint: base path must not contain a query or fragment",
                self.base_path
            )));
        }
        Ok(())
    }

    /// Builds the URL of the file resource.
    pub fn base_url(&self) -> Result<Url> {
        self.validate()?;
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let mut url = Url::parse(&format!("{}://{}", self.scheme.to_ascii_lowercase(), host))
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", self.host)))?;
        url.set_port(self.port)
            .map_err(|()| Error::InvalidConfig(format!("cannot set port on {url}")))?;
        url.set_path(&self.base_path);
        Ok(url)
    }
}

/// Options for the HTTP transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Total time allowed per request. No limit when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    /// User-Agent header (default: `coops/<version>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ClientConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.server.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
