// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic transport for tests.
//!
//! Responses are looked up by request key: the URI path, plus `?query` when
//! a query is present. The query is kept in its percent-encoded
//! (form-urlencoded) form, so an algorithm `a/b` is registered as
//! `algorithm=a%2Fb`, not `algorithm=a/b`. Every request is recorded so tests
//! can assert what was, or was not, sent.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::Url;

use super::{classify, request_key, Method, Transport};
use crate::auth::{collect_headers, Auth, AuthRequest};
use crate::error::{Error, Result};

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path plus `?query`, as used for lookups.
    pub key: String,
    pub body: Option<String>,
    pub content_type: Option<String>,
    /// Headers produced by the request's auth.
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct MockState {
    results: HashMap<String, (u16, String)>,
    failures: HashMap<String, String>,
    requests: Vec<RecordedRequest>,
}

/// Transport answering from a table of canned responses.
///
/// A canned result registered for a key wins over a failure registered for
/// the same key. Requests to unregistered keys fail with
/// [`Error::Transport`].
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answers requests for `key` with status 200 and `body`.
    pub fn add_mocked_result(&self, key: impl Into<String>, body: impl Into<String>) {
        self.add_mocked_status(key, 200, body);
    }

    /// Answers requests for `key` with an arbitrary status and body.
    ///
    /// The status goes through the same classification as real responses,
    /// so 204, 401, 403 and 5xx behave as they would on the wire.
    pub fn add_mocked_status(&self, key: impl Into<String>, status: u16, body: impl Into<String>) {
        self.state()
            .results
            .insert(key.into(), (status, body.into()));
    }

    pub fn clear_mocked_results(&self) {
        self.state().results.clear();
    }

    /// Fails requests for `key` as if the connection could not be made.
    pub fn add_connection_failure(&self, key: impl Into<String>, message: impl Into<String>) {
        self.state().failures.insert(key.into(), message.into());
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Returns all requests made so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state().requests.last().cloned()
    }

    fn execute(
        &self,
        method: Method,
        uri: &Url,
        body: Option<&str>,
        content_type: Option<&str>,
        auth: Option<&dyn Auth>,
    ) -> Result<Option<String>> {
        let auth_request = AuthRequest { method, uri, body };
        let headers = collect_headers(auth, &auth_request);
        let key = request_key(uri);

        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method,
            key: key.clone(),
            body: body.map(str::to_string),
            content_type: content_type.map(str::to_string),
            headers,
        });

        if let Some((status, body)) = state.results.get(&key) {
            return classify(*status, body.clone());
        }
        if let Some(message) = state.failures.get(&key) {
            return Err(Error::Transport(message.clone()));
        }
        Err(Error::Transport(format!(
            "request not mocked: {method} {key}\n  hint: register a response with add_mocked_result"
        )))
    }
}

impl Transport for MockTransport {
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

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
