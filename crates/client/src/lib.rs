// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! coops: Client for the co-ops collaborative file protocol
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Client    │────►│  Transport  │────►│   co-ops    │
//! │   (CoOps)   │◄────│   (trait)   │◄────│   server    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │    Codec    │     │    Auth     │
//! │(coops-core) │     │   (trait)   │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! The client validates arguments locally, builds the request URI and hands
//! it to a [`Transport`]. The transport attaches [`Auth`] headers, performs
//! the request and maps the response status to an [`Error`]. The client then
//! decodes the body with the codec from `coops-core`.
//!
//! All calls block the calling thread. Nothing is retried or cached.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use auth::{Auth, AuthRequest, BearerAuth, CookieAuth, HeaderAuth};
pub use client::{CoOps, CONTENT_TYPE_JSON, PROTOCOL_VERSION};
pub use config::{ClientConfig, Settings, TransportConfig};
pub use coops_core::{File, FileJoin, Patch, Role};
pub use error::{Error, ErrorKind, Result};
pub use transport::{HttpTransport, Method, MockTransport, Transport};
