// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! coops-core: Data model and JSON codec for the co-ops file protocol
//!
//! This crate provides the wire types exchanged with a co-ops server
//! (files, join results, patches) and the JSON codec used to encode and
//! decode them, including the lenient timestamp format.

pub mod codec;
pub mod error;
pub mod file;
pub mod join;
pub mod patch;
pub mod timestamp;

pub use error::{Error, Result};
pub use file::{File, Role};
pub use join::FileJoin;
pub use patch::Patch;
