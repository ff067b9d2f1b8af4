// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout dapcodec.
//!
//! This module provides the foundational types for the library:
//! - [`DapError`] - Error taxonomy for response generation
//! - [`DapType`] - The DAP atomic type registry
//! - [`ScalarValue`] - Scalar payloads for atoms and attributes
//! - [`TextStream`] / [`ByteStream`] - The lazy chunk streams every
//!   emitter produces

pub mod error;
pub mod types;
pub mod value;

pub use error::{DapError, Result};
pub use types::{DapType, NativeType};
pub use value::ScalarValue;

/// Lazy, single-pass stream of response text chunks.
///
/// Errors after the first chunk abort the stream mid-flight; consumers
/// must tolerate partial output.
pub type TextStream<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Lazy, single-pass stream of response byte chunks.
pub type ByteStream<'a> = Box<dyn Iterator<Item = Result<Vec<u8>>> + 'a>;
