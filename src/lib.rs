// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Dapcodec
//!
//! Server-side encoder for the OPeNDAP DAP 2.0 protocol.
//!
//! An application builds a typed data tree, a [`Dataset`] of scalars,
//! attributes, arrays, and grids; this library renders the three
//! response bodies DAP clients consume:
//!
//! - **DDS** - the textual schema description
//! - **DAS** - the textual attribute description
//! - **DODS** - DDS text followed by the XDR-encoded binary data
//!
//! A client-supplied constraint expression selects a subtree and slices
//! array dimensions. Responses are produced as lazy chunk streams, so a
//! data section larger than memory can be fed to an HTTP body
//! incrementally; the wire output is byte-compatible with netCDF4-based
//! reference clients.
//!
//! ## Example: a gridded variable
//!
//! ```no_run
//! use dapcodec::model::{Array, Attribute, Dataset, Grid};
//! use dapcodec::types::DataArray;
//! use dapcodec::{response, DapType};
//!
//! # fn main() -> dapcodec::Result<()> {
//! let x = Array::new("x", DataArray::vector(vec![0i16, 1]), DapType::Int16);
//! let y = Array::new("y", DataArray::vector(vec![10i16, 11]), DapType::Int16);
//!
//! let cells = DataArray::from_shape_vec(vec![2, 2], vec![0i32; 4])?;
//! let mut z = Grid::new("z", cells, DapType::Int32, vec![x.clone(), y.clone()]);
//! z.append(Attribute::new("units", DapType::String, "second"));
//!
//! let mut dataset = Dataset::new("test");
//! dataset.append(x);
//! dataset.append(y);
//! dataset.append(z);
//!
//! let schema = response::dds(&dataset, "")?;
//! let bytes = response::dods(&dataset, "z.z[0][0]")?;
//! # let _ = (schema, bytes);
//! # Ok(())
//! # }
//! ```
//!
//! ## Streaming
//!
//! The `*_stream` functions in [`response`] yield chunks on demand.
//! Large chunked buffers (anything implementing
//! [`ChunkSource`](types::ChunkSource)) are read in row blocks and
//! emitted in groups bounded by the configured chunk size
//! ([`set_encode_chunk_size`]).

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{ByteStream, DapError, DapType, NativeType, Result, ScalarValue, TextStream};

// Constraint expressions: projection matching and slicing
pub mod constraint;

pub use constraint::{meets_constraint, Constraint, DimSlice};

// Wire encoding
pub mod encoding;

pub use encoding::{
    encode_chunk_size, set_encode_chunk_size, XdrEncoder, DEFAULT_ENCODE_CHUNK_SIZE,
};

// Buffer types
pub mod types;

pub use types::{ChunkSource, DapData, DataArray, MemoryChunks};

// The DAP object tree
pub mod model;

pub use model::{
    Array, Atom, Attribute, DapNode, Dataset, Grid, Scope, Sequence, SequenceInstance,
    SequenceSchema, Structure,
};

// Response assembly
pub mod response;
