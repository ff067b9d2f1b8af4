// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encodings.
//!
//! DAP 2.0 data sections use a single encoding: big-endian XDR with the
//! protocol's doubled length prefix.

pub mod xdr;

pub use xdr::{
    encode_chunk_size, set_encode_chunk_size, XdrEncoder, DEFAULT_ENCODE_CHUNK_SIZE,
};
