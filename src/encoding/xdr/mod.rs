// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DAP-flavoured XDR encoding.
//!
//! DAP 2.0 serializes data as big-endian XDR with one protocol quirk: the
//! element count of every non-scalar array is written twice. This module
//! holds the encoder and the process-wide streaming configuration.

pub mod encoder;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::error::{DapError, Result};

pub use encoder::XdrEncoder;

/// Default target size in bytes for one yielded chunk when encoding a
/// chunked buffer.
pub const DEFAULT_ENCODE_CHUNK_SIZE: usize = 20_000_000;

static ENCODE_CHUNK_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_ENCODE_CHUNK_SIZE);

/// Set the process-wide target chunk size for streaming emission.
///
/// Takes effect for encoders constructed afterwards; mutating it while a
/// stream is live is safe but only observed by new streams.
pub fn set_encode_chunk_size(bytes: usize) -> Result<()> {
    if bytes == 0 {
        return Err(DapError::invariant_violation(
            "encode chunk size must be positive",
        ));
    }
    ENCODE_CHUNK_SIZE.store(bytes, Ordering::Relaxed);
    Ok(())
}

/// The current process-wide target chunk size.
pub fn encode_chunk_size() -> usize {
    ENCODE_CHUNK_SIZE.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_encode_chunk_size_rejects_zero() {
        assert!(set_encode_chunk_size(0).is_err());
    }

    #[test]
    fn test_set_encode_chunk_size_round_trip() {
        set_encode_chunk_size(1024).unwrap();
        assert_eq!(encode_chunk_size(), 1024);
        set_encode_chunk_size(DEFAULT_ENCODE_CHUNK_SIZE).unwrap();
    }
}
