// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Buffer types consumed by the emitters: in-memory typed arrays and
//! chunked sources for streaming.

pub mod array;
pub mod chunked;

pub use array::{sliced_shape, ArrayValues, DataArray, Element};
pub use chunked::{ChunkSource, DapData, MemoryChunks};
