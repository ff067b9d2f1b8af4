// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chunked buffer sources for streaming emission.
//!
//! A [`ChunkSource`] is the seam to lazy array backends: the encoder
//! reads row blocks along axis 0 so that data larger than memory never
//! materializes as a whole. [`MemoryChunks`] is the in-process
//! implementation used by tests and demos.

use std::fmt;
use std::sync::Arc;

use crate::core::error::{DapError, Result};
use crate::core::types::NativeType;
use crate::types::array::DataArray;

/// A lazy N-dimensional buffer readable in row blocks along axis 0.
pub trait ChunkSource: Send + Sync {
    /// Full shape of the buffer.
    fn shape(&self) -> Vec<usize>;

    /// Native element type.
    fn native(&self) -> NativeType;

    /// Native chunk extent along axis 0.
    fn chunk_rows(&self) -> usize;

    /// Read rows `start..end` as an in-memory block of full rank.
    fn read_rows(&self, start: usize, end: usize) -> Result<DataArray>;
}

/// In-memory [`ChunkSource`] with a configurable chunk extent.
pub struct MemoryChunks {
    data: DataArray,
    chunk_rows: usize,
}

impl MemoryChunks {
    /// Wrap a buffer, serving it in blocks of `chunk_rows` rows.
    pub fn new(data: DataArray, chunk_rows: usize) -> Result<Self> {
        if data.rank() == 0 {
            return Err(DapError::invariant_violation(
                "chunked sources must have at least one axis",
            ));
        }
        if chunk_rows == 0 {
            return Err(DapError::invariant_violation(
                "chunk extent must be positive",
            ));
        }
        Ok(Self { data, chunk_rows })
    }
}

impl ChunkSource for MemoryChunks {
    fn shape(&self) -> Vec<usize> {
        self.data.shape().to_vec()
    }

    fn native(&self) -> NativeType {
        self.data.native()
    }

    fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }

    fn read_rows(&self, start: usize, end: usize) -> Result<DataArray> {
        self.data
            .slice(&[crate::constraint::slice::DimSlice::Range { start, end }])
    }
}

/// Buffer attached to an array-bearing node: either fully materialized
/// or a chunked source read during emission.
#[derive(Clone)]
pub enum DapData {
    /// Fully in-memory buffer
    Flat(DataArray),
    /// Lazy buffer read in row blocks
    Chunked(Arc<dyn ChunkSource>),
}

impl DapData {
    /// Full shape of the buffer.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            DapData::Flat(array) => array.shape().to_vec(),
            DapData::Chunked(source) => source.shape(),
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        match self {
            DapData::Flat(array) => array.rank(),
            DapData::Chunked(source) => source.shape().len(),
        }
    }

    /// Native element type.
    pub fn native(&self) -> NativeType {
        match self {
            DapData::Flat(array) => array.native(),
            DapData::Chunked(source) => source.native(),
        }
    }
}

impl From<DataArray> for DapData {
    fn from(array: DataArray) -> Self {
        DapData::Flat(array)
    }
}

impl From<MemoryChunks> for DapData {
    fn from(source: MemoryChunks) -> Self {
        DapData::Chunked(Arc::new(source))
    }
}

impl From<Arc<dyn ChunkSource>> for DapData {
    fn from(source: Arc<dyn ChunkSource>) -> Self {
        DapData::Chunked(source)
    }
}

impl fmt::Debug for DapData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DapData::Flat(array) => f.debug_tuple("Flat").field(array).finish(),
            DapData::Chunked(source) => f
                .debug_struct("Chunked")
                .field("shape", &source.shape())
                .field("chunk_rows", &source.chunk_rows())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::array::ArrayValues;

    #[test]
    fn test_memory_chunks_reads_row_blocks() {
        let data = DataArray::from_shape_vec(vec![4, 2], vec![0i32, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        let source = MemoryChunks::new(data, 2).unwrap();
        let block = source.read_rows(1, 3).unwrap();
        assert_eq!(block.shape(), &[2, 2]);
        assert_eq!(block.values(), &ArrayValues::I32(vec![2, 3, 4, 5]));
    }

    #[test]
    fn test_memory_chunks_rejects_rank_0() {
        let data = DataArray::from_shape_vec(vec![], vec![1i32]).unwrap();
        assert!(MemoryChunks::new(data, 1).is_err());
    }

    #[test]
    fn test_memory_chunks_rejects_zero_extent() {
        let data = DataArray::vector(vec![1i32]);
        assert!(MemoryChunks::new(data, 0).is_err());
    }

    #[test]
    fn test_dap_data_shape_agrees() {
        let data = DataArray::from_shape_vec(vec![3, 2], vec![0f32; 6]).unwrap();
        let flat = DapData::from(data.clone());
        let chunked = DapData::from(MemoryChunks::new(data, 1).unwrap());
        assert_eq!(flat.shape(), chunked.shape());
        assert_eq!(flat.native(), chunked.native());
    }
}
