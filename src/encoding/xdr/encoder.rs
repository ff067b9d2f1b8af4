// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XDR encoder for DODS data sections.
//!
//! Scalars are written bare; arrays get the doubled big-endian element
//! count followed by the row-major payload. Chunked buffers are read in
//! row blocks along axis 0 and grouped up to the encoder's target yield
//! size, so peak memory stays bounded by the target plus one native
//! chunk.

use byteorder::{BigEndian, WriteBytesExt};

use super::encode_chunk_size;
use crate::constraint::slice::DimSlice;
use crate::core::error::{DapError, Result};
use crate::core::types::{DapType, NativeType};
use crate::core::value::ScalarValue;
use crate::core::ByteStream;
use crate::types::array::{sliced_shape, with_values, ArrayValues, DataArray};
use crate::types::chunked::{ChunkSource, DapData};

/// Streaming XDR encoder.
///
/// Construction snapshots the process-wide chunk target; use
/// [`XdrEncoder::with_chunk_target`] to pin a specific size.
#[derive(Debug, Clone, Copy)]
pub struct XdrEncoder {
    chunk_target: usize,
}

impl Default for XdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl XdrEncoder {
    /// Create an encoder using the process-wide chunk target.
    pub fn new() -> Self {
        Self {
            chunk_target: encode_chunk_size(),
        }
    }

    /// Create an encoder with an explicit chunk target.
    pub fn with_chunk_target(bytes: usize) -> Result<Self> {
        if bytes == 0 {
            return Err(DapError::invariant_violation(
                "encode chunk size must be positive",
            ));
        }
        Ok(Self {
            chunk_target: bytes,
        })
    }

    /// The target yield size for chunked emission.
    pub fn chunk_target(&self) -> usize {
        self.chunk_target
    }

    /// Encode a scalar value. No length prefix is written.
    ///
    /// Numeric scalars become the big-endian wire form of `dtype`;
    /// `String` and `URL` scalars are their ASCII bytes.
    pub fn encode_scalar(&self, value: &ScalarValue, dtype: DapType) -> Result<Vec<u8>> {
        match dtype {
            DapType::String | DapType::Url => {
                let ScalarValue::Text(text) = value else {
                    return Err(DapError::encoding_mismatch(
                        dtype.label(),
                        value.native().name(),
                        "only text scalars encode as strings",
                    ));
                };
                if !text.is_ascii() {
                    return Err(DapError::encoding_mismatch(
                        dtype.label(),
                        "str",
                        "DAP strings are ASCII",
                    ));
                }
                Ok(text.as_bytes().to_vec())
            }
            DapType::Byte => {
                let x = self.scalar_i64(value, dtype)?;
                Ok(vec![x as u8])
            }
            DapType::Int16 | DapType::Int32 => {
                let x = self.scalar_i64(value, dtype)?;
                let mut out = Vec::with_capacity(4);
                out.write_i32::<BigEndian>(x as i32)?;
                Ok(out)
            }
            DapType::UInt16 | DapType::UInt32 => {
                let x = self.scalar_i64(value, dtype)?;
                let mut out = Vec::with_capacity(4);
                out.write_u32::<BigEndian>(x as u32)?;
                Ok(out)
            }
            DapType::Float32 => {
                let x = self.scalar_f64(value, dtype)?;
                let mut out = Vec::with_capacity(4);
                out.write_f32::<BigEndian>(x as f32)?;
                Ok(out)
            }
            DapType::Float64 => {
                let x = self.scalar_f64(value, dtype)?;
                let mut out = Vec::with_capacity(8);
                out.write_f64::<BigEndian>(x)?;
                Ok(out)
            }
        }
    }

    /// Encode a sliced array buffer as a lazy chunk stream.
    ///
    /// The first chunk is the doubled big-endian element count of the
    /// sliced view; payload chunks follow. Slicing an array down to a
    /// single element or rank 0 keeps the prefix; only true scalars go
    /// through [`XdrEncoder::encode_scalar`].
    pub fn encode_array<'a>(
        &self,
        data: &'a DapData,
        selectors: &[DimSlice],
        dtype: DapType,
    ) -> ByteStream<'a> {
        let selectors = selectors.to_vec();
        let shape = data.shape();
        let sliced = match sliced_shape(&shape, &selectors) {
            Ok(s) => s,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };
        let count: usize = sliced.iter().product();
        let prefix = match u32::try_from(count)
            .map_err(|_| DapError::invariant_violation("array element count exceeds u32 range"))
            .and_then(length_prefix)
        {
            Ok(p) => p,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        match data {
            DapData::Flat(array) => Box::new(std::iter::once(Ok(prefix)).chain(
                std::iter::once_with(move || {
                    let view = array.slice(&selectors)?;
                    payload_bytes(&view, dtype)
                }),
            )),
            DapData::Chunked(source) => Box::new(std::iter::once(Ok(prefix)).chain(
                ChunkedPayload::new(&**source, selectors, dtype, self.chunk_target),
            )),
        }
    }

    fn scalar_i64(&self, value: &ScalarValue, dtype: DapType) -> Result<i64> {
        value.as_i64().ok_or_else(|| {
            DapError::encoding_mismatch(
                dtype.label(),
                value.native().name(),
                "text scalars have no numeric wire form",
            )
        })
    }

    fn scalar_f64(&self, value: &ScalarValue, dtype: DapType) -> Result<f64> {
        value.as_f64().ok_or_else(|| {
            DapError::encoding_mismatch(
                dtype.label(),
                value.native().name(),
                "text scalars have no numeric wire form",
            )
        })
    }
}

/// The doubled big-endian element count preceding every array payload.
fn length_prefix(count: u32) -> Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(8);
    prefix.write_u32::<BigEndian>(count)?;
    prefix.write_u32::<BigEndian>(count)?;
    Ok(prefix)
}

/// Reject declared types that cannot carry the buffer's elements.
///
/// `i64`/`u64` are exempt from the narrowing check: the platform type
/// table mandates their 32-bit wire mapping, so they cast with wrapping
/// semantics.
fn check_compat(native: NativeType, dtype: DapType) -> Result<()> {
    match dtype {
        DapType::String | DapType::Url => Err(DapError::encoding_mismatch(
            dtype.label(),
            native.name(),
            "numeric buffers cannot be re-encoded as text",
        )),
        DapType::Byte if native.width() > 1 => Err(DapError::encoding_mismatch(
            dtype.label(),
            native.name(),
            "octet target narrower than source elements",
        )),
        _ => {
            let wire = dtype.wire_width().unwrap_or(0);
            let exempt = matches!(native, NativeType::I64 | NativeType::U64);
            if native.width() > wire && !exempt {
                return Err(DapError::encoding_mismatch(
                    dtype.label(),
                    native.name(),
                    "wire form narrower than source elements",
                ));
            }
            Ok(())
        }
    }
}

/// Row-major big-endian payload of a materialized view.
fn payload_bytes(view: &DataArray, dtype: DapType) -> Result<Vec<u8>> {
    check_compat(view.native(), dtype)?;
    let mut out = Vec::with_capacity(view.len() * dtype.wire_width().unwrap_or(1));
    match dtype {
        DapType::Byte => {
            with_values!(view.values(), v => for &x in v { out.write_u8(x as u8)?; })
        }
        DapType::Int16 | DapType::Int32 => {
            with_values!(view.values(), v => for &x in v { out.write_i32::<BigEndian>(x as i32)?; })
        }
        DapType::UInt16 | DapType::UInt32 => {
            with_values!(view.values(), v => for &x in v { out.write_u32::<BigEndian>(x as u32)?; })
        }
        DapType::Float32 => {
            with_values!(view.values(), v => for &x in v { out.write_f32::<BigEndian>(x as f32)?; })
        }
        DapType::Float64 => {
            with_values!(view.values(), v => for &x in v { out.write_f64::<BigEndian>(x as f64)?; })
        }
        DapType::String | DapType::Url => {
            return Err(DapError::encoding_mismatch(
                dtype.label(),
                view.native().name(),
                "numeric buffers cannot be re-encoded as text",
            ));
        }
    }
    Ok(out)
}

/// Lazy payload iterator over a chunked source.
///
/// Reads native row blocks intersecting the axis-0 selection, slices the
/// remaining axes per block, and groups encoded bytes up to the target
/// yield size.
struct ChunkedPayload<'a> {
    source: &'a dyn ChunkSource,
    block_selectors: Vec<DimSlice>,
    dtype: DapType,
    target: usize,
    next_row: usize,
    end_row: usize,
    chunk_rows: usize,
    pending: Option<DapError>,
    failed: bool,
}

impl<'a> ChunkedPayload<'a> {
    fn new(
        source: &'a dyn ChunkSource,
        selectors: Vec<DimSlice>,
        dtype: DapType,
        target: usize,
    ) -> Self {
        let shape = source.shape();
        let (next_row, end_row, pending) = match shape.first() {
            None => (
                0,
                0,
                Some(DapError::invariant_violation(
                    "chunked sources must have at least one axis",
                )),
            ),
            Some(&rows) => match selectors.first().copied().unwrap_or(DimSlice::All) {
                DimSlice::All => (0, rows, None),
                DimSlice::Index(n) => (n, n + 1, None),
                DimSlice::Range { start, end } => (start.min(rows), end.min(rows), None),
            },
        };
        let mut block_selectors = vec![DimSlice::All];
        block_selectors.extend(selectors.iter().skip(1).copied());
        Self {
            source,
            block_selectors,
            dtype,
            target,
            next_row,
            end_row,
            chunk_rows: source.chunk_rows().max(1),
            pending,
            failed: false,
        }
    }
}

impl Iterator for ChunkedPayload<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(err) = self.pending.take() {
            self.failed = true;
            return Some(Err(err));
        }
        if self.next_row >= self.end_row {
            return None;
        }

        let mut out = Vec::new();
        while self.next_row < self.end_row && out.len() < self.target {
            let boundary = ((self.next_row / self.chunk_rows) + 1) * self.chunk_rows;
            let block_end = boundary.min(self.end_row);
            let result = self
                .source
                .read_rows(self.next_row, block_end)
                .and_then(|block| block.slice(&self.block_selectors))
                .and_then(|view| payload_bytes(&view, self.dtype));
            match result {
                Ok(bytes) => out.extend_from_slice(&bytes),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
            self.next_row = block_end;
        }
        Some(Ok(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chunked::MemoryChunks;

    fn collect_bytes(stream: ByteStream<'_>) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in stream {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[test]
    fn test_scalar_float32_zero() {
        let encoder = XdrEncoder::new();
        let bytes = encoder
            .encode_scalar(&ScalarValue::Float32(0.0), DapType::Float32)
            .unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_scalar_int16_widens_to_four_bytes() {
        let encoder = XdrEncoder::new();
        let bytes = encoder
            .encode_scalar(&ScalarValue::Int16(-2), DapType::Int16)
            .unwrap();
        assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFE]);
    }

    #[test]
    fn test_scalar_byte_single_octet() {
        let encoder = XdrEncoder::new();
        let bytes = encoder
            .encode_scalar(&ScalarValue::Byte(0x7F), DapType::Byte)
            .unwrap();
        assert_eq!(bytes, vec![0x7F]);
    }

    #[test]
    fn test_scalar_string_is_bare_ascii() {
        let encoder = XdrEncoder::new();
        let bytes = encoder
            .encode_scalar(&ScalarValue::from("second"), DapType::String)
            .unwrap();
        assert_eq!(bytes, b"second");
    }

    #[test]
    fn test_scalar_string_rejects_non_ascii() {
        let encoder = XdrEncoder::new();
        let err = encoder
            .encode_scalar(&ScalarValue::from("mètre"), DapType::String)
            .unwrap_err();
        assert!(matches!(err, DapError::EncodingMismatch { .. }));
    }

    #[test]
    fn test_scalar_text_has_no_numeric_form() {
        let encoder = XdrEncoder::new();
        let err = encoder
            .encode_scalar(&ScalarValue::from("x"), DapType::Int32)
            .unwrap_err();
        assert!(matches!(err, DapError::EncodingMismatch { .. }));
    }

    #[test]
    fn test_array_prefix_is_doubled_count() {
        let encoder = XdrEncoder::new();
        let data = DapData::from(DataArray::vector(vec![1i32, 2, 3]));
        let bytes = collect_bytes(encoder.encode_array(&data, &[DimSlice::All], DapType::Int32));
        assert_eq!(&bytes[..8], &[0, 0, 0, 3, 0, 0, 0, 3]);
        assert_eq!(bytes.len(), 8 + 12);
    }

    #[test]
    fn test_int16_array_payload_widens() {
        let encoder = XdrEncoder::new();
        let data = DapData::from(DataArray::vector(vec![0i16, 1]));
        let bytes = collect_bytes(encoder.encode_array(&data, &[DimSlice::All], DapType::Int16));
        assert_eq!(
            bytes,
            vec![0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_single_element_slice_keeps_prefix() {
        let encoder = XdrEncoder::new();
        let data = DapData::from(
            DataArray::from_shape_vec(vec![2, 2], vec![5i32, 6, 7, 8]).unwrap(),
        );
        let bytes = collect_bytes(encoder.encode_array(
            &data,
            &[DimSlice::Index(0), DimSlice::Index(1)],
            DapType::Int32,
        ));
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 6]);
    }

    #[test]
    fn test_chunked_equals_flat() {
        let values: Vec<f32> = (0..60).map(|i| i as f32).collect();
        let flat = DataArray::from_shape_vec(vec![12, 5], values).unwrap();
        let chunked = DapData::from(MemoryChunks::new(flat.clone(), 5).unwrap());
        let flat = DapData::from(flat);

        let encoder = XdrEncoder::with_chunk_target(64).unwrap();
        let selectors = [DimSlice::Range { start: 1, end: 11 }, DimSlice::Index(2)];
        let a = collect_bytes(encoder.encode_array(&flat, &selectors, DapType::Float32));
        let b = collect_bytes(encoder.encode_array(&chunked, &selectors, DapType::Float32));
        assert_eq!(a, b);
    }

    #[test]
    fn test_chunked_yields_grouped_chunks() {
        let values: Vec<f64> = (0..32).map(f64::from).collect();
        let source = MemoryChunks::new(DataArray::vector(values), 4).unwrap();
        let data = DapData::from(source);

        // 4 rows of f64 per native chunk = 32 bytes per block; a 64-byte
        // target groups two blocks per yield.
        let encoder = XdrEncoder::with_chunk_target(64).unwrap();
        let chunks: Vec<Vec<u8>> = encoder
            .encode_array(&data, &[DimSlice::All], DapType::Float64)
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(chunks[0].len(), 8);
        assert_eq!(chunks.len(), 1 + 4);
        assert!(chunks[1..].iter().all(|c| c.len() == 64));
    }

    #[test]
    fn test_encoding_mismatch_byte_for_wide_data() {
        let encoder = XdrEncoder::new();
        let data = DapData::from(DataArray::vector(vec![1i32, 2]));
        let result: Vec<_> = encoder
            .encode_array(&data, &[DimSlice::All], DapType::Byte)
            .collect();
        assert!(result
            .iter()
            .any(|r| matches!(r, Err(DapError::EncodingMismatch { .. }))));
    }

    #[test]
    fn test_encoding_mismatch_float64_to_float32() {
        let view = DataArray::vector(vec![1.0f64]);
        let err = payload_bytes(&view, DapType::Float32).unwrap_err();
        assert!(matches!(err, DapError::EncodingMismatch { .. }));
    }

    #[test]
    fn test_i64_buffer_encodes_as_int32_with_wrap() {
        let view = DataArray::vector(vec![1i64, -1]);
        let bytes = payload_bytes(&view, DapType::Int32).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_bad_selector_surfaces_before_payload() {
        let encoder = XdrEncoder::new();
        let data = DapData::from(DataArray::vector(vec![1u8, 2]));
        let first = encoder
            .encode_array(&data, &[DimSlice::Index(9)], DapType::Byte)
            .next()
            .unwrap();
        assert!(matches!(first, Err(DapError::BadSlice { .. })));
    }

    #[test]
    fn test_with_chunk_target_rejects_zero() {
        assert!(XdrEncoder::with_chunk_target(0).is_err());
    }
}
