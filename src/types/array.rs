// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed N-dimensional buffers.
//!
//! [`DataArray`] is the in-memory buffer the emitters consume: a shape
//! plus row-major element storage tagged by native type. Slicing follows
//! hyperslab semantics: plain indices collapse their axis, ranges are
//! half-open and clamp to the dimension, missing trailing selectors keep
//! whole axes.

use crate::constraint::slice::DimSlice;
use crate::core::error::{DapError, Result};
use crate::core::types::NativeType;

/// Row-major element storage, tagged by native type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Run `$body` once per variant with `$v` bound to the element vec.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ArrayValues::I8($v) => $body,
            ArrayValues::U8($v) => $body,
            ArrayValues::I16($v) => $body,
            ArrayValues::U16($v) => $body,
            ArrayValues::I32($v) => $body,
            ArrayValues::U32($v) => $body,
            ArrayValues::I64($v) => $body,
            ArrayValues::U64($v) => $body,
            ArrayValues::F32($v) => $body,
            ArrayValues::F64($v) => $body,
        }
    };
}

pub(crate) use with_values;

impl ArrayValues {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    /// Whether the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Native type of the stored elements.
    pub fn native(&self) -> NativeType {
        match self {
            ArrayValues::I8(_) => NativeType::I8,
            ArrayValues::U8(_) => NativeType::U8,
            ArrayValues::I16(_) => NativeType::I16,
            ArrayValues::U16(_) => NativeType::U16,
            ArrayValues::I32(_) => NativeType::I32,
            ArrayValues::U32(_) => NativeType::U32,
            ArrayValues::I64(_) => NativeType::I64,
            ArrayValues::U64(_) => NativeType::U64,
            ArrayValues::F32(_) => NativeType::F32,
            ArrayValues::F64(_) => NativeType::F64,
        }
    }

    /// Select elements by flat index, preserving the tag.
    fn gather(&self, indices: &[usize]) -> ArrayValues {
        match self {
            ArrayValues::I8(v) => ArrayValues::I8(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::U8(v) => ArrayValues::U8(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::I16(v) => ArrayValues::I16(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::U16(v) => ArrayValues::U16(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::I32(v) => ArrayValues::I32(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::U32(v) => ArrayValues::U32(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::I64(v) => ArrayValues::I64(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::U64(v) => ArrayValues::U64(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::F32(v) => ArrayValues::F32(indices.iter().map(|&i| v[i]).collect()),
            ArrayValues::F64(v) => ArrayValues::F64(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Native element types that can back an [`ArrayValues`].
pub trait Element: Copy {
    /// Wrap a vec of elements into tagged storage.
    fn wrap(values: Vec<Self>) -> ArrayValues;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl Element for $ty {
            fn wrap(values: Vec<Self>) -> ArrayValues {
                ArrayValues::$variant(values)
            }
        })*
    };
}

impl_element!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

/// A typed N-dimensional buffer with row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    shape: Vec<usize>,
    values: ArrayValues,
}

impl DataArray {
    /// Create a buffer from a shape and tagged storage.
    ///
    /// The element count must equal the shape product.
    pub fn new(shape: Vec<usize>, values: ArrayValues) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(DapError::invariant_violation(format!(
                "shape {:?} wants {} elements, storage has {}",
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }

    /// Create a buffer from a shape and a typed element vec.
    pub fn from_shape_vec<T: Element>(shape: Vec<usize>, values: Vec<T>) -> Result<Self> {
        Self::new(shape, T::wrap(values))
    }

    /// Create a 1-D buffer from a typed element vec.
    pub fn vector<T: Element>(values: Vec<T>) -> Self {
        let shape = vec![values.len()];
        Self {
            shape,
            values: T::wrap(values),
        }
    }

    /// The buffer's shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Native type of the elements.
    pub fn native(&self) -> NativeType {
        self.values.native()
    }

    /// The tagged element storage.
    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    /// Apply per-dimension selectors, producing a new buffer.
    ///
    /// `Index` collapses its axis, `Range` keeps a clamped half-open
    /// window, `All` keeps the whole axis. Missing trailing selectors
    /// are `All`.
    pub fn slice(&self, selectors: &[DimSlice]) -> Result<DataArray> {
        let axes = resolve_axes(&self.shape, selectors)?;
        let out_shape: Vec<usize> = axes.iter().filter(|a| a.keep).map(|a| a.len).collect();

        let rank = self.shape.len();
        let mut strides = vec![1usize; rank];
        for i in (0..rank.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * self.shape[i + 1];
        }

        let total: usize = axes.iter().map(|a| a.len).product();
        let mut indices = Vec::with_capacity(total);
        let mut counters = vec![0usize; rank];
        for _ in 0..total {
            let flat: usize = axes
                .iter()
                .zip(&counters)
                .zip(&strides)
                .map(|((axis, &c), &stride)| (axis.offset + c) * stride)
                .sum();
            indices.push(flat);
            for axis in (0..rank).rev() {
                counters[axis] += 1;
                if counters[axis] < axes[axis].len {
                    break;
                }
                counters[axis] = 0;
            }
        }

        DataArray::new(out_shape, self.values.gather(&indices))
    }
}

/// One resolved axis window.
struct AxisWindow {
    offset: usize,
    len: usize,
    keep: bool,
}

fn resolve_axes(shape: &[usize], selectors: &[DimSlice]) -> Result<Vec<AxisWindow>> {
    check_excess(shape, selectors)?;
    shape
        .iter()
        .enumerate()
        .map(|(axis, &dim)| {
            match selectors.get(axis).copied().unwrap_or(DimSlice::All) {
                DimSlice::All => Ok(AxisWindow {
                    offset: 0,
                    len: dim,
                    keep: true,
                }),
                DimSlice::Index(n) => {
                    if n >= dim {
                        return Err(DapError::bad_slice(
                            n.to_string(),
                            format!("index out of range for axis {axis} of length {dim}"),
                        ));
                    }
                    Ok(AxisWindow {
                        offset: n,
                        len: 1,
                        keep: false,
                    })
                }
                DimSlice::Range { start, end } => {
                    let start = start.min(dim);
                    let end = end.min(dim);
                    Ok(AxisWindow {
                        offset: start,
                        len: end.saturating_sub(start),
                        keep: true,
                    })
                }
            }
        })
        .collect()
}

fn check_excess(shape: &[usize], selectors: &[DimSlice]) -> Result<()> {
    for selector in selectors.iter().skip(shape.len()) {
        if !matches!(selector, DimSlice::All) {
            return Err(DapError::bad_slice(
                format!("{selector:?}"),
                format!("more index groups than array rank {}", shape.len()),
            ));
        }
    }
    Ok(())
}

/// Shape of a sliced view, without touching element data.
///
/// Used by DDS emission, where only the dimension lengths matter, and by
/// the encoder's length-prefix computation.
pub fn sliced_shape(shape: &[usize], selectors: &[DimSlice]) -> Result<Vec<usize>> {
    let axes = resolve_axes(shape, selectors)?;
    Ok(axes.iter().filter(|a| a.keep).map(|a| a.len).collect())
}
