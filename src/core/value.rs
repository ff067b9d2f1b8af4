// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar value representation for atoms and attributes.
//!
//! A [`ScalarValue`] is the payload of a named scalar variable or a
//! metadata attribute. All variants are serde-serializable.

use serde::{Deserialize, Serialize};

use crate::core::types::NativeType;

/// A single typed value held by an atom or an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
    Text(String),
}

impl ScalarValue {
    /// The native type of this value.
    pub fn native(&self) -> NativeType {
        match self {
            ScalarValue::Byte(_) => NativeType::U8,
            ScalarValue::Int16(_) => NativeType::I16,
            ScalarValue::UInt16(_) => NativeType::U16,
            ScalarValue::Int32(_) => NativeType::I32,
            ScalarValue::UInt32(_) => NativeType::U32,
            ScalarValue::Float32(_) => NativeType::F32,
            ScalarValue::Float64(_) => NativeType::F64,
            ScalarValue::Text(_) => NativeType::Str,
        }
    }

    /// Check if this value is numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ScalarValue::Text(_))
    }

    /// Integer view of a numeric value; floats truncate. `None` for text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Byte(v) => Some(i64::from(*v)),
            ScalarValue::Int16(v) => Some(i64::from(*v)),
            ScalarValue::UInt16(v) => Some(i64::from(*v)),
            ScalarValue::Int32(v) => Some(i64::from(*v)),
            ScalarValue::UInt32(v) => Some(i64::from(*v)),
            ScalarValue::Float32(v) => Some(*v as i64),
            ScalarValue::Float64(v) => Some(*v as i64),
            ScalarValue::Text(_) => None,
        }
    }

    /// Float view of a numeric value. `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Byte(v) => Some(f64::from(*v)),
            ScalarValue::Int16(v) => Some(f64::from(*v)),
            ScalarValue::UInt16(v) => Some(f64::from(*v)),
            ScalarValue::Int32(v) => Some(f64::from(*v)),
            ScalarValue::UInt32(v) => Some(f64::from(*v)),
            ScalarValue::Float32(v) => Some(f64::from(*v)),
            ScalarValue::Float64(v) => Some(*v),
            ScalarValue::Text(_) => None,
        }
    }

    /// Render the value as it appears in a DAS attribute line.
    ///
    /// Floats keep a trailing `.0` when integral so that `4.0` prints as
    /// `4.0`, matching reference server output. Quoting is the caller's
    /// concern.
    pub fn das_literal(&self) -> String {
        match self {
            ScalarValue::Byte(v) => v.to_string(),
            ScalarValue::Int16(v) => v.to_string(),
            ScalarValue::UInt16(v) => v.to_string(),
            ScalarValue::Int32(v) => v.to_string(),
            ScalarValue::UInt32(v) => v.to_string(),
            ScalarValue::Float32(v) => format!("{v:?}"),
            ScalarValue::Float64(v) => format!("{v:?}"),
            ScalarValue::Text(v) => v.clone(),
        }
    }
}

impl From<u8> for ScalarValue {
    fn from(v: u8) -> Self {
        ScalarValue::Byte(v)
    }
}

impl From<i16> for ScalarValue {
    fn from(v: i16) -> Self {
        ScalarValue::Int16(v)
    }
}

impl From<u16> for ScalarValue {
    fn from(v: u16) -> Self {
        ScalarValue::UInt16(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int32(v)
    }
}

impl From<u32> for ScalarValue {
    fn from(v: u32) -> Self {
        ScalarValue::UInt32(v)
    }
}

impl From<f32> for ScalarValue {
    fn from(v: f32) -> Self {
        ScalarValue::Float32(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float64(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}
