// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The DAP atomic type registry.
//!
//! Every value that crosses the wire is declared as one of the closed set
//! of DAP 2.0 atomic types. Each type carries its DDS label, its logical
//! width, and its XDR wire width; [`DapType::from_native`] maps platform
//! numeric types onto the registry.

use serde::{Deserialize, Serialize};

use crate::core::error::{DapError, Result};

/// DAP 2.0 atomic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DapType {
    /// Unsigned octet
    Byte,
    /// 16-bit signed integer (32-bit on the wire)
    Int16,
    /// 16-bit unsigned integer (32-bit on the wire)
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 32-bit IEEE 754 float
    Float32,
    /// 64-bit IEEE 754 float
    Float64,
    /// ASCII string
    String,
    /// URL, same wire form as String
    Url,
}

/// Registry order. `from_native` picks the first entry whose width and
/// signedness match, after the special cases.
const REGISTRY: [DapType; 9] = [
    DapType::Byte,
    DapType::Int16,
    DapType::UInt16,
    DapType::Int32,
    DapType::UInt32,
    DapType::Float32,
    DapType::Float64,
    DapType::String,
    DapType::Url,
];

/// Numeric family of a type, used for registry matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Signed,
    Unsigned,
    Float,
    Text,
    Bool,
}

impl DapType {
    /// The DDS label, exactly as it appears in response text.
    pub fn label(&self) -> &'static str {
        match self {
            DapType::Byte => "Byte",
            DapType::Int16 => "Int16",
            DapType::UInt16 => "UInt16",
            DapType::Int32 => "Int32",
            DapType::UInt32 => "UInt32",
            DapType::Float32 => "Float32",
            DapType::Float64 => "Float64",
            DapType::String => "String",
            DapType::Url => "URL",
        }
    }

    /// Logical element width in bytes; `None` for variable-width types.
    pub fn width(&self) -> Option<usize> {
        match self {
            DapType::Byte => Some(1),
            DapType::Int16 | DapType::UInt16 => Some(2),
            DapType::Int32 | DapType::UInt32 | DapType::Float32 => Some(4),
            DapType::Float64 => Some(8),
            DapType::String | DapType::Url => None,
        }
    }

    /// Width of one element in the XDR wire form.
    ///
    /// DAP widens 16-bit integers to 32-bit words on the wire; `Byte`
    /// stays a single octet.
    pub fn wire_width(&self) -> Option<usize> {
        match self {
            DapType::Byte => Some(1),
            DapType::Int16 | DapType::UInt16 | DapType::Int32 | DapType::UInt32 => Some(4),
            DapType::Float32 => Some(4),
            DapType::Float64 => Some(8),
            DapType::String | DapType::Url => None,
        }
    }

    /// Wire byte-order tag. All DAP types are big-endian.
    pub fn byte_order(&self) -> char {
        '>'
    }

    /// Whether DAS values of this type are printed double-quoted.
    pub fn is_quoted(&self) -> bool {
        matches!(self, DapType::String | DapType::Url)
    }

    fn family(&self) -> Family {
        match self {
            DapType::Byte | DapType::UInt16 | DapType::UInt32 => Family::Unsigned,
            DapType::Int16 | DapType::Int32 => Family::Signed,
            DapType::Float32 | DapType::Float64 => Family::Float,
            DapType::String | DapType::Url => Family::Text,
        }
    }

    fn matches_native(&self, native: NativeType) -> bool {
        if self.family() != native.family() {
            return false;
        }
        match self.width() {
            Some(w) => w == native.width(),
            None => native.family() == Family::Text,
        }
    }

    /// Map a platform type onto the registry.
    ///
    /// Special cases first: `i8` widens to `Int16`, `u8` is `Byte`, and
    /// the 64-bit integers map onto the 32-bit wire types. Everything
    /// else takes the first registry entry with matching width and
    /// signedness; no match is an error.
    pub fn from_native(native: NativeType) -> Result<DapType> {
        match native {
            NativeType::I8 => Ok(DapType::Int16),
            NativeType::U8 => Ok(DapType::Byte),
            NativeType::I64 => Ok(DapType::Int32),
            NativeType::U64 => Ok(DapType::UInt32),
            _ => REGISTRY
                .iter()
                .copied()
                .find(|t| t.matches_native(native))
                .ok_or_else(|| DapError::unsupported_type(native.name())),
        }
    }
}

impl std::fmt::Display for DapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform element types that buffers and scalars can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Str,
}

impl NativeType {
    /// Element width in bytes. Variable-width `Str` reports 0.
    pub fn width(&self) -> usize {
        match self {
            NativeType::Bool | NativeType::I8 | NativeType::U8 => 1,
            NativeType::I16 | NativeType::U16 => 2,
            NativeType::I32 | NativeType::U32 | NativeType::F32 => 4,
            NativeType::I64 | NativeType::U64 | NativeType::F64 => 8,
            NativeType::Str => 0,
        }
    }

    /// Rust-facing type name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NativeType::Bool => "bool",
            NativeType::I8 => "i8",
            NativeType::U8 => "u8",
            NativeType::I16 => "i16",
            NativeType::U16 => "u16",
            NativeType::I32 => "i32",
            NativeType::U32 => "u32",
            NativeType::I64 => "i64",
            NativeType::U64 => "u64",
            NativeType::F32 => "f32",
            NativeType::F64 => "f64",
            NativeType::Str => "str",
        }
    }

    fn family(&self) -> Family {
        match self {
            NativeType::Bool => Family::Bool,
            NativeType::I8 | NativeType::I16 | NativeType::I32 | NativeType::I64 => Family::Signed,
            NativeType::U8 | NativeType::U16 | NativeType::U32 | NativeType::U64 => {
                Family::Unsigned
            }
            NativeType::F32 | NativeType::F64 => Family::Float,
            NativeType::Str => Family::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DapType::Int16.label(), "Int16");
        assert_eq!(DapType::Url.label(), "URL");
        assert_eq!(DapType::Float64.to_string(), "Float64");
    }

    #[test]
    fn test_widths() {
        assert_eq!(DapType::Byte.width(), Some(1));
        assert_eq!(DapType::Int16.width(), Some(2));
        assert_eq!(DapType::Float64.width(), Some(8));
        assert_eq!(DapType::String.width(), None);
    }

    #[test]
    fn test_wire_widens_16_bit() {
        assert_eq!(DapType::Int16.wire_width(), Some(4));
        assert_eq!(DapType::UInt16.wire_width(), Some(4));
        assert_eq!(DapType::Byte.wire_width(), Some(1));
    }

    #[test]
    fn test_byte_order_tag() {
        assert_eq!(DapType::Int32.byte_order(), '>');
    }

    #[test]
    fn test_from_native_special_cases() {
        assert_eq!(DapType::from_native(NativeType::I8).unwrap(), DapType::Int16);
        assert_eq!(DapType::from_native(NativeType::U8).unwrap(), DapType::Byte);
        assert_eq!(DapType::from_native(NativeType::I64).unwrap(), DapType::Int32);
        assert_eq!(DapType::from_native(NativeType::U64).unwrap(), DapType::UInt32);
    }

    #[test]
    fn test_from_native_by_width_and_signedness() {
        assert_eq!(DapType::from_native(NativeType::I16).unwrap(), DapType::Int16);
        assert_eq!(DapType::from_native(NativeType::U16).unwrap(), DapType::UInt16);
        assert_eq!(DapType::from_native(NativeType::I32).unwrap(), DapType::Int32);
        assert_eq!(DapType::from_native(NativeType::U32).unwrap(), DapType::UInt32);
        assert_eq!(DapType::from_native(NativeType::F32).unwrap(), DapType::Float32);
        assert_eq!(DapType::from_native(NativeType::F64).unwrap(), DapType::Float64);
        assert_eq!(DapType::from_native(NativeType::Str).unwrap(), DapType::String);
    }

    #[test]
    fn test_from_native_unsupported() {
        let err = DapType::from_native(NativeType::Bool).unwrap_err();
        assert!(matches!(err, DapError::UnsupportedType { .. }));
    }

    #[test]
    fn test_quoting() {
        assert!(DapType::String.is_quoted());
        assert!(DapType::Url.is_quoted());
        assert!(!DapType::Float64.is_quoted());
    }
}
