// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar variables and metadata attributes.

use crate::constraint::Constraint;
use crate::core::{ByteStream, DapError, DapType, ScalarValue, TextStream};
use crate::encoding::XdrEncoder;
use crate::model::{container_das, sanitize_name, DapNode, Scope};

/// A named scalar of one of the DAP atomic types.
///
/// Children are metadata attributes, visible in DAS only.
#[derive(Debug, Clone)]
pub struct Atom {
    name: String,
    dtype: DapType,
    value: Option<ScalarValue>,
    children: Vec<DapNode>,
}

impl Atom {
    /// Create a scalar variable without a value (schema use).
    pub fn new(name: impl AsRef<str>, dtype: DapType) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a scalar variable carrying a value.
    pub fn with_value(
        name: impl AsRef<str>,
        dtype: DapType,
        value: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Append an attribute child.
    pub fn append(&mut self, child: impl Into<DapNode>) {
        self.children.push(child.into());
    }

    /// The variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared DAP type.
    pub fn dtype(&self) -> DapType {
        self.dtype
    }

    /// The carried value, if any.
    pub fn value(&self) -> Option<&ScalarValue> {
        self.value.as_ref()
    }

    pub(crate) fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        let line = format!("{}{} {};\n", scope.indent(), self.dtype.label(), self.name);
        Box::new(std::iter::once(Ok(line)))
    }

    pub(crate) fn das<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        container_das(&self.name, &self.children, &scope, constraint)
    }

    pub(crate) fn dods_data<'a>(
        &'a self,
        scope: Scope,
        constraint: &'a Constraint,
    ) -> ByteStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        match &self.value {
            Some(value) => {
                let dtype = self.dtype;
                Box::new(std::iter::once_with(move || {
                    XdrEncoder::new().encode_scalar(value, dtype)
                }))
            }
            None => Box::new(std::iter::once(Err(DapError::invariant_violation(format!(
                "atom '{}' has no value to emit",
                self.name
            ))))),
        }
    }
}

/// A metadata leaf. Contributes to DAS only.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    dtype: DapType,
    value: ScalarValue,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(
        name: impl AsRef<str>,
        dtype: DapType,
        value: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            value: value.into(),
        }
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared DAP type.
    pub fn dtype(&self) -> DapType {
        self.dtype
    }

    /// The attribute value.
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// The DAS line. String values are double-quoted; emission is
    /// unconditional since the enclosing node already matched.
    pub(crate) fn das<'a>(&'a self, scope: Scope) -> TextStream<'a> {
        let quote = if self.dtype.is_quoted() { "\"" } else { "" };
        let line = format!(
            "{}{} {} {}{}{};\n",
            scope.indent(),
            self.dtype.label(),
            self.name,
            quote,
            self.value.das_literal(),
            quote,
        );
        Box::new(std::iter::once(Ok(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(stream: TextStream<'_>) -> String {
        stream.map(|chunk| chunk.unwrap()).collect()
    }

    #[test]
    fn test_atom_dds_line() {
        let atom = Atom::with_value("depth", DapType::Float32, 1.5f32);
        let constraint = Constraint::match_all();
        let text = collect(atom.dds(Scope::root().child("depth"), &constraint));
        assert_eq!(text, "    Float32 depth;\n");
    }

    #[test]
    fn test_atom_respects_constraint() {
        let atom = Atom::with_value("depth", DapType::Float32, 1.5f32);
        let constraint = Constraint::parse("other").unwrap();
        let text = collect(atom.dds(Scope::root().child("depth"), &constraint));
        assert!(text.is_empty());
    }

    #[test]
    fn test_atom_without_value_fails_dods() {
        let atom = Atom::new("depth", DapType::Float32);
        let constraint = Constraint::match_all();
        let chunks: Vec<_> = atom
            .dods_data(Scope::root().child("depth"), &constraint)
            .collect();
        assert!(matches!(
            chunks.as_slice(),
            [Err(DapError::InternalInvariant { .. })]
        ));
    }

    #[test]
    fn test_string_attribute_is_quoted() {
        let attr = Attribute::new("units", DapType::String, "second");
        let text = collect(attr.das(Scope::root().child("p").child("units")));
        assert_eq!(text, "        String units \"second\";\n");
    }

    #[test]
    fn test_float_attribute_is_unquoted_with_decimal_point() {
        let attr = Attribute::new("size", DapType::Float64, 4.0f64);
        let text = collect(attr.das(Scope::root().child("p").child("size")));
        assert_eq!(text, "        Float64 size 4.0;\n");
    }

    #[test]
    fn test_atom_das_block() {
        let mut atom = Atom::with_value("t", DapType::Int32, 3i32);
        atom.append(Attribute::new("units", DapType::String, "s"));
        let constraint = Constraint::match_all();
        let text = collect(atom.das(Scope::root().child("t"), &constraint));
        assert_eq!(text, "    t {\n        String units \"s\";\n    }\n");
    }
}
