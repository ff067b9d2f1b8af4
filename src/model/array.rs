// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Array-bearing nodes: plain arrays and grids with coordinate maps.

use crate::constraint::slice::DimSlice;
use crate::constraint::Constraint;
use crate::core::{ByteStream, DapError, DapType, Result, TextStream};
use crate::encoding::XdrEncoder;
use crate::model::{container_das, sanitize_name, DapNode, Scope, INDENT};
use crate::types::array::sliced_shape;
use crate::types::chunked::DapData;

/// A typed N-dimensional variable.
///
/// DDS prints the sliced element count; DODS streams the sliced buffer
/// through the XDR encoder. Children are metadata attributes.
#[derive(Debug, Clone)]
pub struct Array {
    name: String,
    dtype: DapType,
    data: DapData,
    children: Vec<DapNode>,
}

impl Array {
    /// Create an array variable with an explicit DAP type.
    pub fn new(name: impl AsRef<str>, data: impl Into<DapData>, dtype: DapType) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            data: data.into(),
            children: Vec::new(),
        }
    }

    /// Create an array variable, mapping the buffer's native element
    /// type onto the DAP registry.
    pub fn with_inferred_type(name: impl AsRef<str>, data: impl Into<DapData>) -> Result<Self> {
        let data = data.into();
        let dtype = DapType::from_native(data.native())?;
        Ok(Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            data,
            children: Vec::new(),
        })
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

    /// The attached buffer.
    pub fn data(&self) -> &DapData {
        &self.data
    }

    /// The one-line DDS declaration for a given slice selection.
    pub(crate) fn dds_line(&self, scope: &Scope, selectors: &[DimSlice]) -> Result<String> {
        let length: usize = sliced_shape(&self.data.shape(), selectors)?
            .iter()
            .product();
        Ok(format!(
            "{}{} {}[{} = {}];\n",
            scope.indent(),
            self.dtype.label(),
            self.name,
            self.name,
            length
        ))
    }

    pub(crate) fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        Box::new(std::iter::once_with(move || {
            self.dds_line(&scope, constraint.selectors())
        }))
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
        XdrEncoder::new().encode_array(&self.data, constraint.selectors(), self.dtype)
    }
}

/// A typed array paired with one 1-D coordinate map per axis.
///
/// DDS prints the nested `Grid { Array: ... Maps: ... } name;` form;
/// DODS streams the primary buffer, then each map, in declaration order.
#[derive(Debug, Clone)]
pub struct Grid {
    name: String,
    dtype: DapType,
    data: DapData,
    dims: Vec<Array>,
    children: Vec<DapNode>,
}

impl Grid {
    /// Create a grid over the given coordinate maps.
    pub fn new(
        name: impl AsRef<str>,
        data: impl Into<DapData>,
        dtype: DapType,
        dims: Vec<Array>,
    ) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            dtype,
            data: data.into(),
            dims,
            children: Vec::new(),
        }
    }

    /// Append an attribute child.
    pub fn append(&mut self, child: impl Into<DapNode>) {
        self.children.push(child.into());
    }

    /// The grid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared DAP type of the primary array.
    pub fn dtype(&self) -> DapType {
        self.dtype
    }

    /// The primary buffer.
    pub fn data(&self) -> &DapData {
        &self.data
    }

    /// The coordinate maps, one per axis.
    pub fn dims(&self) -> &[Array] {
        &self.dims
    }

    /// Map count must equal rank and each map must be 1-D with the
    /// matching axis length.
    fn check_dims(&self) -> Result<()> {
        let shape = self.data.shape();
        if self.dims.len() != shape.len() {
            return Err(DapError::invariant_violation(format!(
                "grid '{}' has {} maps for rank {}",
                self.name,
                self.dims.len(),
                shape.len()
            )));
        }
        for (axis, dim) in self.dims.iter().enumerate() {
            let dim_shape = dim.data().shape();
            if dim_shape.len() != 1 || dim_shape[0] != shape[axis] {
                return Err(DapError::invariant_violation(format!(
                    "grid '{}' map '{}' does not cover axis {axis} of length {}",
                    self.name,
                    dim.name(),
                    shape[axis]
                )));
            }
        }
        Ok(())
    }

    fn build_dds(&self, scope: &Scope, constraint: &Constraint) -> Result<String> {
        self.check_dims()?;
        let indent = scope.indent();
        let mut out = format!("{indent}Grid {{\n{indent}  Array:\n");
        out.push_str(&format!(
            "{indent}{INDENT}{} {}",
            self.dtype.label(),
            self.name
        ));
        for (axis, dim) in self.dims.iter().enumerate() {
            let selector = [constraint.axis(axis)];
            let length: usize = sliced_shape(&dim.data().shape(), &selector)?
                .iter()
                .product();
            out.push_str(&format!("[{} = {}]", dim.name(), length));
        }
        out.push_str(";\n");
        out.push_str(&format!("{indent}  Maps:\n"));
        for (axis, dim) in self.dims.iter().enumerate() {
            let selector = [constraint.axis(axis)];
            out.push_str(&dim.dds_line(&scope.child(dim.name()), &selector)?);
        }
        out.push_str(&format!("{indent}}} {};\n", self.name));
        Ok(out)
    }

    pub(crate) fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        Box::new(std::iter::once_with(move || {
            self.build_dds(&scope, constraint)
        }))
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
        if let Err(err) = self.check_dims() {
            return Box::new(std::iter::once(Err(err)));
        }
        let primary = XdrEncoder::new().encode_array(&self.data, constraint.selectors(), self.dtype);
        let maps = self.dims.iter().enumerate().flat_map(move |(axis, dim)| {
            XdrEncoder::new().encode_array(dim.data(), &[constraint.axis(axis)], dim.dtype())
        });
        Box::new(primary.chain(maps))
    }
}
