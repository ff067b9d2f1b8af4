// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dataset root and structure groupings.

use crate::constraint::Constraint;
use crate::core::{ByteStream, TextStream};
use crate::model::{container_das, container_dds, sanitize_name, DapNode, Scope};

/// The root of a DAP tree.
///
/// Its DAS head prints the literal `Attributes` instead of the dataset
/// name, and its DODS data section opens with `Data:\r\n`.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    children: Vec<DapNode>,
}

impl Dataset {
    /// Data section marker separating DDS text from XDR payload.
    pub const DATA_MARKER: &'static [u8] = b"Data:\r\n";

    /// Create an empty dataset.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            children: Vec::new(),
        }
    }

    /// Append a child node. Emission order is append order.
    pub fn append(&mut self, child: impl Into<DapNode>) {
        self.children.push(child.into());
    }

    /// The dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dataset's children, in emission order.
    pub fn children(&self) -> &[DapNode] {
        &self.children
    }

    /// DDS text chunks for the whole tree.
    pub fn dds<'a>(&'a self, constraint: &'a Constraint) -> TextStream<'a> {
        container_dds(
            "Dataset",
            &self.name,
            &self.children,
            &Scope::root(),
            constraint,
        )
    }

    /// DAS text chunks for the whole tree.
    pub fn das<'a>(&'a self, constraint: &'a Constraint) -> TextStream<'a> {
        container_das("Attributes", &self.children, &Scope::root(), constraint)
    }

    /// DODS data section: `Data:\r\n`, then each child's payload.
    pub fn dods_data<'a>(&'a self, constraint: &'a Constraint) -> ByteStream<'a> {
        let scope = Scope::root();
        Box::new(
            std::iter::once(Ok(Self::DATA_MARKER.to_vec())).chain(
                self.children
                    .iter()
                    .flat_map(move |child| child.dods_data(scope.child(child.name()), constraint)),
            ),
        )
    }
}

/// A non-root grouping of nodes.
#[derive(Debug, Clone)]
pub struct Structure {
    name: String,
    children: Vec<DapNode>,
}

impl Structure {
    /// Create an empty structure.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn append(&mut self, child: impl Into<DapNode>) {
        self.children.push(child.into());
    }

    /// The structure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structure's children, in emission order.
    pub fn children(&self) -> &[DapNode] {
        &self.children
    }

    pub(crate) fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        container_dds("Structure", &self.name, &self.children, &scope, constraint)
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
        Box::new(
            self.children
                .iter()
                .flat_map(move |child| child.dods_data(scope.child(child.name()), constraint)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(stream: TextStream<'_>) -> String {
        stream.map(|chunk| chunk.unwrap()).collect()
    }

    #[test]
    fn test_name_sanitation() {
        let dataset = Dataset::new("my dataset");
        assert_eq!(dataset.name(), "my_dataset");
    }

    #[test]
    fn test_empty_dataset_dds() {
        let dataset = Dataset::new("test");
        let constraint = Constraint::match_all();
        assert_eq!(collect(dataset.dds(&constraint)), "Dataset {\n} test;\n");
    }

    #[test]
    fn test_empty_dataset_das() {
        let dataset = Dataset::new("test");
        let constraint = Constraint::match_all();
        assert_eq!(collect(dataset.das(&constraint)), "Attributes {\n}\n");
    }

    #[test]
    fn test_empty_dataset_data_section() {
        let dataset = Dataset::new("test");
        let constraint = Constraint::match_all();
        let bytes: Vec<u8> = dataset
            .dods_data(&constraint)
            .flat_map(|chunk| chunk.unwrap())
            .collect();
        assert_eq!(bytes, b"Data:\r\n");
    }

    #[test]
    fn test_nested_structure_indent() {
        let mut inner = Structure::new("inner");
        inner.append(Structure::new("leaf"));
        let mut dataset = Dataset::new("test");
        dataset.append(inner);

        let constraint = Constraint::match_all();
        let text = collect(dataset.dds(&constraint));
        assert!(text.contains("    Structure {\n"));
        assert!(text.contains("        Structure {\n"));
        assert!(text.contains("        } leaf;\n"));
    }
}
