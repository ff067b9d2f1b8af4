// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The DAP object tree.
//!
//! A dataset is a tree of named nodes: groupings ([`Structure`],
//! [`Sequence`]), scalars ([`Atom`]), metadata ([`Attribute`]), and
//! array-bearing kinds ([`Array`], [`Grid`]). Each kind implements the
//! emitter trio (`dds`, `das`, `dods_data`) as lazy single-pass
//! streams.
//!
//! Parents own their children; indentation and the dotted data path are
//! derived during traversal by passing a [`Scope`] down the tree instead
//! of storing back-links. This keeps emission free of mutation, so one
//! tree can drive several response streams at once.

pub mod array;
pub mod atom;
pub mod dataset;
pub mod sequence;

use crate::constraint::Constraint;
use crate::core::{ByteStream, TextStream};

pub use array::{Array, Grid};
pub use atom::{Atom, Attribute};
pub use dataset::{Dataset, Structure};
pub use sequence::{Sequence, SequenceInstance, SequenceSchema};

/// One level of DDS/DAS indentation.
pub const INDENT: &str = "    ";

/// Replace spaces in a node name with underscores.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Traversal context: the indentation and dotted data path of the node
/// currently being emitted.
///
/// The root scope is empty on both counts; each child level appends one
/// [`INDENT`] and dot-joins the child name, so paths never start with a
/// dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    indent: String,
    path: String,
}

impl Scope {
    /// The dataset root scope.
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope of a child node one level down.
    pub fn child(&self, name: &str) -> Self {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        };
        Self {
            indent: format!("{}{}", self.indent, INDENT),
            path,
        }
    }

    /// Indentation prefix for this node's lines.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Dotted data path used for constraint matching.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A node in the dataset tree.
///
/// Kinds are a closed set of tagged variants; the per-kind emitters live
/// on the variant types and this enum only dispatches.
#[derive(Debug, Clone)]
pub enum DapNode {
    Structure(Structure),
    Sequence(Sequence),
    Atom(Atom),
    Array(Array),
    Grid(Grid),
    Attribute(Attribute),
}

impl DapNode {
    /// The node's name.
    pub fn name(&self) -> &str {
        match self {
            DapNode::Structure(n) => n.name(),
            DapNode::Sequence(n) => n.name(),
            DapNode::Atom(n) => n.name(),
            DapNode::Array(n) => n.name(),
            DapNode::Grid(n) => n.name(),
            DapNode::Attribute(n) => n.name(),
        }
    }

    /// DDS text chunks for this node. Attributes contribute nothing.
    pub fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        match self {
            DapNode::Structure(n) => n.dds(scope, constraint),
            DapNode::Sequence(n) => n.dds(scope, constraint),
            DapNode::Atom(n) => n.dds(scope, constraint),
            DapNode::Array(n) => n.dds(scope, constraint),
            DapNode::Grid(n) => n.dds(scope, constraint),
            DapNode::Attribute(_) => Box::new(std::iter::empty()),
        }
    }

    /// DAS text chunks for this node.
    pub fn das<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        match self {
            DapNode::Structure(n) => n.das(scope, constraint),
            DapNode::Sequence(n) => n.das(scope, constraint),
            DapNode::Atom(n) => n.das(scope, constraint),
            DapNode::Array(n) => n.das(scope, constraint),
            DapNode::Grid(n) => n.das(scope, constraint),
            DapNode::Attribute(n) => n.das(scope),
        }
    }

    /// DODS byte chunks for this node. Attributes contribute nothing.
    pub fn dods_data<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> ByteStream<'a> {
        match self {
            DapNode::Structure(n) => n.dods_data(scope, constraint),
            DapNode::Sequence(n) => n.dods_data(scope, constraint),
            DapNode::Atom(n) => n.dods_data(scope, constraint),
            DapNode::Array(n) => n.dods_data(scope, constraint),
            DapNode::Grid(n) => n.dods_data(scope, constraint),
            DapNode::Attribute(_) => Box::new(std::iter::empty()),
        }
    }
}

impl From<Structure> for DapNode {
    fn from(n: Structure) -> Self {
        DapNode::Structure(n)
    }
}

impl From<Sequence> for DapNode {
    fn from(n: Sequence) -> Self {
        DapNode::Sequence(n)
    }
}

impl From<Atom> for DapNode {
    fn from(n: Atom) -> Self {
        DapNode::Atom(n)
    }
}

impl From<Array> for DapNode {
    fn from(n: Array) -> Self {
        DapNode::Array(n)
    }
}

impl From<Grid> for DapNode {
    fn from(n: Grid) -> Self {
        DapNode::Grid(n)
    }
}

impl From<Attribute> for DapNode {
    fn from(n: Attribute) -> Self {
        DapNode::Attribute(n)
    }
}

/// Generic container DDS: head, children, `} name;` tail.
pub(crate) fn container_dds<'a>(
    kind: &str,
    name: &str,
    children: &'a [DapNode],
    scope: &Scope,
    constraint: &'a Constraint,
) -> TextStream<'a> {
    if !constraint.matches(scope.path()) {
        return Box::new(std::iter::empty());
    }
    let head = format!("{}{} {{\n", scope.indent(), kind);
    let tail = format!("{}}} {};\n", scope.indent(), name);
    let scope = scope.clone();
    Box::new(
        std::iter::once(Ok(head))
            .chain(
                children
                    .iter()
                    .flat_map(move |child| child.dds(scope.child(child.name()), constraint)),
            )
            .chain(std::iter::once(Ok(tail))),
    )
}

/// Generic container DAS: named head, children, bare `}` tail.
pub(crate) fn container_das<'a>(
    head_name: &str,
    children: &'a [DapNode],
    scope: &Scope,
    constraint: &'a Constraint,
) -> TextStream<'a> {
    if !constraint.matches(scope.path()) {
        return Box::new(std::iter::empty());
    }
    let head = format!("{}{} {{\n", scope.indent(), head_name);
    let tail = format!("{}}}\n", scope.indent());
    let scope = scope.clone();
    Box::new(
        std::iter::once(Ok(head))
            .chain(
                children
                    .iter()
                    .flat_map(move |child| child.das(scope.child(child.name()), constraint)),
            )
            .chain(std::iter::once(Ok(tail))),
    )
}
