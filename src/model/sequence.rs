// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequences: repeated records framed by wire markers.
//!
//! A sequence carries a schema describing its fields and zero or more
//! instances holding field values. On the wire every instance is
//! preceded by the start-of-instance word and the set is terminated by
//! the end-of-sequence word.

use crate::constraint::Constraint;
use crate::core::{ByteStream, DapError, Result, TextStream};
use crate::model::{sanitize_name, DapNode, Scope};

/// Field structure for a sequence's DDS/DAS output.
#[derive(Debug, Clone, Default)]
pub struct SequenceSchema {
    fields: Vec<DapNode>,
}

impl SequenceSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field definition.
    pub fn append(&mut self, field: impl Into<DapNode>) {
        self.fields.push(field.into());
    }

    /// The field definitions, in declaration order.
    pub fn fields(&self) -> &[DapNode] {
        &self.fields
    }
}

/// One record of a sequence.
///
/// Instances are transparent for constraint matching: their children
/// resolve paths against the sequence itself.
#[derive(Debug, Clone, Default)]
pub struct SequenceInstance {
    children: Vec<DapNode>,
}

impl SequenceInstance {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value.
    pub fn append(&mut self, child: impl Into<DapNode>) {
        self.children.push(child.into());
    }

    /// Validate this record against a sequence schema.
    ///
    /// Currently permissive; a future schema check reports failures
    /// through [`Sequence::append`] as `SchemaViolation`.
    pub fn validates(&self, _schema: Option<&SequenceSchema>) -> bool {
        true
    }

    pub(crate) fn dods_data<'a>(
        &'a self,
        scope: Scope,
        constraint: &'a Constraint,
    ) -> ByteStream<'a> {
        Box::new(
            self.children
                .iter()
                .flat_map(move |child| child.dods_data(scope.child(child.name()), constraint)),
        )
    }
}

/// A DAP sequence node.
#[derive(Debug, Clone)]
pub struct Sequence {
    name: String,
    schema: Option<SequenceSchema>,
    instances: Vec<SequenceInstance>,
}

impl Sequence {
    /// Marker word preceding every instance.
    pub const START_OF_INSTANCE: [u8; 4] = [0x5a, 0x00, 0x00, 0x00];

    /// Marker word terminating the instance set.
    pub const END_OF_SEQUENCE: [u8; 4] = [0xa5, 0x00, 0x00, 0x00];

    /// Create an empty sequence.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            schema: None,
            instances: Vec::new(),
        }
    }

    /// Attach the field schema.
    pub fn set_schema(&mut self, schema: SequenceSchema) {
        self.schema = Some(schema);
    }

    /// Append a record, validating it against the schema.
    pub fn append(&mut self, instance: SequenceInstance) -> Result<()> {
        if !instance.validates(self.schema.as_ref()) {
            return Err(DapError::schema_violation(
                &self.name,
                "instance does not satisfy the sequence schema",
            ));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// The sequence name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attached schema, if any.
    pub fn schema(&self) -> Option<&SequenceSchema> {
        self.schema.as_ref()
    }

    /// The appended records, in emission order.
    pub fn instances(&self) -> &[SequenceInstance] {
        &self.instances
    }

    fn schema_fields(&self) -> &[DapNode] {
        self.schema.as_ref().map(|s| s.fields()).unwrap_or(&[])
    }

    pub(crate) fn dds<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        let head = format!("{}Sequence {{\n", scope.indent());
        let tail = format!("{}}} {};\n", scope.indent(), self.name);
        let inner = scope.clone();
        Box::new(
            std::iter::once(Ok(head))
                .chain(
                    self.schema_fields()
                        .iter()
                        .flat_map(move |field| field.dds(inner.child(field.name()), constraint)),
                )
                .chain(std::iter::once(Ok(tail))),
        )
    }

    pub(crate) fn das<'a>(&'a self, scope: Scope, constraint: &'a Constraint) -> TextStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        let head = format!("{}{} {{\n", scope.indent(), self.name);
        let tail = format!("{}}}\n", scope.indent());
        let inner = scope.clone();
        Box::new(
            std::iter::once(Ok(head))
                .chain(
                    self.schema_fields()
                        .iter()
                        .flat_map(move |field| field.das(inner.child(field.name()), constraint)),
                )
                .chain(std::iter::once(Ok(tail))),
        )
    }

    pub(crate) fn dods_data<'a>(
        &'a self,
        scope: Scope,
        constraint: &'a Constraint,
    ) -> ByteStream<'a> {
        if !constraint.matches(scope.path()) {
            return Box::new(std::iter::empty());
        }
        let inner = scope.clone();
        let body = self.instances.iter().flat_map(move |instance| {
            let start: ByteStream<'a> =
                Box::new(std::iter::once(Ok(Self::START_OF_INSTANCE.to_vec())));
            start.chain(instance.dods_data(inner.clone(), constraint))
        });
        Box::new(body.chain(std::iter::once(Ok(Self::END_OF_SEQUENCE.to_vec()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DapType;
    use crate::model::Atom;

    fn sample_sequence() -> Sequence {
        let mut schema = SequenceSchema::new();
        schema.append(Atom::new("index", DapType::Int32));
        schema.append(Atom::new("temperature", DapType::Float32));

        let mut sequence = Sequence::new("readings");
        sequence.set_schema(schema);
        sequence
    }

    #[test]
    fn test_sequence_dds_uses_schema() {
        let sequence = sample_sequence();
        let constraint = Constraint::match_all();
        let text: String = sequence
            .dds(Scope::root().child("readings"), &constraint)
            .map(|chunk| chunk.unwrap())
            .collect();
        let expected = concat!(
            "    Sequence {\n",
            "        Int32 index;\n",
            "        Float32 temperature;\n",
            "    } readings;\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_sequence_emits_only_end_marker() {
        let sequence = sample_sequence();
        let constraint = Constraint::match_all();
        let bytes: Vec<u8> = sequence
            .dods_data(Scope::root().child("readings"), &constraint)
            .flat_map(|chunk| chunk.unwrap())
            .collect();
        assert_eq!(bytes, Sequence::END_OF_SEQUENCE);
    }

    #[test]
    fn test_instances_are_framed() {
        let mut sequence = sample_sequence();
        for i in 0..2i32 {
            let mut instance = SequenceInstance::new();
            instance.append(Atom::with_value("index", DapType::Int32, i));
            instance.append(Atom::with_value("temperature", DapType::Float32, 0.0f32));
            sequence.append(instance).unwrap();
        }

        let constraint = Constraint::match_all();
        let bytes: Vec<u8> = sequence
            .dods_data(Scope::root().child("readings"), &constraint)
            .flat_map(|chunk| chunk.unwrap())
            .collect();

        let mut expected = Vec::new();
        expected.extend_from_slice(&Sequence::START_OF_INSTANCE);
        expected.extend_from_slice(&[0, 0, 0, 0]); // index 0
        expected.extend_from_slice(&[0, 0, 0, 0]); // temperature 0.0
        expected.extend_from_slice(&Sequence::START_OF_INSTANCE);
        expected.extend_from_slice(&[0, 0, 0, 1]); // index 1
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&Sequence::END_OF_SEQUENCE);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_append_validates_against_schema() {
        let mut sequence = sample_sequence();
        assert!(sequence.append(SequenceInstance::new()).is_ok());
        assert_eq!(sequence.instances().len(), 1);
    }
}
