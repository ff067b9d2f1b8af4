// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Response assembly.
//!
//! The three DAP response kinds are driven from here. The `*_stream`
//! forms are lazy chunk iterators suitable for feeding an HTTP body
//! directly; the collected forms take a raw constraint expression and
//! return the whole response, with parse errors surfaced before any
//! output is produced.

use tracing::debug;

use crate::constraint::Constraint;
use crate::core::{ByteStream, Result, TextStream};
use crate::model::Dataset;

/// DDS text chunks for a dataset under a parsed constraint.
pub fn dds_stream<'a>(dataset: &'a Dataset, constraint: &'a Constraint) -> TextStream<'a> {
    dataset.dds(constraint)
}

/// DAS text chunks for a dataset under a parsed constraint.
pub fn das_stream<'a>(dataset: &'a Dataset, constraint: &'a Constraint) -> TextStream<'a> {
    dataset.das(constraint)
}

/// DODS byte chunks: DDS text, a separating newline, then the data
/// section opened by `Data:\r\n`.
pub fn dods_stream<'a>(dataset: &'a Dataset, constraint: &'a Constraint) -> ByteStream<'a> {
    let text = dataset
        .dds(constraint)
        .map(|chunk| chunk.map(String::into_bytes));
    Box::new(
        text.chain(std::iter::once(Ok(b"\n".to_vec())))
            .chain(dataset.dods_data(constraint)),
    )
}

/// The complete DDS response for a raw constraint expression.
pub fn dds(dataset: &Dataset, constraint_expr: &str) -> Result<String> {
    let constraint = parsed(dataset, "dds", constraint_expr)?;
    collect_text(dds_stream(dataset, &constraint))
}

/// The complete DAS response for a raw constraint expression.
pub fn das(dataset: &Dataset, constraint_expr: &str) -> Result<String> {
    let constraint = parsed(dataset, "das", constraint_expr)?;
    collect_text(das_stream(dataset, &constraint))
}

/// The complete DODS response for a raw constraint expression.
pub fn dods(dataset: &Dataset, constraint_expr: &str) -> Result<Vec<u8>> {
    let constraint = parsed(dataset, "dods", constraint_expr)?;
    collect_bytes(dods_stream(dataset, &constraint))
}

fn parsed(dataset: &Dataset, kind: &str, constraint_expr: &str) -> Result<Constraint> {
    let constraint = Constraint::parse(constraint_expr)?;
    if !constraint.is_match_all() {
        debug!(
            dataset = dataset.name(),
            kind,
            constraint = constraint_expr,
            "applying constraint"
        );
    }
    Ok(constraint)
}

fn collect_text(stream: TextStream<'_>) -> Result<String> {
    let mut out = String::new();
    for chunk in stream {
        out.push_str(&chunk?);
    }
    Ok(out)
}

fn collect_bytes(stream: ByteStream<'_>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for chunk in stream {
        out.extend_from_slice(&chunk?);
    }
    Ok(out)
}
