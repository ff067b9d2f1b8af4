// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Constraint expressions: projection matching and slicing.
//!
//! A constraint is a comma-separated list of projections, each a dotted
//! data path with an optional trailing run of bracket slices:
//! `x,y,p.p` or `z.z[0][0]` or `p[0:3][:]`. An empty constraint selects
//! everything.
//!
//! Matching is a raw prefix test on the projection's segment portion,
//! exactly as deployed DAP 2.0 servers behave: `"test.object.path"`
//! matches the paths `test` and `test.object`, and also `te`; the test
//! is not segment-aware.

pub mod slice;

use std::sync::OnceLock;

use regex::Regex;

use crate::core::error::{DapError, Result};
pub use slice::{parse_slice, parse_slice_suffix, DimSlice};

/// Check whether a data path participates in a constraint expression.
///
/// True iff the expression is empty or some projection's segment portion
/// (the text before its first `[`) starts with `path`.
pub fn meets_constraint(constraint_expr: &str, data_path: &str) -> bool {
    if constraint_expr.is_empty() {
        return true;
    }
    constraint_expr.split(',').any(|projection| {
        let segments = projection.split('[').next().unwrap_or(projection);
        segments.starts_with(data_path)
    })
}

fn projection_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^.\[\],]+(\.[^.\[\],]+)*(\[[^\[\]]*\])*$").expect("projection pattern")
    })
}

/// A validated constraint expression.
///
/// Parsing happens once per request, before any response bytes are
/// produced; emitters only consult the precomputed selectors and the
/// prefix matcher.
#[derive(Debug, Clone)]
pub struct Constraint {
    raw: String,
    selectors: Vec<DimSlice>,
}

impl Constraint {
    /// Parse and validate a constraint expression.
    ///
    /// Empty input selects the whole dataset. Malformed projection lists
    /// fail with [`DapError::BadConstraint`], malformed bracket bodies
    /// with [`DapError::BadSlice`].
    pub fn parse(expr: &str) -> Result<Self> {
        if !expr.is_empty() {
            for projection in expr.split(',') {
                if projection.is_empty() {
                    return Err(DapError::bad_constraint(expr, "empty projection"));
                }
                if !projection_re().is_match(projection) {
                    return Err(DapError::bad_constraint(
                        expr,
                        format!("malformed projection '{projection}'"),
                    ));
                }
                // Surface slice errors from any projection up front.
                slice::parse_slice_suffix(projection)?;
            }
        }
        let selectors = slice::parse_slice_suffix(expr)?;
        Ok(Self {
            raw: expr.to_string(),
            selectors,
        })
    }

    /// The match-all constraint.
    pub fn match_all() -> Self {
        Self {
            raw: String::new(),
            selectors: vec![DimSlice::All],
        }
    }

    /// The raw expression text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this constraint selects everything.
    pub fn is_match_all(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether a data path participates in this constraint.
    pub fn matches(&self, data_path: &str) -> bool {
        meets_constraint(&self.raw, data_path)
    }

    /// The per-dimension selectors parsed from the trailing slice suffix.
    pub fn selectors(&self) -> &[DimSlice] {
        &self.selectors
    }

    /// Selector for one axis; axes beyond the suffix are whole.
    pub fn axis(&self, axis: usize) -> DimSlice {
        self.selectors.get(axis).copied().unwrap_or(DimSlice::All)
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::match_all()
    }
}
