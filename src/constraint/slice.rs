// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The DAP hyperslab slice grammar.
//!
//! Constraint expressions end in zero or more bracket groups: `[3]` picks
//! one index, `[3:7]` an inclusive range (converted here to half-open),
//! `[:]` and `[]` a whole axis. The parser operates on the trailing
//! contiguous group run of the full constraint string, one selector
//! tuple per request.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{DapError, Result};

/// A parsed per-dimension selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimSlice {
    /// Keep the whole axis
    All,
    /// Pick one index, collapsing the axis
    Index(usize),
    /// Half-open index window
    Range {
        /// First selected index
        start: usize,
        /// One past the last selected index
        end: usize,
    },
}

impl DimSlice {
    /// Number of indices this selector picks, if it is bounded.
    pub fn len(&self) -> Option<usize> {
        match self {
            DimSlice::All => None,
            DimSlice::Index(_) => Some(1),
            DimSlice::Range { start, end } => Some(end.saturating_sub(*start)),
        }
    }
}

fn suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"((?:\[[^\[\]]*\])+)$").expect("slice suffix pattern"))
}

/// Parse a single bracket body.
///
/// Accepts an integer, `a:b`, `:`, or the empty body. Anything else,
/// including stride forms and descending ranges, is [`DapError::BadSlice`].
pub fn parse_slice(token: &str) -> Result<DimSlice> {
    if token.is_empty() || token == ":" {
        return Ok(DimSlice::All);
    }
    if let Ok(index) = token.parse::<usize>() {
        return Ok(DimSlice::Index(index));
    }
    if let Some((low, high)) = token.split_once(':') {
        let start = low.parse::<usize>().map_err(|_| {
            DapError::bad_slice(token, "range bounds must be unsigned integers")
        })?;
        let stop = high.parse::<usize>().map_err(|_| {
            DapError::bad_slice(token, "range bounds must be unsigned integers")
        })?;
        if start > stop {
            return Err(DapError::bad_slice(token, "descending range"));
        }
        // DAP ranges include the upper bound.
        return Ok(DimSlice::Range {
            start,
            end: stop + 1,
        });
    }
    Err(DapError::bad_slice(token, "not an index, range, or ':'"))
}

/// Parse the trailing bracket-group run of a constraint string.
///
/// No suffix yields the single whole-axis selector; axes beyond the
/// parsed groups are whole as well.
pub fn parse_slice_suffix(constraint: &str) -> Result<Vec<DimSlice>> {
    let suffix = match suffix_re().find(constraint) {
        Some(m) => m.as_str(),
        None => return Ok(vec![DimSlice::All]),
    };
    let body = &suffix[1..suffix.len() - 1];
    body.split("][").map(parse_slice).collect()
}
