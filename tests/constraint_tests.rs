// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Constraint matching and slice grammar tests.

mod common;

use common::grid_dataset;
use dapcodec::constraint::{meets_constraint, parse_slice_suffix, Constraint, DimSlice};
use dapcodec::{response, DapError};

#[test]
fn empty_constraint_matches_every_path() {
    for path in ["", "x", "test.object.path", "a.b.c.d"] {
        assert!(meets_constraint("", path));
    }
}

#[test]
fn reference_matching_truths() {
    assert!(meets_constraint("test.object.path", "test"));
    assert!(meets_constraint("test.object.path", "test.object"));
    assert!(!meets_constraint("test.object.path", "test1.object"));
}

#[test]
fn reference_slice_tuples() {
    assert_eq!(
        parse_slice_suffix("[0][:][:][4:7]").unwrap(),
        vec![
            DimSlice::Index(0),
            DimSlice::All,
            DimSlice::All,
            DimSlice::Range { start: 4, end: 8 },
        ]
    );
    assert_eq!(parse_slice_suffix("[]").unwrap(), vec![DimSlice::All]);
}

#[test]
fn range_selector_spans_inclusive_bounds() {
    // [a:b] selects b - a + 1 indices.
    for (a, b) in [(0usize, 0usize), (0, 20), (4, 7)] {
        let selectors = parse_slice_suffix(&format!("[{a}:{b}]")).unwrap();
        assert_eq!(selectors[0].len(), Some(b - a + 1));
    }
}

#[test]
fn empty_brackets_equal_colon_brackets() {
    assert_eq!(
        parse_slice_suffix("p[]").unwrap(),
        parse_slice_suffix("p[:]").unwrap()
    );
}

#[test]
fn malformed_constraints_are_client_errors() {
    for expr in ["a,,b", "p[0]tail", "x..y"] {
        let err = Constraint::parse(expr).unwrap_err();
        assert!(matches!(err, DapError::BadConstraint { .. }), "{expr}");
        assert!(err.is_client_error());
    }
}

#[test]
fn malformed_slices_are_client_errors() {
    for expr in ["p[a]", "p[1:2:3]", "p[5:2]", "p[-1]"] {
        let err = Constraint::parse(expr).unwrap_err();
        assert!(matches!(err, DapError::BadSlice { .. }), "{expr}");
        assert!(err.is_client_error());
    }
}

#[test]
fn multi_projection_selects_union() {
    let dataset = grid_dataset();
    let dds = response::dds(&dataset, "x,y").unwrap();
    assert!(dds.contains("Int16 x[x = 2];"));
    assert!(dds.contains("Int16 y[y = 2];"));
    assert!(!dds.contains("Grid"));
}

#[test]
fn out_of_range_index_aborts_response() {
    let dataset = grid_dataset();
    let err = response::dods(&dataset, "x[9]").unwrap_err();
    assert!(matches!(err, DapError::BadSlice { .. }));
}

#[test]
fn trailing_all_selectors_beyond_rank_are_harmless() {
    let dataset = grid_dataset();
    // x is 1-D; the second group is a whole-axis marker and is ignored.
    let dds = response::dds(&dataset, "x[0:1][:]").unwrap();
    assert!(dds.contains("Int16 x[x = 2];"));
}
