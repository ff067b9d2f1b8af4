// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use dapcodec::model::{Array, Attribute, Dataset, Grid};
use dapcodec::types::{DataArray, MemoryChunks};
use dapcodec::DapType;

/// The reference 2-D grid dataset: coordinate maps `x`, `y` and a
/// gridded `Int32` variable `z` with two attributes.
pub fn grid_dataset() -> Dataset {
    let x = Array::new("x", DataArray::vector(vec![0i16, 1]), DapType::Int16);
    let y = Array::new("y", DataArray::vector(vec![10i16, 11]), DapType::Int16);

    let cells = DataArray::from_shape_vec(vec![2, 2], vec![0i32; 4]).unwrap();
    let mut z = Grid::new("z", cells, DapType::Int32, vec![x.clone(), y.clone()]);
    z.append(Attribute::new("units", DapType::String, "second"));
    z.append(Attribute::new("size", DapType::Float64, 4.0f64));

    let mut dataset = Dataset::new("test");
    dataset.append(x);
    dataset.append(y);
    dataset.append(z);
    dataset
}

/// Same tree as [`grid_dataset`], but with the grid's primary buffer
/// served through a chunked source one row at a time.
pub fn chunked_grid_dataset() -> Dataset {
    let x = Array::new("x", DataArray::vector(vec![0i16, 1]), DapType::Int16);
    let y = Array::new("y", DataArray::vector(vec![10i16, 11]), DapType::Int16);

    let cells = DataArray::from_shape_vec(vec![2, 2], vec![0i32; 4]).unwrap();
    let source = MemoryChunks::new(cells, 1).unwrap();
    let mut z = Grid::new("z", source, DapType::Int32, vec![x.clone(), y.clone()]);
    z.append(Attribute::new("units", DapType::String, "second"));
    z.append(Attribute::new("size", DapType::Float64, 4.0f64));

    let mut dataset = Dataset::new("test");
    dataset.append(x);
    dataset.append(y);
    dataset.append(z);
    dataset
}

/// The DDS text of [`grid_dataset`] under the empty constraint.
pub const EXPECTED_DDS: &str = concat!(
    "Dataset {\n",
    "    Int16 x[x = 2];\n",
    "    Int16 y[y = 2];\n",
    "    Grid {\n",
    "      Array:\n",
    "        Int32 z[x = 2][y = 2];\n",
    "      Maps:\n",
    "        Int16 x[x = 2];\n",
    "        Int16 y[y = 2];\n",
    "    } z;\n",
    "} test;\n",
);

/// The DAS text of [`grid_dataset`] under the empty constraint.
pub const EXPECTED_DAS: &str = concat!(
    "Attributes {\n",
    "    x {\n",
    "    }\n",
    "    y {\n",
    "    }\n",
    "    z {\n",
    "        String units \"second\";\n",
    "        Float64 size 4.0;\n",
    "    }\n",
    "}\n",
);

/// The XDR data payload of [`grid_dataset`] under the empty constraint:
/// `x`, `y`, then the grid (primary array, then its maps).
pub fn expected_payload() -> Vec<u8> {
    let mut payload = Vec::new();
    // x
    payload.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2]);
    payload.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    // y
    payload.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2]);
    payload.extend_from_slice(&[0, 0, 0, 10, 0, 0, 0, 11]);
    // z primary
    payload.extend_from_slice(&[0, 0, 0, 4, 0, 0, 0, 4]);
    payload.extend_from_slice(&[0u8; 16]);
    // z maps: x, then y
    payload.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2]);
    payload.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    payload.extend_from_slice(&[0, 0, 0, 2, 0, 0, 0, 2]);
    payload.extend_from_slice(&[0, 0, 0, 10, 0, 0, 0, 11]);
    payload
}
