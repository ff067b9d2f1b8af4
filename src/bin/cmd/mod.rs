// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI commands over the built-in demo datasets.
//!
//! The demo trees mirror the reference test datasets: a 2-D and a 3-D
//! gridded variable with coordinate maps and attributes, enough to
//! exercise every response kind without a data backend.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::common::{write_stream, Result};
use dapcodec::model::{Array, Attribute, DapNode, Dataset, Grid};
use dapcodec::types::DataArray;
use dapcodec::{response, Constraint, DapType};

/// Built-in demo datasets.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DemoDataset {
    /// 2-D Int32 grid over x/y coordinate maps
    Grid2d,
    /// 3-D Int32 grid over x/y/z coordinate maps
    Grid3d,
}

impl DemoDataset {
    /// Build the demo tree.
    pub fn build(self) -> Dataset {
        match self {
            DemoDataset::Grid2d => grid2d(),
            DemoDataset::Grid3d => grid3d(),
        }
    }
}

fn grid2d() -> Dataset {
    let x = Array::new("x", DataArray::vector(vec![0i16, 1]), DapType::Int16);
    let y = Array::new("y", DataArray::vector(vec![10i16, 11]), DapType::Int16);

    let cells = DataArray::from_shape_vec(vec![2, 2], vec![0i32; 4]).expect("demo grid shape");
    let mut p = Grid::new("p", cells, DapType::Int32, vec![x.clone(), y.clone()]);
    p.append(Attribute::new("units", DapType::String, "second"));
    p.append(Attribute::new("size", DapType::Float64, 4.0f64));

    let mut dataset = Dataset::new("test");
    dataset.append(x);
    dataset.append(y);
    dataset.append(p);
    dataset
}

fn grid3d() -> Dataset {
    let x = Array::new("x", DataArray::vector(vec![0i16, 1]), DapType::Int16);
    let y = Array::new("y", DataArray::vector(vec![10i16, 11]), DapType::Int16);
    let z = Array::new("z", DataArray::vector(vec![20i16, 21]), DapType::Int16);

    let cells = DataArray::from_shape_vec(vec![2, 2, 2], vec![0i32, 0, 0, 0, 1, 1, 1, 1])
        .expect("demo grid shape");
    let mut p = Grid::new(
        "p",
        cells,
        DapType::Int32,
        vec![x.clone(), y.clone(), z.clone()],
    );
    p.append(Attribute::new("units", DapType::String, "second"));
    p.append(Attribute::new("size", DapType::Float64, 8.0f64));

    let mut dataset = Dataset::new("test");
    dataset.append(x);
    dataset.append(y);
    dataset.append(z);
    dataset.append(p);
    dataset
}

/// Print the DDS schema response.
#[derive(Args, Clone, Debug)]
pub struct DdsCmd {
    /// Demo dataset
    #[arg(value_enum, value_name = "DATASET")]
    dataset: DemoDataset,

    /// DAP constraint expression
    #[arg(short, long, default_value = "")]
    constraint: String,
}

impl DdsCmd {
    pub fn run(self) -> Result<()> {
        let dataset = self.dataset.build();
        print!("{}", response::dds(&dataset, &self.constraint)?);
        Ok(())
    }
}

/// Print the DAS attribute response.
#[derive(Args, Clone, Debug)]
pub struct DasCmd {
    /// Demo dataset
    #[arg(value_enum, value_name = "DATASET")]
    dataset: DemoDataset,

    /// DAP constraint expression
    #[arg(short, long, default_value = "")]
    constraint: String,
}

impl DasCmd {
    pub fn run(self) -> Result<()> {
        let dataset = self.dataset.build();
        print!("{}", response::das(&dataset, &self.constraint)?);
        Ok(())
    }
}

/// Write the binary DODS response.
#[derive(Args, Clone, Debug)]
pub struct DodsCmd {
    /// Demo dataset
    #[arg(value_enum, value_name = "DATASET")]
    dataset: DemoDataset,

    /// DAP constraint expression
    #[arg(short, long, default_value = "")]
    constraint: String,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl DodsCmd {
    pub fn run(self) -> Result<()> {
        let dataset = self.dataset.build();
        let constraint = Constraint::parse(&self.constraint)?;
        write_stream(
            self.output.as_deref(),
            response::dods_stream(&dataset, &constraint),
        )
    }
}

/// Summarize a demo dataset tree.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Demo dataset
    #[arg(value_enum, value_name = "DATASET")]
    dataset: DemoDataset,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

/// One row of the inspection summary.
#[derive(Serialize)]
struct NodeSummary {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<Vec<usize>>,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let dataset = self.dataset.build();
        let rows: Vec<NodeSummary> = dataset.children().iter().map(summarize).collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!("=== {} ===", dataset.name());
            for row in &rows {
                let dtype = row.dtype.as_deref().unwrap_or("-");
                match &row.shape {
                    Some(shape) => println!("  {} | {} | {} {:?}", row.name, row.kind, dtype, shape),
                    None => println!("  {} | {} | {}", row.name, row.kind, dtype),
                }
            }
        }
        Ok(())
    }
}

fn summarize(node: &DapNode) -> NodeSummary {
    match node {
        DapNode::Structure(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Structure",
            dtype: None,
            shape: None,
        },
        DapNode::Sequence(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Sequence",
            dtype: None,
            shape: None,
        },
        DapNode::Atom(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Atom",
            dtype: Some(n.dtype().label().to_string()),
            shape: None,
        },
        DapNode::Array(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Array",
            dtype: Some(n.dtype().label().to_string()),
            shape: Some(n.data().shape()),
        },
        DapNode::Grid(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Grid",
            dtype: Some(n.dtype().label().to_string()),
            shape: Some(n.data().shape()),
        },
        DapNode::Attribute(n) => NodeSummary {
            name: n.name().to_string(),
            kind: "Attribute",
            dtype: Some(n.dtype().label().to_string()),
            shape: None,
        },
    }
}
