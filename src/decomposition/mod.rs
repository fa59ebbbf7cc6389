//! Decomposition core - dependency graph engine
//!
//! Pure, synchronous logic with no I/O: graph construction from flat SBOM
//! sections, cycle resolution, topological ordering and the clean-graph
//! projection.

pub mod domain;
pub mod services;

use domain::{Bom, CleanGraph, DecomposeOptions};
use services::{CleanGraphProjector, CycleResolver, GraphBuilder, TopologicalOrderer};

use crate::shared::error::DecompositionError;

/// Runs the whole pipeline on one BOM: build, resolve cycles, validate order, project.
pub fn decompose(bom: &Bom, options: &DecomposeOptions) -> Result<CleanGraph, DecompositionError> {
    let mut graph = GraphBuilder::build(bom)?;
    CycleResolver::resolve(&mut graph);
    TopologicalOrderer::order_ids(&graph)?;
    CleanGraphProjector::project(&graph, options)
}
