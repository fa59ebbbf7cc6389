pub mod bom;
pub mod clean_graph;
pub mod component;
pub mod decompose_options;
pub mod dependency_graph;
pub mod registry;
pub mod vulnerability;

pub use bom::{Bom, BomMetadata, Contact, Dependency, Lifecycle, Property};
pub use clean_graph::{CleanGraph, ProjectedNode};
pub use component::{Component, ComponentType};
pub use decompose_options::{DecomposeOptions, DEFAULT_MIN_TRANSITIVE_SEVERITY};
pub use dependency_graph::DependencyGraph;
pub use registry::{ComponentRegistry, Node, NodeId};
pub use vulnerability::{
    Advisory, Affect, AffectedStatus, AffectedVersion, Rating, ScoringMethod, Severity, Source,
    Vulnerability,
};
