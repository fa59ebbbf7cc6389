//! sbom-decompose - dependency graph decomposition for CycloneDX SBOMs
//!
//! This library turns a CycloneDX bill of materials into a rooted, acyclic
//! dependency tree. It breaks dependency cycles deterministically, computes
//! a topological order and flags every component that transitively depends
//! on a vulnerability rated at or above a configurable threshold.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`decomposition`): graph construction, cycle resolution,
//!   topological ordering and clean-graph projection
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): CycloneDX decoding, filesystem, console and formatters
//! - **Config** (`config`): YAML config file and option merging
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_decompose::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = DecomposeSbomUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
//!
//! let request = DecomposeRequest::new(PathBuf::from("bom.cdx.json"), DecomposeOptions::default());
//! let response = use_case.execute(request)?;
//!
//! let model = DecompositionReadModelBuilder::build(&response);
//! println!("{}", MarkdownFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod decomposition;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::cyclonedx::CycloneDxDecoder;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{DecomposeRequest, DecomposeResponse, OutputFormat};
    pub use crate::application::read_models::{DecompositionReadModel, DecompositionReadModelBuilder};
    pub use crate::application::use_cases::DecomposeSbomUseCase;
    pub use crate::decomposition::decompose;
    pub use crate::decomposition::domain::{
        Bom, BomMetadata, CleanGraph, Component, ComponentType, DecomposeOptions, Dependency,
        DependencyGraph, ProjectedNode, Vulnerability,
    };
    pub use crate::decomposition::services::{
        CleanGraphProjector, CycleResolver, GraphBuilder, TopologicalOrderer,
    };
    pub use crate::ports::inbound::SbomDecompositionPort;
    pub use crate::ports::outbound::{
        BomDocument, BomReader, OutputPresenter, ProgressReporter, SbomFormatter,
    };
    pub use crate::shared::error::{DecompositionError, ExitCode, SbomError};
    pub use crate::shared::Result;
}
