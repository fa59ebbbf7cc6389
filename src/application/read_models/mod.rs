//! Read models for CQRS-lite pattern
//!
//! Serializable, denormalized views of a decomposition, shaped for the
//! formatters rather than for the graph engine.

mod component_view;
mod decomposition_read_model;
mod decomposition_read_model_builder;
mod meta_view;
mod vulnerability_view;

pub use component_view::ComponentView;
pub use decomposition_read_model::{CycleReportView, CycleView, DecompositionReadModel, SummaryView};
pub use decomposition_read_model_builder::DecompositionReadModelBuilder;
pub use meta_view::{AuthorView, LifecycleView, MetaView, ProjectView, ToolView};
pub use vulnerability_view::{AdvisoryView, AffectView, RatingView, SourceView, VulnerabilityView};
