//! Decomposition read model for query operations

use super::component_view::ComponentView;
use super::meta_view::MetaView;
use super::vulnerability_view::VulnerabilityView;
use serde::Serialize;

/// Everything a formatter needs to render one decomposition
#[derive(Debug, Clone, Serialize)]
pub struct DecompositionReadModel {
    pub summary: SummaryView,
    pub meta: MetaView,
    pub tree: ComponentView,
    /// Root-reachable refs, dependencies first
    pub topological_order: Vec<String>,
    pub cycles: CycleReportView,
    pub vulnerabilities: Vec<VulnerabilityView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    /// Nodes in the rendered tree, shared components counted once per path
    pub total_nodes: usize,
    /// Distinct components reachable from the root
    pub reachable_components: usize,
    pub total_vulnerabilities: usize,
    pub min_transitive_severity: f64,
    pub has_transitive_vulnerabilities: bool,
    pub max_level: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleReportView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub cycles: Vec<CycleView>,
    pub broken_edges: Vec<String>,
    pub details: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleView {
    /// Refs forming the cycle, closing back on the first one
    pub path: Vec<String>,
    /// Traversal path at the moment the cycle was found
    pub traversal: Vec<String>,
    /// `a → b → a`, long refs abbreviated
    pub display: String,
}
