//! Tree view of the projected dependency graph

use super::vulnerability_view::VulnerabilityView;
use serde::Serialize;

/// One node of the rendered dependency tree
#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub bom_ref: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub level: usize,
    pub max_severity: f64,
    pub has_transitive_vulnerabilities: bool,
    pub in_cycle: bool,
    pub total_cve_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<VulnerabilityView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentView>,
}
