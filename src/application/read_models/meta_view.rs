//! Pass-through metadata of the input document

use serde::Serialize;
use std::collections::BTreeMap;

/// Provenance of the decomposed document
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_version: Option<String>,
    pub md5: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lifecycles: Vec<LifecycleView>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub bom_ref: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolView {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifecycleView {
    /// Predefined phase, or the name of a custom lifecycle
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
