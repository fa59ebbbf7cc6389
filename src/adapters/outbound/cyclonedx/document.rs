//! Wire model of a CycloneDX JSON document (the subset the decomposition reads).
//!
//! Every field is optional or defaulted: real-world SBOMs are frequently
//! partial, and missing sections simply decode as empty.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BomDocument {
    pub bom_format: Option<String>,
    pub spec_version: Option<String>,
    pub serial_number: Option<String>,
    pub metadata: Option<MetadataDocument>,
    #[serde(default)]
    pub components: Vec<ComponentDocument>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDocument>,
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MetadataDocument {
    pub timestamp: Option<String>,
    pub tools: Option<ToolsDocument>,
    #[serde(default)]
    pub authors: Vec<ContactDocument>,
    #[serde(default)]
    pub lifecycles: Vec<LifecycleDocument>,
    pub component: Option<ComponentDocument>,
    #[serde(default)]
    pub properties: Vec<PropertyDocument>,
}

/// `metadata.tools` is an object of components since CycloneDX 1.5 and a
/// flat array of tool entries before that.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ToolsDocument {
    Legacy(Vec<LegacyToolDocument>),
    Components {
        #[serde(default)]
        components: Vec<ComponentDocument>,
    },
}

#[derive(Debug, Deserialize)]
pub(super) struct LegacyToolDocument {
    pub vendor: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactDocument {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "bom-ref")]
    pub bom_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LifecycleDocument {
    pub phase: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PropertyDocument {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ComponentDocument {
    #[serde(rename = "type")]
    pub component_type: Option<String>,
    #[serde(rename = "bom-ref")]
    pub bom_ref: Option<String>,
    pub name: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub purl: Option<String>,
    /// Sub-components; flattened into the top-level list on decode
    #[serde(default)]
    pub components: Vec<ComponentDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DependencyDocument {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SourceDocument {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RatingDocument {
    pub source: Option<SourceDocument>,
    pub score: Option<f64>,
    pub severity: Option<String>,
    pub method: Option<String>,
    pub vector: Option<String>,
    pub justification: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdvisoryDocument {
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AffectedVersionDocument {
    pub version: Option<String>,
    pub range: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AffectDocument {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(default)]
    pub versions: Vec<AffectedVersionDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VulnerabilityDocument {
    pub id: Option<String>,
    #[serde(rename = "bom-ref")]
    pub bom_ref: Option<String>,
    pub source: Option<SourceDocument>,
    #[serde(default)]
    pub ratings: Vec<RatingDocument>,
    #[serde(default)]
    pub cwes: Vec<u32>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub recommendation: Option<String>,
    #[serde(default)]
    pub advisories: Vec<AdvisoryDocument>,
    pub created: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub rejected: Option<String>,
    #[serde(default)]
    pub affects: Vec<AffectDocument>,
}
