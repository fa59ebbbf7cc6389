use super::{Component, Vulnerability};
use chrono::{DateTime, FixedOffset};

/// One entry of the SBOM `dependencies` section: `bom_ref` depends on every
/// ref listed in `depends_on`, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dependency {
    pub bom_ref: String,
    pub depends_on: Vec<String>,
}

impl Dependency {
    pub fn new<I, S>(bom_ref: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bom_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lifecycle {
    pub phase: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// The BOM `metadata` block. `component` is the declared root of the graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BomMetadata {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub component: Option<Component>,
    pub tools: Vec<Component>,
    pub authors: Vec<Contact>,
    pub lifecycles: Vec<Lifecycle>,
    pub properties: Vec<Property>,
}

/// Decoded bill of materials - the immutable input of one decomposition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bom {
    pub serial_number: Option<String>,
    pub spec_version: Option<String>,
    pub metadata: Option<BomMetadata>,
    pub components: Vec<Component>,
    pub dependencies: Vec<Dependency>,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl Bom {
    /// The metadata component, if the document declares one.
    pub fn declared_root(&self) -> Option<&Component> {
        self.metadata.as_ref().and_then(|m| m.component.as_ref())
    }

    /// Number of `source -> target` edges declared, before any resolution.
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(|d| d.depends_on.len()).sum()
    }
}
