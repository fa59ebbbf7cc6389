use crate::decomposition::domain::{BomMetadata, CleanGraph};

/// DecomposeResponse - output of the decomposition use case
///
/// The projected graph plus what is passed through untouched from the input
/// document, so formatters can render provenance next to the tree.
#[derive(Debug, Clone)]
pub struct DecomposeResponse {
    pub clean_graph: CleanGraph,
    pub metadata: Option<BomMetadata>,
    pub serial_number: Option<String>,
    pub spec_version: Option<String>,
    /// Lowercase hex MD5 digest of the input file
    pub md5: String,
    /// Minimum severity the exposure flags were computed with
    pub min_transitive_severity: f64,
}

impl DecomposeResponse {
    /// True when the root itself is exposed, i.e. some reachable component
    /// carries a rating at or above the threshold.
    pub fn has_exposure(&self) -> bool {
        self.clean_graph.root.has_transitive_vulnerabilities
    }
}
