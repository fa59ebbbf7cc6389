use crate::application::dto::{DecomposeRequest, DecomposeResponse};
use crate::shared::Result;

/// SbomDecompositionPort - Inbound port for the decomposition use case
///
/// This is the application's public API: drivers hand over a request
/// naming the SBOM file and projection options, and receive the clean
/// graph plus pass-through metadata.
pub trait SbomDecompositionPort {
    /// Decomposes the SBOM named by the request
    ///
    /// # Errors
    /// Returns an error if:
    /// - The options are out of range
    /// - The SBOM file cannot be read or decoded
    /// - The dependency graph cannot be built (duplicate refs, no root)
    fn decompose(&self, request: DecomposeRequest) -> Result<DecomposeResponse>;
}
