use crate::decomposition::domain::Bom;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A decoded SBOM together with facts about the bytes it came from.
#[derive(Debug, Clone)]
pub struct BomDocument {
    pub bom: Bom,
    /// Lowercase hex MD5 digest of the raw input
    pub md5: String,
    pub source: PathBuf,
}

/// BomReader port for loading an SBOM into the domain model
///
/// The decomposition core never parses bytes; adapters behind this port
/// own the wire format.
pub trait BomReader {
    /// Reads and decodes the SBOM at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink, or is too large
    /// - The content is not a valid SBOM document
    fn read_bom(&self, path: &Path) -> Result<BomDocument>;
}
