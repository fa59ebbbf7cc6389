use crate::adapters::outbound::cyclonedx::CycloneDxDecoder;
use crate::ports::outbound::{BomDocument, BomReader};
use crate::shared::error::SbomError;
use crate::shared::security::{read_guarded, MAX_BOM_FILE_SIZE};
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for loading CycloneDX JSON SBOMs from disk
///
/// Implements the BomReader port. Files are read whole after the
/// symlink, file-type and size checks in `shared::security`.
pub struct FileSystemReader {
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_BOM_FILE_SIZE,
        }
    }

    /// Overrides the size cap (tests use a tiny one).
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BomReader for FileSystemReader {
    fn read_bom(&self, path: &Path) -> Result<BomDocument> {
        // symlink_metadata so that a dangling symlink is reported by the guard, not as missing
        if std::fs::symlink_metadata(path).is_err() {
            return Err(SbomError::BomNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "No file exists at \"{}\".\n   Please pass the path of a CycloneDX JSON document.",
                    path.display()
                ),
            }
            .into());
        }

        let bytes = read_guarded(path, self.max_file_size).map_err(|e| SbomError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let md5 = format!("{:x}", md5::compute(&bytes));
        tracing::debug!(path = %path.display(), bytes = bytes.len(), md5 = %md5, "read SBOM");

        let bom = CycloneDxDecoder::decode(&bytes, path)?;
        Ok(BomDocument {
            bom,
            md5,
            source: path.to_path_buf(),
        })
    }
}
