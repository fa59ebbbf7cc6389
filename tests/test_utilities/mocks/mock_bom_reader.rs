use sbom_decompose::prelude::*;
use std::path::Path;

/// Mock BomReader serving an in-memory BOM
pub struct MockBomReader {
    bom: Bom,
    md5: String,
}

impl MockBomReader {
    pub fn new(bom: Bom) -> Self {
        Self {
            bom,
            md5: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }
    }

    /// Decodes a fixture once so tests can reuse it without touching the reader under test
    pub fn from_fixture(path: &str) -> Self {
        let bytes = std::fs::read(path).unwrap();
        Self::new(CycloneDxDecoder::decode(&bytes, Path::new(path)).unwrap())
    }
}

impl BomReader for MockBomReader {
    fn read_bom(&self, path: &Path) -> Result<BomDocument> {
        Ok(BomDocument {
            bom: self.bom.clone(),
            md5: self.md5.clone(),
            source: path.to_path_buf(),
        })
    }
}
