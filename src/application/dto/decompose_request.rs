use crate::decomposition::domain::DecomposeOptions;
use std::path::PathBuf;

/// DecomposeRequest - input of the decomposition use case
#[derive(Debug, Clone)]
pub struct DecomposeRequest {
    /// Path to the CycloneDX JSON document
    pub input_path: PathBuf,
    pub options: DecomposeOptions,
}

impl DecomposeRequest {
    pub fn new(input_path: PathBuf, options: DecomposeOptions) -> Self {
        Self {
            input_path,
            options,
        }
    }
}
