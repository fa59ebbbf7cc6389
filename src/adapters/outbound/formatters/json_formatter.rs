use crate::application::read_models::DecompositionReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter - pretty-printed JSON of the read model
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for JsonFormatter {
    fn format(&self, model: &DecompositionReadModel) -> Result<String> {
        serde_json::to_string_pretty(model).context("Failed to serialize decomposition to JSON")
    }
}
