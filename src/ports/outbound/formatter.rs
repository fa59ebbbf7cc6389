use crate::application::read_models::DecompositionReadModel;
use crate::shared::Result;

/// SbomFormatter port for rendering a decomposition
///
/// Implementations turn the read model into one textual output format
/// (JSON, Markdown).
pub trait SbomFormatter {
    /// Renders the read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &DecompositionReadModel) -> Result<String>;
}
