use crate::shared::Result;

/// OutputPresenter port for delivering rendered output (stdout, file)
pub trait OutputPresenter {
    /// Writes the rendered decomposition to its destination
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn present(&self, content: &str) -> Result<()>;
}
