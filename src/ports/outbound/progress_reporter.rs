/// ProgressReporter port for user-facing progress
///
/// Decomposition runs as a fixed sequence of stages; reporters show where
/// the run currently is. Diagnostics go through `tracing`, not here.
pub trait ProgressReporter {
    /// Reports a free-form status line
    fn report(&self, message: &str);

    /// Reports entering stage `current` of `total`
    fn report_stage(&self, current: usize, total: usize, stage: &str);

    /// Reports a non-fatal problem the user should see
    fn report_warning(&self, message: &str);

    /// Reports the end of the run
    fn report_completion(&self, message: &str);
}
