/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define what the application core needs from the file
/// system and the console.
pub mod bom_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use bom_reader::{BomDocument, BomReader};
pub use formatter::SbomFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
