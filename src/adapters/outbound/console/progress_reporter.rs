use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

const STAGE_TEMPLATE: &str = "   {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Stages drive an indicatif bar; stdout stays free for the report itself.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn stage_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        if let Some(pb) = slot.as_ref() {
            return pb.clone();
        }

        let pb = ProgressBar::new(total as u64);
        // the template is a constant, a parse failure leaves the default style
        if let Ok(style) = ProgressStyle::default_bar().template(STAGE_TEMPLATE) {
            pb.set_style(style.progress_chars("=>-"));
        }
        *slot = Some(pb.clone());
        pb
    }

    fn finish(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    /// Prints a line without tearing an active bar.
    fn print(&self, line: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print(message);
    }

    fn report_stage(&self, current: usize, total: usize, stage: &str) {
        let pb = self.stage_bar(total);
        pb.set_position(current as u64);
        pb.set_message(stage.to_string());
    }

    fn report_warning(&self, message: &str) {
        self.print(&message.yellow().to_string());
    }

    fn report_completion(&self, message: &str) {
        self.finish();
        eprintln!("{}", message.green());
    }
}

/// ProgressReporter that drops everything (`--quiet`)
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietProgressReporter;

impl ProgressReporter for QuietProgressReporter {
    fn report(&self, _message: &str) {}

    fn report_stage(&self, _current: usize, _total: usize, _stage: &str) {}

    fn report_warning(&self, _message: &str) {}

    fn report_completion(&self, _message: &str) {}
}
