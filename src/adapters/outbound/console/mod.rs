/// Console adapters for the run transcript
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
