/// Mock implementations for testing
mod mock_license_classifier;
mod mock_package_source;
mod mock_progress_reporter;
mod recording_tabular_sink;

pub use mock_license_classifier::MockLicenseClassifier;
pub use mock_package_source::MockPackageSource;
pub use mock_progress_reporter::MockProgressReporter;
pub use recording_tabular_sink::{RecordingTabularSink, SinkRecording};
