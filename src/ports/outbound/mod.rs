/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod license_classifier;
pub mod package_source;
pub mod progress_reporter;
pub mod tabular_sink;

pub use license_classifier::LicenseClassifier;
pub use package_source::PackageSource;
pub use progress_reporter::ProgressReporter;
pub use tabular_sink::TabularSink;
