use crate::license_report::domain::PackageRecord;
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;
use std::path::Path;

/// PackageSource port for enumerating the packages of a project
///
/// Implementations decide internally how `root` is laid out (a packages
/// folder, a project manifest, ...); callers only see the ordered records.
pub trait PackageSource {
    /// Enumerates the packages found at `root`, in a stable order
    ///
    /// Entries that cannot become a record (an unreadable package manifest,
    /// a floating version) are skipped with a one-line warning on `reporter`.
    ///
    /// # Errors
    /// Returns an error if `root` cannot be read or a manifest is malformed
    fn packages(
        &self,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<PackageRecord>>;
}
