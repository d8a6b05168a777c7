use std::path::PathBuf;

/// ReportOutcome - Result of one report generation run
///
/// "Nothing to report" and "input missing" are outcomes rather than errors
/// so callers can surface them as distinct messages and exit codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// At least one row was written
    Produced { rows: usize, output_dir: PathBuf },
    /// The input held no packages; no sink was touched
    NoPackages,
    /// The input path does not exist; nothing was read or written
    InputNotFound,
}

impl ReportOutcome {
    pub fn is_produced(&self) -> bool {
        matches!(self, ReportOutcome::Produced { .. })
    }
}
