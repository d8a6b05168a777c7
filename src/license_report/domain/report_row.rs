/// Report column names, in output order
pub const REPORT_COLUMNS: [&str; 11] = [
    "Id",
    "Version",
    "Authors",
    "Title",
    "ProjectUrl",
    "LicenseUrl",
    "RequireLicenseAcceptance",
    "Copyright",
    "Inferred License ID",
    "Inferred License Name",
    "Downloaded license text file",
];

/// One report record: always exactly [`REPORT_COLUMNS`]`.len()` values
///
/// Absent inputs are stored as empty strings, never omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow([String; 11]);

impl ReportRow {
    pub fn new(values: [String; 11]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// The metadata columns written to the transcript (all but the file name)
    pub fn transcript_values(&self) -> &[String] {
        &self.0[..10]
    }
}
