use crate::license_report::domain::{License, PackageRecord, ReportRow, REPORT_COLUMNS};

/// Number of leading columns echoed to the transcript
const TRANSCRIPT_COLUMNS: usize = 10;

/// ReportRowBuilder service for assembling report rows and transcript lines
///
/// Pure formatting: no I/O, absent values become empty strings.
pub struct ReportRowBuilder;

impl ReportRowBuilder {
    /// Builds the report row for a package
    ///
    /// # Arguments
    /// * `package` - The package the row describes
    /// * `license` - Resolved license, if any
    /// * `license_file` - Name of the saved license text file, if any
    pub fn build_row(
        package: &PackageRecord,
        license: Option<&License>,
        license_file: Option<&str>,
    ) -> ReportRow {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();

        ReportRow::new([
            package.id().to_string(),
            package.version().to_string(),
            text(package.authors()),
            text(package.title()),
            text(package.project_url()),
            text(package.license_url()),
            Self::render_bool(package.require_license_acceptance()).to_string(),
            text(package.copyright()),
            text(license.map(License::id)),
            text(license.map(License::name)),
            text(license_file),
        ])
    }

    /// Tab-joined names of the transcript columns
    pub fn header_line() -> String {
        REPORT_COLUMNS[..TRANSCRIPT_COLUMNS].join("\t")
    }

    /// Tab-joined dash runs, one per transcript column, each as wide as its name
    pub fn divider_line() -> String {
        REPORT_COLUMNS[..TRANSCRIPT_COLUMNS]
            .iter()
            .map(|name| "-".repeat(name.chars().count()))
            .collect::<Vec<_>>()
            .join("\t")
    }

    /// Transcript line for a row: its metadata columns tab-joined, unquoted
    pub fn transcript_line(row: &ReportRow) -> String {
        row.transcript_values().join("\t")
    }

    fn render_bool(value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }
}
