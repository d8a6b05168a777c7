use super::ReportFormat;
use std::path::PathBuf;

/// ReportRequest - Internal request DTO for the report generation use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Packages folder, project manifest, or solution folder
    pub input_path: PathBuf,
    /// Directory receiving the report and license text files; must exist
    pub output_dir: PathBuf,
    /// Delimiter preset of the tabular report
    pub format: ReportFormat,
    /// Report file name; `None` uses the preset's default
    pub report_file_name: Option<String>,
}

impl ReportRequest {
    pub fn new(input_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_path,
            output_dir,
            format: ReportFormat::default(),
            report_file_name: None,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_report_file_name(mut self, report_file_name: Option<String>) -> Self {
        self.report_file_name = report_file_name;
        self
    }

    /// Same options, different input and output locations
    pub fn for_project(&self, input_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_path,
            output_dir,
            ..self.clone()
        }
    }
}
