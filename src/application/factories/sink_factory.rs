use crate::adapters::outbound::filesystem::DelimitedFileSink;
use crate::adapters::outbound::formatters::WriterSetting;
use crate::application::dto::ReportFormat;
use crate::ports::outbound::TabularSink;
use std::path::Path;

/// Factory for creating the tabular sinks of one report
///
/// It belongs in the application layer as it selects the infrastructure
/// adapters for a requested report format.
pub struct SinkFactory;

impl SinkFactory {
    /// Creates the sinks receiving the report rows
    ///
    /// # Arguments
    /// * `format` - Delimiter preset of the report file
    /// * `output_dir` - Directory the report file is created in
    /// * `file_name` - Report file name; `None` uses [`SinkFactory::default_file_name`]
    pub fn create(
        format: ReportFormat,
        output_dir: &Path,
        file_name: Option<&str>,
    ) -> Vec<Box<dyn TabularSink>> {
        let file_name = file_name.unwrap_or(Self::default_file_name(format));
        vec![Box::new(DelimitedFileSink::new(
            output_dir.join(file_name),
            Self::writer_setting(format),
        ))]
    }

    /// Writer setting for a report format
    pub fn writer_setting(format: ReportFormat) -> WriterSetting {
        match format {
            ReportFormat::Tsv => WriterSetting::tsv(),
            ReportFormat::Csv => WriterSetting::csv(),
            ReportFormat::Ssv => WriterSetting::ssv(),
        }
    }

    /// Default report file name for a report format
    ///
    /// # Examples
    /// ```
    /// use package_licenses::application::dto::ReportFormat;
    /// use package_licenses::application::factories::SinkFactory;
    ///
    /// assert_eq!(SinkFactory::default_file_name(ReportFormat::Tsv), "Licenses.txt");
    /// assert_eq!(SinkFactory::default_file_name(ReportFormat::Csv), "Licenses.csv");
    /// ```
    pub fn default_file_name(format: ReportFormat) -> &'static str {
        match format {
            ReportFormat::Csv => "Licenses.csv",
            ReportFormat::Tsv | ReportFormat::Ssv => "Licenses.txt",
        }
    }
}
