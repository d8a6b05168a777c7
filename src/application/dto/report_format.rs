/// Delimiter preset of the tabular report
///
/// Shared by the CLI, the config file, and the sink factory, which maps each
/// preset to its writer setting and default file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Tab-separated (default)
    #[default]
    Tsv,
    /// Comma-separated
    Csv,
    /// Space-separated
    Ssv,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(ReportFormat::Tsv),
            "csv" | "comma" => Ok(ReportFormat::Csv),
            "ssv" | "space" => Ok(ReportFormat::Ssv),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'tsv', 'csv' or 'ssv'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Tsv => write!(f, "tsv"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Ssv => write!(f, "ssv"),
        }
    }
}
