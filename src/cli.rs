use clap::Parser;
use package_licenses::application::dto::ReportFormat;

/// Inventory the licenses of NuGet package dependencies
#[derive(Parser, Debug)]
#[command(name = "package-licenses")]
#[command(version)]
#[command(
    about = "Resolve the licenses of NuGet packages, save their texts, and write a license report",
    long_about = None
)]
pub struct Args {
    /// Path to a packages folder, a project file, or a solution folder
    /// (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output directory (defaults to a new timestamped directory under the temp dir)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report format: tsv, csv, or ssv
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Number of times a failed license lookup is retried
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Fail the package's license resolution when a lookup errors,
    /// instead of reporting it as "no license"
    #[arg(long)]
    pub strict_classifier: bool,

    /// Path to a config file (defaults to package-licenses.config.yml in the input directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
