use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let CI jobs tell an empty inventory apart from a broken run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - a report was produced
    Success = 0,
    /// The input contained no packages, nothing was reported
    NoPackages = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (input not found, I/O error, network error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoPackages => write!(f, "No Packages (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for license report generation.
///
/// Every variant renders as one message line plus a hint line, so the
/// transcript never shows a stack trace.
#[derive(Debug, Error)]
pub enum LicenseReportError {
    #[error("Not Found: '{}'\n\n💡 Hint: Specify a packages folder, a project file, or a solution folder", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to parse package manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a well-formed project file or .nuspec")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid license file name: '{name}'\nReason: {reason}\n\n💡 Hint: License ids and source URLs must map to a single file name")]
    InvalidFileName { name: String, reason: String },

    #[error("License classification failed for {url}\nDetails: {details}\n\n💡 Hint: Set PACKAGE_LICENSES_GITHUB_QUERY to raise the API rate limit")]
    ClassifierError { url: String, details: String },

    /// Validation error for builder patterns and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// First line of an error message, for one-line transcript warnings
///
/// Multi-line errors carry a hint after the first line.
pub fn summary_line(error: &anyhow::Error) -> String {
    error
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
