//! package-licenses - License inventory for NuGet package dependencies
//!
//! This library resolves the license of every package in a packages folder
//! or project file, saves each license text once, and writes a tabular
//! report, following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`license_report`): Package records, licenses, report rows,
//!   and the services that resolve and materialize them
//! - **Application Layer** (`application`): Use cases, DTOs, and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use package_licenses::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let classifier = CachingLicenseClassifier::new(GitHubLicenseClassifier::new(
//!     GitHubCredentials::from_environment(),
//! )?);
//! let package_source = NuGetPackageSource::new(ProjectManifestPackageSource::from_environment()?);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = GenerateLicenseReportUseCase::new(
//!     package_source,
//!     LicenseResolutionChain::new(classifier),
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = ReportRequest::new(PathBuf::from("packages"), PathBuf::from("licenses"));
//! let outcome = use_case.execute(request).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod license_report;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DelimitedFileSink, InputLayout, LocalFolderPackageSource, NuGetPackageSource,
        NuspecReader, ProjectManifestPackageSource,
    };
    pub use crate::adapters::outbound::formatters::{
        AsyncDelimitedRecordWriter, DelimitedRecordWriter, FieldValue, QuoteStyle, WriterSetting,
    };
    pub use crate::adapters::outbound::network::{
        CachingLicenseClassifier, GitHubCredentials, GitHubLicenseClassifier,
    };
    pub use crate::application::dto::{ReportFormat, ReportOutcome, ReportRequest};
    pub use crate::application::factories::SinkFactory;
    pub use crate::application::use_cases::{GenerateLicenseReportUseCase, ReportPipeline};
    pub use crate::license_report::domain::{
        License, PackageMetadata, PackageRecord, ReportRow, REPORT_COLUMNS,
    };
    pub use crate::license_report::policies::{
        FailurePolicy, LicenseSourcePriority, ResolutionPolicy,
    };
    pub use crate::license_report::services::{
        LicenseFileMaterializer, LicenseResolutionChain, ReportRowBuilder,
    };
    pub use crate::ports::outbound::{
        LicenseClassifier, PackageSource, ProgressReporter, TabularSink,
    };
    pub use crate::shared::error::{ExitCode, LicenseReportError};
    pub use crate::shared::Result;
}
