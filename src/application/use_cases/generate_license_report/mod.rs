use crate::application::dto::{ReportOutcome, ReportRequest};
use crate::application::factories::SinkFactory;
use crate::application::use_cases::ReportPipeline;
use crate::license_report::services::LicenseResolutionChain;
use crate::ports::outbound::{LicenseClassifier, PackageSource, ProgressReporter};
use crate::shared::error::{summary_line, LicenseReportError};
use crate::shared::Result;
use std::path::PathBuf;

/// GenerateLicenseReportUseCase - Core use case for license report generation
///
/// This use case orchestrates the report workflow using generic dependency
/// injection for all infrastructure dependencies: enumerate packages, then
/// hand them to the [`ReportPipeline`] together with freshly created sinks.
///
/// # Type Parameters
/// * `S` - PackageSource implementation
/// * `C` - LicenseClassifier implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateLicenseReportUseCase<S, C, PR> {
    package_source: S,
    pipeline: ReportPipeline<C, PR>,
}

impl<S, C, PR> GenerateLicenseReportUseCase<S, C, PR>
where
    S: PackageSource,
    C: LicenseClassifier,
    PR: ProgressReporter,
{
    /// Creates a new GenerateLicenseReportUseCase with injected dependencies
    pub fn new(package_source: S, resolver: LicenseResolutionChain<C>, progress_reporter: PR) -> Self {
        Self {
            package_source,
            pipeline: ReportPipeline::new(resolver, progress_reporter),
        }
    }

    /// Executes the report generation for one input
    ///
    /// # Arguments
    /// * `request` - Input path, existing output directory, and report options
    ///
    /// # Returns
    /// The run outcome; a missing input is reported before any I/O
    ///
    /// # Errors
    /// Returns an error if packages cannot be enumerated or the report
    /// cannot be written
    pub async fn execute(&self, request: ReportRequest) -> Result<ReportOutcome> {
        let reporter = self.pipeline.progress_reporter();

        if !request.input_path.exists() {
            let error: anyhow::Error = LicenseReportError::InputNotFound {
                path: request.input_path.clone(),
            }
            .into();
            reporter.report_error(&format!("❌ {}", summary_line(&error)));
            return Ok(ReportOutcome::InputNotFound);
        }

        reporter.report(&format!(
            "📂 Packages path: '{}'",
            request.input_path.display()
        ));

        let packages = self
            .package_source
            .packages(&request.input_path, reporter)?;
        if packages.is_empty() {
            reporter.report_error("⚠️  No Packages");
            return Ok(ReportOutcome::NoPackages);
        }

        reporter.report(&format!("📦 Detected {} package(s)", packages.len()));
        reporter.report("🔍 Resolving licenses...");

        let mut sinks = SinkFactory::create(
            request.format,
            &request.output_dir,
            request.report_file_name.as_deref(),
        );
        let produced = self
            .pipeline
            .run(&packages, &mut sinks, &request.output_dir)
            .await?;

        if !produced {
            return Ok(ReportOutcome::NoPackages);
        }
        Ok(ReportOutcome::Produced {
            rows: packages.len(),
            output_dir: request.output_dir,
        })
    }

    /// Executes one report per project file
    ///
    /// Each project reports into `<output_dir>/<project file name>/`. A
    /// project that produces nothing leaves no directory behind.
    ///
    /// # Returns
    /// One outcome per project, in the order given
    pub async fn execute_solution(
        &self,
        request: ReportRequest,
        project_files: Vec<PathBuf>,
    ) -> Result<Vec<(PathBuf, ReportOutcome)>> {
        let reporter = self.pipeline.progress_reporter();
        if project_files.is_empty() {
            reporter.report_error("⚠️  No Packages");
        }

        let mut outcomes = Vec::with_capacity(project_files.len());
        for project in project_files {
            let project_name = project
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string());
            let output_dir = request.output_dir.join(&project_name);

            reporter.report(&format!("\n📁 Project: {}", project_name));
            std::fs::create_dir_all(&output_dir).map_err(|e| {
                LicenseReportError::FileWriteError {
                    path: output_dir.clone(),
                    details: e.to_string(),
                }
            })?;

            let outcome = self
                .execute(request.for_project(project.clone(), output_dir.clone()))
                .await?;
            if !outcome.is_produced() {
                // Only removes the directory while it is still empty
                let _ = std::fs::remove_dir(&output_dir);
            }
            outcomes.push((project, outcome));
        }

        Ok(outcomes)
    }
}
