use crate::license_report::domain::{License, PackageRecord, ReportRow, REPORT_COLUMNS};
use crate::license_report::services::{
    LicenseFileMaterializer, LicenseResolutionChain, ReportRowBuilder,
};
use crate::ports::outbound::{LicenseClassifier, ProgressReporter, TabularSink};
use crate::shared::error::summary_line;
use crate::shared::Result;
use std::path::Path;

/// ReportPipeline - drives one report run over a package sequence
///
/// Packages are processed strictly one at a time, in the order given:
/// resolve license, save license text, build row, append the row to every
/// sink and a line to the transcript. The materializer's write-once check is
/// only safe with a single writer per output directory, so there is no
/// per-package concurrency.
///
/// # Type Parameters
/// * `C` - LicenseClassifier implementation
/// * `PR` - ProgressReporter implementation
pub struct ReportPipeline<C, PR> {
    resolver: LicenseResolutionChain<C>,
    progress_reporter: PR,
}

impl<C, PR> ReportPipeline<C, PR>
where
    C: LicenseClassifier,
    PR: ProgressReporter,
{
    pub fn new(resolver: LicenseResolutionChain<C>, progress_reporter: PR) -> Self {
        Self {
            resolver,
            progress_reporter,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Runs the pipeline
    ///
    /// # Returns
    /// `false` without touching any sink when `packages` is empty, `true` otherwise
    ///
    /// # Errors
    /// Returns the first sink error. Every sink is finished before the error
    /// propagates, so rows appended so far are flushed, not discarded.
    pub async fn run(
        &self,
        packages: &[PackageRecord],
        sinks: &mut [Box<dyn TabularSink>],
        output_dir: &Path,
    ) -> Result<bool> {
        if packages.is_empty() {
            return Ok(false);
        }

        self.progress_reporter.report("");
        self.progress_reporter
            .report(&ReportRowBuilder::header_line());
        self.progress_reporter
            .report(&ReportRowBuilder::divider_line());

        let written = self.write_rows(packages, sinks, output_dir).await;
        let finished = Self::finish_sinks(sinks).await;
        self.progress_reporter.report("");

        written?;
        finished?;

        self.progress_reporter
            .report_completion(&format!("Saved to '{}'", output_dir.display()));
        Ok(true)
    }

    async fn write_rows(
        &self,
        packages: &[PackageRecord],
        sinks: &mut [Box<dyn TabularSink>],
        output_dir: &Path,
    ) -> Result<()> {
        // License files must not overwrite a report file in the same directory
        let materializer = LicenseFileMaterializer::with_reserved_names(
            sinks.iter().filter_map(|sink| sink.file_name().map(String::from)),
        );

        for sink in sinks.iter_mut() {
            sink.write_header(&REPORT_COLUMNS).await?;
        }

        let total = packages.len();
        for (idx, package) in packages.iter().enumerate() {
            let row = self.process_package(package, &materializer, output_dir).await;

            self.progress_reporter
                .report(&ReportRowBuilder::transcript_line(&row));
            self.progress_reporter
                .report_progress(idx + 1, total, Some(package.id()));

            for sink in sinks.iter_mut() {
                sink.write_row(row.values()).await?;
            }
        }
        Ok(())
    }

    /// Resolves, saves, and builds the row of one package
    ///
    /// Failures degrade the row (empty license or file columns) and are
    /// reported; they never abort the run.
    async fn process_package(
        &self,
        package: &PackageRecord,
        materializer: &LicenseFileMaterializer,
        output_dir: &Path,
    ) -> ReportRow {
        let license: Option<License> = match self
            .resolver
            .resolve(package, &self.progress_reporter)
            .await
        {
            Ok(license) => license,
            Err(e) => {
                self.warn(package, "resolve the license", &e);
                None
            }
        };

        let license_file = match materializer.materialize(license.as_ref(), package, output_dir) {
            Ok(file_name) => file_name,
            Err(e) => {
                self.warn(package, "save the license text", &e);
                None
            }
        };

        ReportRowBuilder::build_row(package, license.as_ref(), license_file.as_deref())
    }

    /// Finishes every sink, returning the first failure
    async fn finish_sinks(sinks: &mut [Box<dyn TabularSink>]) -> Result<()> {
        let mut first_error = None;
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.finish().await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn warn(&self, package: &PackageRecord, action: &str, error: &anyhow::Error) {
        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Failed to {} for {} {}: {}",
            action,
            package.id(),
            package.version(),
            summary_line(error)
        ));
    }
}
