mod cli;
mod config;

use chrono::Local;
use cli::Args;
use config::ConfigFile;
use owo_colors::OwoColorize;
use package_licenses::adapters::outbound::console::StderrProgressReporter;
use package_licenses::adapters::outbound::filesystem::{
    InputLayout, NuGetPackageSource, ProjectManifestPackageSource,
};
use package_licenses::adapters::outbound::network::{
    CachingLicenseClassifier, GitHubCredentials, GitHubLicenseClassifier,
};
use package_licenses::application::dto::{ReportFormat, ReportOutcome, ReportRequest};
use package_licenses::application::use_cases::GenerateLicenseReportUseCase;
use package_licenses::license_report::policies::{FailurePolicy, ResolutionPolicy};
use package_licenses::license_report::services::LicenseResolutionChain;
use package_licenses::shared::error::{ExitCode, LicenseReportError};
use package_licenses::shared::security::validate_not_symlink;
use package_licenses::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

/// Effective run settings: CLI flags over config file values over defaults
#[derive(Debug)]
struct Settings {
    format: ReportFormat,
    output_dir: Option<PathBuf>,
    retries: u32,
    on_failure: FailurePolicy,
    report_file_name: Option<String>,
}

impl Settings {
    fn merge(args: &Args, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let on_failure = if args.strict_classifier {
            FailurePolicy::Propagate
        } else {
            file.classifier_failure.map(Into::into).unwrap_or_default()
        };

        Ok(Self {
            format: match args.format {
                Some(format) => format,
                None => file.report_format()?.unwrap_or_default(),
            },
            output_dir: args
                .output
                .clone()
                .or(file.output_dir)
                .map(PathBuf::from),
            retries: args.retries.or(file.classifier_retries).unwrap_or(0),
            on_failure,
            report_file_name: file.report_file_name,
        })
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> Result<ExitCode> {
    let input = PathBuf::from(args.path.as_deref().unwrap_or("."));

    let file_config = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None if input.exists() => config::discover_config(&input)?,
        None => None,
    };
    let settings = Settings::merge(&args, file_config)?;

    if input.exists() {
        validate_not_symlink(&input, "read")?;
    }

    // Create adapters (Dependency Injection)
    let classifier =
        CachingLicenseClassifier::new(GitHubLicenseClassifier::new(GitHubCredentials::from_environment())?);
    let policy = ResolutionPolicy::with_retries(settings.retries, settings.on_failure);
    let resolver = LicenseResolutionChain::with_policy(classifier, policy);
    let package_source = NuGetPackageSource::new(ProjectManifestPackageSource::from_environment()?);
    let progress_reporter = StderrProgressReporter::new();

    let use_case = GenerateLicenseReportUseCase::new(package_source, resolver, progress_reporter);

    let output_dir = settings
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&input));
    let request = ReportRequest::new(input.clone(), output_dir.clone())
        .with_format(settings.format)
        .with_report_file_name(settings.report_file_name.clone());

    if !input.exists() {
        // Reported by the use case before anything is created
        let outcome = use_case.execute(request).await?;
        return Ok(exit_code_for(&outcome));
    }

    let created = prepare_output_dir(&output_dir)?;
    let result = match NuGetPackageSource::locate(&input) {
        InputLayout::Single => use_case.execute(request).await,
        InputLayout::Solution(projects) => use_case
            .execute_solution(request, projects)
            .await
            .map(|outcomes| combine_outcomes(outcomes, &output_dir)),
    };

    let produced = matches!(result, Ok(ReportOutcome::Produced { .. }));
    if created && !produced {
        let _ = std::fs::remove_dir_all(&output_dir);
    }

    result.map(|outcome| exit_code_for(&outcome))
}

/// `<temp>/<input-name>-<yyyymmddHHMMSS>`
fn default_output_dir(input: &Path) -> PathBuf {
    let input_name = input
        .canonicalize()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "packages".to_string());
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    std::env::temp_dir().join(format!("{}-{}", input_name, timestamp))
}

/// Creates the output directory; returns whether this run created it
fn prepare_output_dir(output_dir: &Path) -> Result<bool> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            return Err(LicenseReportError::FileWriteError {
                path: output_dir.to_path_buf(),
                details: "Output path exists and is not a directory".to_string(),
            }
            .into());
        }
        return Ok(false);
    }

    std::fs::create_dir_all(output_dir).map_err(|e| LicenseReportError::FileWriteError {
        path: output_dir.to_path_buf(),
        details: e.to_string(),
    })?;
    Ok(true)
}

/// A solution produced a report when any of its projects did
fn combine_outcomes(outcomes: Vec<(PathBuf, ReportOutcome)>, output_dir: &Path) -> ReportOutcome {
    let rows: usize = outcomes
        .iter()
        .filter_map(|(_, outcome)| match outcome {
            ReportOutcome::Produced { rows, .. } => Some(*rows),
            _ => None,
        })
        .sum();
    let produced = outcomes.iter().any(|(_, outcome)| outcome.is_produced());

    if produced {
        ReportOutcome::Produced {
            rows,
            output_dir: output_dir.to_path_buf(),
        }
    } else {
        ReportOutcome::NoPackages
    }
}

fn exit_code_for(outcome: &ReportOutcome) -> ExitCode {
    match outcome {
        ReportOutcome::Produced { .. } => ExitCode::Success,
        ReportOutcome::NoPackages => ExitCode::NoPackages,
        ReportOutcome::InputNotFound => ExitCode::ApplicationError,
    }
}
