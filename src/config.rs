//! Configuration file support for package-licenses.
//!
//! Provides YAML-based configuration through `package-licenses.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use package_licenses::application::dto::ReportFormat;
use package_licenses::license_report::policies::FailurePolicy;
use package_licenses::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "package-licenses.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub output_dir: Option<String>,
    pub classifier_retries: Option<u32>,
    pub classifier_failure: Option<ClassifierFailure>,
    pub report_file_name: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// What a failed license lookup means for the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierFailure {
    /// Report the failure and treat the license as not found
    Unresolved,
    /// Fail the package's license resolution
    Error,
}

impl From<ClassifierFailure> for FailurePolicy {
    fn from(value: ClassifierFailure) -> Self {
        match value {
            ClassifierFailure::Unresolved => FailurePolicy::TreatAsUnresolved,
            ClassifierFailure::Error => FailurePolicy::Propagate,
        }
    }
}

impl ConfigFile {
    /// The configured report format, validated.
    pub fn report_format(&self) -> Result<Option<ReportFormat>> {
        match self.format.as_deref() {
            None => Ok(None),
            Some(raw) => raw
                .parse::<ReportFormat>()
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Invalid config: {}", e)),
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config next to the input. Returns `None` silently if not found.
///
/// For a project file input the config is looked up in the file's directory.
pub fn discover_config(input: &Path) -> Result<Option<ConfigFile>> {
    let dir = if input.is_file() {
        match input.parent() {
            Some(parent) => parent,
            None => return Ok(None),
        }
    } else {
        input
    };
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.report_format()?;

    if let Some(ref name) = config.report_file_name {
        if name.trim().is_empty() {
            bail!(
                "Invalid config: report_file_name must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default name (e.g., \"Licenses.txt\")."
            );
        }
    }
    if let Some(ref dir) = config.output_dir {
        if dir.trim().is_empty() {
            bail!(
                "Invalid config: output_dir must not be empty.\n\n\
                 💡 Hint: Remove the field to write into a new temporary directory."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
