use crate::license_report::domain::{License, PackageRecord};
use crate::shared::error::LicenseReportError;
use crate::shared::security::validate_file_name;
use crate::shared::Result;
use reqwest::Url;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// LicenseFileMaterializer saves license texts, one file per distinct license
///
/// File names:
/// - master license: `<license id>.txt`, shared by every package declaring it
/// - snapshot with a source: the source's path and query, `/` and `?`
///   replaced by `-`, plus `.txt`
/// - otherwise: `<package id>.<package version>.txt`
///
/// A file is written only if nothing exists at its path yet; the name is
/// returned either way. Reserved names (the report files sharing the output
/// directory) are rejected like unsafe names.
#[derive(Debug, Default, Clone)]
pub struct LicenseFileMaterializer {
    reserved_names: Vec<String>,
}

impl LicenseFileMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materializer that never claims any of `names` for a license file
    pub fn with_reserved_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            reserved_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Saves the license text of `license` into `output_dir`
    ///
    /// # Returns
    /// The file name (not path), or `None` when there is no text to save
    ///
    /// # Errors
    /// Returns an error if the derived file name is unsafe or the file cannot be written
    pub fn materialize(
        &self,
        license: Option<&License>,
        package: &PackageRecord,
        output_dir: &Path,
    ) -> Result<Option<String>> {
        let Some(license) = license else {
            return Ok(None);
        };
        let Some(text) = license.text().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let filename = Self::file_name(license, package);
        validate_file_name(&filename)?;
        self.check_not_reserved(&filename)?;

        let path = output_dir.join(&filename);
        Self::write_once(&path, text)?;
        Ok(Some(filename))
    }

    /// Derives the license file name for a license/package pair
    pub fn file_name(license: &License, package: &PackageRecord) -> String {
        if license.is_master() {
            return format!("{}.txt", license.id());
        }

        license
            .source()
            .and_then(Self::source_stem)
            .map(|stem| format!("{}.txt", stem))
            .unwrap_or_else(|| format!("{}.{}.txt", package.id(), package.version()))
    }

    /// File systems may fold case, so `licenses.txt` collides with `Licenses.txt`
    fn check_not_reserved(&self, filename: &str) -> Result<()> {
        if self
            .reserved_names
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(filename))
        {
            return Err(LicenseReportError::InvalidFileName {
                name: filename.to_string(),
                reason: "collides with the report file name".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Path and query of the source URI, flattened into one name
    fn source_stem(source: &Url) -> Option<String> {
        let mut path_and_query = source.path().to_string();
        if let Some(query) = source.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let stem = path_and_query
            .strip_prefix('/')
            .unwrap_or(&path_and_query)
            .replace(['/', '?'], "-");
        (!stem.is_empty()).then_some(stem)
    }

    /// Creates `path` with `text` unless something already exists there
    ///
    /// `create_new` checks and creates in one step, so an existing license
    /// file is never truncated or rewritten.
    fn write_once(path: &Path, text: &str) -> Result<()> {
        Self::create_and_fill(path, |file| {
            file.write_all(text.as_bytes())?;
            file.flush()
        })
    }

    /// Creates `path` and fills it; a file left incomplete by `fill` is removed
    fn create_and_fill<F>(path: &Path, fill: F) -> Result<()>
    where
        F: FnOnce(&mut File) -> std::io::Result<()>,
    {
        let write_error = |e: std::io::Error| -> anyhow::Error {
            LicenseReportError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        };

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => return Err(write_error(e)),
        };

        if let Err(e) = fill(&mut file) {
            drop(file);
            // The write-once rule would keep a partial file forever
            let _ = std::fs::remove_file(path);
            return Err(write_error(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn package(id: &str, version: &str) -> PackageRecord {
        PackageRecord::new(id.to_string(), version.to_string()).unwrap()
    }

    fn mit_master() -> License {
        License::new("MIT", "MIT License")
            .with_text("MIT...")
            .as_master()
    }

    #[test]
    fn test_master_license_file_is_written_once_for_two_packages() {
        let temp_dir = TempDir::new().unwrap();
        let materializer = LicenseFileMaterializer::new();
        let license = mit_master();

        let first = materializer
            .materialize(Some(&license), &package("Newtonsoft.Json", "13.0.1"), temp_dir.path())
            .unwrap();
        let second = materializer
            .materialize(Some(&license), &package("Serilog", "2.12.0"), temp_dir.path())
            .unwrap();

        assert_eq!(first.as_deref(), Some("MIT.txt"));
        assert_eq!(first, second);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("MIT.txt")).unwrap(),
            "MIT..."
        );
    }

    #[test]
    fn test_existing_file_is_never_rewritten() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("MIT.txt"), "previous run").unwrap();

        let filename = LicenseFileMaterializer::new()
            .materialize(Some(&mit_master()), &package("NUnit", "3.13.3"), temp_dir.path())
            .unwrap();

        assert_eq!(filename.as_deref(), Some("MIT.txt"));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("MIT.txt")).unwrap(),
            "previous run"
        );
    }

    #[test]
    fn test_snapshot_name_from_source_path_and_query() {
        let source =
            Url::parse("https://raw.githubusercontent.com/JamesNK/Newtonsoft.Json/master/LICENSE.md?raw=1")
                .unwrap();
        let license = License::new("MIT", "MIT License")
            .with_text("text")
            .with_source(source);

        assert_eq!(
            LicenseFileMaterializer::file_name(&license, &package("Newtonsoft.Json", "13.0.1")),
            "JamesNK-Newtonsoft.Json-master-LICENSE.md-raw=1.txt"
        );
    }

    #[test]
    fn test_snapshot_without_source_uses_package_identity() {
        let license = License::new("Custom", "Custom License").with_text("text");
        assert_eq!(
            LicenseFileMaterializer::file_name(&license, &package("Acme.Tools", "1.2.3")),
            "Acme.Tools.1.2.3.txt"
        );
    }

    #[test]
    fn test_snapshot_with_root_source_falls_back_to_package_identity() {
        let license = License::new("Custom", "Custom License")
            .with_text("text")
            .with_source(Url::parse("https://example.org/").unwrap());
        assert_eq!(
            LicenseFileMaterializer::file_name(&license, &package("Acme.Tools", "1.2.3")),
            "Acme.Tools.1.2.3.txt"
        );
    }

    #[test]
    fn test_no_license_or_no_text_performs_no_io() {
        let temp_dir = TempDir::new().unwrap();
        let materializer = LicenseFileMaterializer::new();
        let pkg = package("Serilog", "2.12.0");

        assert_eq!(materializer.materialize(None, &pkg, temp_dir.path()).unwrap(), None);

        let identity_only = License::new("MIT", "MIT License").as_master();
        assert_eq!(
            materializer
                .materialize(Some(&identity_only), &pkg, temp_dir.path())
                .unwrap(),
            None
        );

        let empty_text = License::new("MIT", "MIT License").with_text("").as_master();
        assert_eq!(
            materializer
                .materialize(Some(&empty_text), &pkg, temp_dir.path())
                .unwrap(),
            None
        );

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unsafe_license_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let license = License::new("../escape", "Bad").with_text("x").as_master();

        let result = LicenseFileMaterializer::new().materialize(
            Some(&license),
            &package("Serilog", "2.12.0"),
            temp_dir.path(),
        );

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid license file name"));
    }

    #[test]
    fn test_missing_output_directory_is_write_error() {
        let result = LicenseFileMaterializer::new().materialize(
            Some(&mit_master()),
            &package("Serilog", "2.12.0"),
            Path::new("/nonexistent/output/dir"),
        );

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to write to file"));
    }

    #[test]
    fn test_license_file_named_like_report_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let license = License::new("MIT", "MIT License")
            .with_text("text")
            .with_source(Url::parse("https://example.org/Licenses").unwrap());
        let materializer = LicenseFileMaterializer::with_reserved_names(["Licenses.txt"]);

        let result = materializer.materialize(
            Some(&license),
            &package("Serilog", "2.12.0"),
            temp_dir.path(),
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid license file name: 'Licenses.txt'"));
        assert!(message.contains("collides with the report file name"));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_reserved_names_ignore_case() {
        let temp_dir = TempDir::new().unwrap();
        let license = License::new("licenses", "Odd").with_text("x").as_master();
        let materializer = LicenseFileMaterializer::with_reserved_names(["Licenses.txt"]);

        assert!(materializer
            .materialize(Some(&license), &package("Serilog", "2.12.0"), temp_dir.path())
            .is_err());
        assert!(materializer
            .materialize(Some(&mit_master()), &package("Serilog", "2.12.0"), temp_dir.path())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("MIT.txt");

        let result = LicenseFileMaterializer::create_and_fill(&path, |file| {
            file.write_all(b"MIT Lic")?;
            Err(std::io::Error::other("No space left on device"))
        });

        let message = result.unwrap_err().to_string();
        assert!(message.contains("Failed to write to file"));
        assert!(message.contains("No space left on device"));
        assert!(!path.exists());
    }
}
