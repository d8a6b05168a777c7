use super::NuspecReader;
use crate::license_report::domain::PackageRecord;
use crate::ports::outbound::{PackageSource, ProgressReporter};
use crate::shared::error::{summary_line, LicenseReportError};
use crate::shared::security::validate_manifest_file;
use crate::shared::Result;
use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the global packages folder
const PACKAGE_STORE_ENV: &str = "NUGET_PACKAGES";

/// A `<PackageReference>` declared in a project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub id: String,
    pub version: String,
}

/// ProjectManifestPackageSource adapter for SDK-style project files
///
/// Reads the `<PackageReference>` items of a `*.csproj`/`*.fsproj`/`*.vbproj`
/// and resolves each against the global package store at
/// `<store>/<id>/<version>/<id>.nuspec` (all lowercase).
pub struct ProjectManifestPackageSource {
    package_store: PathBuf,
}

impl ProjectManifestPackageSource {
    pub fn new(package_store: PathBuf) -> Self {
        Self { package_store }
    }

    /// Uses `NUGET_PACKAGES`, or `~/.nuget/packages` when it is unset
    ///
    /// # Errors
    /// Returns an error if neither the variable nor a home directory is available
    pub fn from_environment() -> Result<Self> {
        if let Some(store) = std::env::var_os(PACKAGE_STORE_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(store)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot locate the global packages folder: no home directory.\n\n💡 Hint: Set {} to the global packages folder",
                PACKAGE_STORE_ENV
            )
        })?;
        Ok(Self::new(home.join(".nuget").join("packages")))
    }

    pub fn package_store(&self) -> &Path {
        &self.package_store
    }

    /// Parses the package references of a project file, in declaration order
    ///
    /// The version may be given as a `Version` attribute or a `<Version>` child
    /// element. References without a version are skipped.
    pub fn parse_references(xml: &str) -> Result<Vec<PackageReference>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut references = Vec::new();
        let mut open: Option<(String, Option<String>)> = None;
        let mut in_version = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(ref e) if is_package_reference(e) => {
                    let (id, version) = reference_attributes(e)?;
                    references.extend(complete(id, version));
                }
                Event::Start(ref e) if is_package_reference(e) => {
                    open = Some(reference_attributes(e)?);
                }
                Event::Start(ref e) if open.is_some() && e.name().local_name().as_ref() == b"Version" => {
                    in_version = true;
                }
                Event::Text(ref e) if in_version => {
                    if let Some((_, version)) = open.as_mut() {
                        *version = Some(e.unescape()?.trim().to_string());
                    }
                }
                Event::End(ref e) => match e.name().local_name().as_ref() {
                    b"Version" => in_version = false,
                    b"PackageReference" => {
                        if let Some((id, version)) = open.take() {
                            references.extend(complete(id, version));
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(references)
    }

    /// Store location of a reference's nuspec
    fn nuspec_path(&self, reference: &PackageReference) -> PathBuf {
        let id = reference.id.to_lowercase();
        self.package_store
            .join(&id)
            .join(reference.version.to_lowercase())
            .join(format!("{}.nuspec", id))
    }

    /// Resolves a reference against the store; identity only when it is missing there
    ///
    /// # Errors
    /// Returns an error if the reference is not a concrete package identity
    /// (a floating `2.*`, a range `[1.0,2.0)`, an MSBuild `$(Property)`)
    fn resolve(&self, reference: &PackageReference) -> Result<PackageRecord> {
        let identity = PackageRecord::new(reference.id.clone(), reference.version.clone())
            .context("not a concrete package version")?;

        let nuspec = self.nuspec_path(reference);
        if nuspec.is_file() {
            if let Ok(record) = NuspecReader::read(&nuspec) {
                return Ok(record);
            }
        }
        Ok(identity)
    }
}

impl PackageSource for ProjectManifestPackageSource {
    fn packages(
        &self,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<PackageRecord>> {
        let parse_error = |details: String| -> anyhow::Error {
            LicenseReportError::ManifestParseError {
                path: root.to_path_buf(),
                details,
            }
            .into()
        };

        validate_manifest_file(root).map_err(|e| parse_error(e.to_string()))?;
        let content = fs::read_to_string(root).map_err(|e| parse_error(e.to_string()))?;
        let references = Self::parse_references(&content).map_err(|e| parse_error(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for reference in references {
            let key = format!(
                "{}:{}",
                reference.id.to_lowercase(),
                reference.version.to_lowercase()
            );
            if !seen.insert(key) {
                continue;
            }
            match self.resolve(&reference) {
                Ok(record) => records.push(record),
                Err(e) => reporter.report_error(&format!(
                    "⚠️  Warning: Skipped package reference {} {}: {}",
                    reference.id,
                    reference.version,
                    summary_line(&e)
                )),
            }
        }
        Ok(records)
    }
}

fn is_package_reference(e: &BytesStart) -> bool {
    e.name().local_name().as_ref() == b"PackageReference"
}

fn reference_attributes(e: &BytesStart) -> Result<(String, Option<String>)> {
    let mut id = String::new();
    let mut version = None;
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?.trim().to_string();
        match attr.key.local_name().as_ref() {
            b"Include" => id = value,
            b"Version" => version = Some(value),
            _ => {}
        }
    }
    Ok((id, version))
}

fn complete(id: String, version: Option<String>) -> Option<PackageReference> {
    match version {
        Some(version) if !id.is_empty() && !version.is_empty() => {
            Some(PackageReference { id, version })
        }
        _ => None,
    }
}
