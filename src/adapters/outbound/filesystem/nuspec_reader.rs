use crate::license_report::domain::{PackageMetadata, PackageRecord};
use crate::shared::error::LicenseReportError;
use crate::shared::security::{validate_manifest_file, validate_not_symlink, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Raw `<metadata>` children of a nuspec document
#[derive(Debug, Default)]
struct NuspecFields {
    id: Option<String>,
    version: Option<String>,
    authors: Option<String>,
    title: Option<String>,
    project_url: Option<String>,
    license_url: Option<String>,
    require_license_acceptance: Option<String>,
    copyright: Option<String>,
}

impl NuspecFields {
    fn slot(&mut self, element: &str) -> Option<&mut Option<String>> {
        match element {
            "id" => Some(&mut self.id),
            "version" => Some(&mut self.version),
            "authors" => Some(&mut self.authors),
            "title" => Some(&mut self.title),
            "projectUrl" => Some(&mut self.project_url),
            "licenseUrl" => Some(&mut self.license_url),
            "requireLicenseAcceptance" => Some(&mut self.require_license_acceptance),
            "copyright" => Some(&mut self.copyright),
            _ => None,
        }
    }

    fn append(&mut self, element: &str, text: &str) {
        if let Some(slot) = self.slot(element) {
            slot.get_or_insert_with(String::new).push_str(text);
        }
    }

    fn into_record(self) -> Result<PackageRecord> {
        let id = non_empty(self.id).ok_or_else(|| anyhow::anyhow!("missing <id> in <metadata>"))?;
        let version = non_empty(self.version)
            .ok_or_else(|| anyhow::anyhow!("missing <version> in <metadata>"))?;

        let metadata = PackageMetadata {
            authors: non_empty(self.authors),
            title: non_empty(self.title),
            project_url: non_empty(self.project_url),
            license_url: non_empty(self.license_url),
            require_license_acceptance: self
                .require_license_acceptance
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            copyright: non_empty(self.copyright),
        };

        Ok(PackageRecord::new(id, version)?.with_metadata(metadata))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// NuspecReader reads package metadata from `.nuspec` documents
///
/// Only the direct children of `<metadata>` are read; namespaces are ignored.
pub struct NuspecReader;

impl NuspecReader {
    /// Reads and parses the nuspec file at `path`
    ///
    /// # Errors
    /// Returns [`LicenseReportError::ManifestParseError`] if the file is not a
    /// readable regular file or not a valid nuspec document
    pub fn read(path: &Path) -> Result<PackageRecord> {
        let parse_error = |details: String| -> anyhow::Error {
            LicenseReportError::ManifestParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        validate_manifest_file(path).map_err(|e| parse_error(e.to_string()))?;
        let content = fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        Self::parse(&content).map_err(|e| parse_error(e.to_string()))
    }

    /// Reads the nuspec embedded in the `.nupkg` archive at `path`
    ///
    /// A package archive keeps its nuspec as a `*.nuspec` entry at the
    /// archive root.
    ///
    /// # Errors
    /// Returns [`LicenseReportError::ManifestParseError`] if the archive
    /// cannot be opened, holds no nuspec, or the nuspec is not valid
    pub fn read_package(path: &Path) -> Result<PackageRecord> {
        let parse_error = |details: String| -> anyhow::Error {
            LicenseReportError::ManifestParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        validate_not_symlink(path, "package read").map_err(|e| parse_error(e.to_string()))?;
        let archive = File::open(path).map_err(|e| parse_error(e.to_string()))?;
        let content = Self::embedded_nuspec(archive).map_err(|e| parse_error(e.to_string()))?;
        Self::parse(&content).map_err(|e| parse_error(e.to_string()))
    }

    fn embedded_nuspec<R: Read + Seek>(reader: R) -> Result<String> {
        let mut archive = ZipArchive::new(reader)?;
        let name = archive
            .file_names()
            .filter(|name| !name.contains('/') && name.to_ascii_lowercase().ends_with(".nuspec"))
            .min()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no .nuspec entry at the archive root"))?;

        let entry = archive.by_name(&name)?;
        if entry.size() > MAX_MANIFEST_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                name,
                entry.size(),
                MAX_MANIFEST_SIZE
            );
        }

        let mut content = String::new();
        entry.take(MAX_MANIFEST_SIZE).read_to_string(&mut content)?;
        Ok(content)
    }

    /// Parses nuspec XML into a package record
    pub fn parse(xml: &str) -> Result<PackageRecord> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut fields = NuspecFields::default();
        let mut path: Vec<String> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    path.push(String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned());
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Text(ref e) => {
                    if let Some(element) = Self::metadata_child(&path) {
                        fields.append(element, &e.unescape()?);
                    }
                }
                Event::CData(ref e) => {
                    if let Some(element) = Self::metadata_child(&path) {
                        fields.append(element, &String::from_utf8_lossy(e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        fields.into_record()
    }

    /// Name of the current element if it sits directly under `<metadata>`
    fn metadata_child(path: &[String]) -> Option<&str> {
        match path {
            [.., parent, element] if parent == "metadata" => Some(element.as_str()),
            _ => None,
        }
    }
}
