use crate::shared::Result;

/// Maximum length for package ids (NuGet limits ids to 100 characters)
const MAX_PACKAGE_ID_LENGTH: usize = 100;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for a NuGet package id with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: String) -> Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Package id cannot be empty");
        }

        if id.len() > MAX_PACKAGE_ID_LENGTH {
            anyhow::bail!(
                "Package id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            );
        }

        // Ids end up in file names, so only the NuGet id alphabet is accepted
        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Package id '{}' contains invalid characters. Only alphanumeric, dots, hyphens, and underscores are allowed.",
                id
            );
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion(String);

impl PackageVersion {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '+')
        {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, and plus are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// License-relevant .nuspec metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub authors: Option<String>,
    pub title: Option<String>,
    pub project_url: Option<String>,
    pub license_url: Option<String>,
    pub require_license_acceptance: bool,
    pub copyright: Option<String>,
}

/// One dependency as produced by a package source
///
/// `id` and `version` together identify the record within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    id: PackageId,
    version: PackageVersion,
    metadata: PackageMetadata,
}

impl PackageRecord {
    pub fn new(id: String, version: String) -> Result<Self> {
        Ok(Self {
            id: PackageId::new(id)?,
            version: PackageVersion::new(version)?,
            metadata: PackageMetadata::default(),
        })
    }

    pub fn with_metadata(mut self, metadata: PackageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn authors(&self) -> Option<&str> {
        self.metadata.authors.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    pub fn project_url(&self) -> Option<&str> {
        self.metadata.project_url.as_deref()
    }

    pub fn license_url(&self) -> Option<&str> {
        self.metadata.license_url.as_deref()
    }

    pub fn require_license_acceptance(&self) -> bool {
        self.metadata.require_license_acceptance
    }

    pub fn copyright(&self) -> Option<&str> {
        self.metadata.copyright.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_new_valid() {
        let id = PackageId::new("Newtonsoft.Json".to_string()).unwrap();
        assert_eq!(id.as_str(), "Newtonsoft.Json");
    }

    #[test]
    fn test_package_id_rejects_empty_and_separators() {
        assert!(PackageId::new("".to_string()).is_err());
        assert!(PackageId::new("../evil".to_string()).is_err());
        assert!(PackageId::new("a b".to_string()).is_err());
    }

    #[test]
    fn test_package_version_prerelease_and_metadata() {
        let version = PackageVersion::new("2.0.0-beta.1+build5".to_string()).unwrap();
        assert_eq!(version.as_str(), "2.0.0-beta.1+build5");
    }

    #[test]
    fn test_package_version_new_empty() {
        assert!(PackageVersion::new("".to_string()).is_err());
    }

    #[test]
    fn test_package_record_defaults_to_empty_metadata() {
        let record = PackageRecord::new("Serilog".to_string(), "2.12.0".to_string()).unwrap();
        assert_eq!(record.id(), "Serilog");
        assert_eq!(record.version(), "2.12.0");
        assert_eq!(record.authors(), None);
        assert_eq!(record.license_url(), None);
        assert!(!record.require_license_acceptance());
    }

    #[test]
    fn test_package_record_with_metadata() {
        let record = PackageRecord::new("NUnit".to_string(), "3.13.3".to_string())
            .unwrap()
            .with_metadata(PackageMetadata {
                authors: Some("Charlie Poole, Rob Prouse".to_string()),
                license_url: Some("https://licenses.nuget.org/MIT".to_string()),
                require_license_acceptance: true,
                ..Default::default()
            });
        assert_eq!(record.authors(), Some("Charlie Poole, Rob Prouse"));
        assert_eq!(record.license_url(), Some("https://licenses.nuget.org/MIT"));
        assert!(record.require_license_acceptance());
        assert_eq!(record.title(), None);
    }

    #[test]
    fn test_package_id_display() {
        let id = PackageId::new("Serilog".to_string()).unwrap();
        assert_eq!(format!("{}", id), "Serilog");
    }
}
