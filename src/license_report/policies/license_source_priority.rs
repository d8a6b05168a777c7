use crate::license_report::domain::PackageRecord;
use reqwest::Url;

/// LicenseSourcePriority policy for choosing which declared URLs to classify
///
/// Priority order:
/// 1. licenseUrl (an explicit license link is the stronger signal)
/// 2. projectUrl
///
/// A URL is only a candidate when it is non-blank and parses as an absolute URI.
pub struct LicenseSourcePriority;

impl LicenseSourcePriority {
    /// Returns the usable candidate URLs for a package, highest priority first
    pub fn candidate_urls(package: &PackageRecord) -> Vec<Url> {
        [package.license_url(), package.project_url()]
            .into_iter()
            .filter_map(Self::parse_absolute)
            .collect()
    }

    /// Parses `raw` if it is a well-formed absolute URI
    ///
    /// Unescaped whitespace anywhere makes a URI malformed; it is never trimmed away.
    pub fn parse_absolute(raw: Option<&str>) -> Option<Url> {
        let raw = raw?;
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return None;
        }
        Url::parse(raw).ok()
    }
}
