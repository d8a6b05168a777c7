use crate::license_report::domain::License;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Url;

/// LicenseClassifier port for turning a URL into a license determination
///
/// This port abstracts the external service (e.g. the GitHub license API)
/// that decides which license a URL points at and supplies its text.
///
/// # Async Support
/// Classification suspends only on network I/O.
/// Implementations must be `Send + Sync` so they can be shared and cached.
#[async_trait]
pub trait LicenseClassifier: Send + Sync {
    /// Classifies the license behind `url`
    ///
    /// # Returns
    /// - `Ok(Some(license))` when the URL resolves to a license
    /// - `Ok(None)` when the URL is not recognised or has no license
    ///
    /// # Errors
    /// Returns an error if the network request fails, the service answers
    /// with an unexpected status, or the response cannot be parsed
    async fn classify(&self, url: &Url) -> Result<Option<License>>;
}
