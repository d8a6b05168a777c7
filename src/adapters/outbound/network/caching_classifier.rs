use crate::license_report::domain::License;
use crate::ports::outbound::LicenseClassifier;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Url;
use std::sync::Arc;

/// CachingLicenseClassifier wraps a LicenseClassifier and adds in-memory caching.
///
/// Many packages share a license or project URL (the same license page, the
/// same repository), so each distinct URL is classified once per run. Both
/// answers are cached, "no license" included; errors are not, so a later
/// retry reaches the inner classifier again.
pub struct CachingLicenseClassifier<C: LicenseClassifier> {
    inner: C,
    cache: Arc<DashMap<Url, Option<License>>>,
}

impl<C: LicenseClassifier> CachingLicenseClassifier<C> {
    /// Creates a new caching classifier wrapping the given inner classifier
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<C: LicenseClassifier> LicenseClassifier for CachingLicenseClassifier<C> {
    async fn classify(&self, url: &Url) -> Result<Option<License>> {
        if let Some(cached) = self.cache.get(url) {
            return Ok(cached.clone());
        }

        let license = self.inner.classify(url).await?;
        self.cache.insert(url.clone(), license.clone());

        Ok(license)
    }
}
