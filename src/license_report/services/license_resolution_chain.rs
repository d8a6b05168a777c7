use crate::license_report::domain::{License, PackageRecord};
use crate::license_report::policies::{FailurePolicy, LicenseSourcePriority, ResolutionPolicy};
use crate::ports::outbound::{LicenseClassifier, ProgressReporter};
use crate::shared::error::LicenseReportError;
use crate::shared::Result;
use reqwest::Url;

/// LicenseResolutionChain - best-effort license determination for one package
///
/// Tries the declared license URL, then the project URL (see
/// [`LicenseSourcePriority`]); the first URL the classifier resolves wins and
/// later URLs are never classified. Packages without a usable URL resolve to
/// `None` without any I/O.
///
/// # Type Parameters
/// * `C` - LicenseClassifier implementation
pub struct LicenseResolutionChain<C> {
    classifier: C,
    policy: ResolutionPolicy,
}

impl<C: LicenseClassifier> LicenseResolutionChain<C> {
    /// Creates a chain with the default policy (one attempt, failures read as "no license")
    pub fn new(classifier: C) -> Self {
        Self::with_policy(classifier, ResolutionPolicy::default())
    }

    pub fn with_policy(classifier: C, policy: ResolutionPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Resolves the license of `package`
    ///
    /// Classifier failures that the policy treats as unresolved are reported
    /// once through `reporter` and read as "no license" for that URL.
    ///
    /// # Errors
    /// Only with [`FailurePolicy::Propagate`], once a classifier error has
    /// used up every attempt
    pub async fn resolve<PR>(&self, package: &PackageRecord, reporter: &PR) -> Result<Option<License>>
    where
        PR: ProgressReporter + ?Sized,
    {
        for url in LicenseSourcePriority::candidate_urls(package) {
            if let Some(license) = self.classify(&url, reporter).await? {
                return Ok(Some(license));
            }
        }
        Ok(None)
    }

    /// Classifies one URL, applying the retry and failure policy
    async fn classify<PR>(&self, url: &Url, reporter: &PR) -> Result<Option<License>>
    where
        PR: ProgressReporter + ?Sized,
    {
        let mut attempt = 1;
        loop {
            let error = match self.classifier.classify(url).await {
                Ok(found) => return Ok(found),
                Err(e) => e,
            };

            if attempt < self.policy.max_attempts() {
                tokio::time::sleep(self.policy.backoff(attempt)).await;
                attempt += 1;
                continue;
            }

            return match self.policy.on_failure() {
                FailurePolicy::TreatAsUnresolved => {
                    reporter.report_error(&format!(
                        "⚠️  Warning: License classification failed for {}: {}",
                        url, error
                    ));
                    Ok(None)
                }
                FailurePolicy::Propagate => Err(LicenseReportError::ClassifierError {
                    url: url.to_string(),
                    details: error.to_string(),
                }
                .into()),
            };
        }
    }
}
