use crate::shared::error::LicenseReportError;
use crate::shared::Result;
use std::time::Duration;

/// Base delay between classifier retries; attempt `n` waits `n * base`
const RETRY_BASE_DELAY_MS: u64 = 100;

/// What the resolution chain does once a classifier error is final
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the error and treat the URL as "no license found"
    #[default]
    TreatAsUnresolved,
    /// Fail the resolution of that package
    Propagate,
}

/// ResolutionPolicy makes the classifier failure handling explicit
///
/// `Ok(None)` from a classifier is a definitive answer and is never retried;
/// only errors count against `max_attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    max_attempts: u32,
    on_failure: FailurePolicy,
}

impl ResolutionPolicy {
    pub fn new(max_attempts: u32, on_failure: FailurePolicy) -> Result<Self> {
        if max_attempts == 0 {
            return Err(LicenseReportError::Validation {
                message: "classifier attempts must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self {
            max_attempts,
            on_failure,
        })
    }

    /// Builds a policy from a retry count (attempts = retries + 1)
    pub fn with_retries(retries: u32, on_failure: FailurePolicy) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            on_failure,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn on_failure(&self) -> FailurePolicy {
        self.on_failure
    }

    /// Delay to wait after the failed `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt))
    }
}

impl Default for ResolutionPolicy {
    /// A single attempt; failures read as "no license"
    fn default() -> Self {
        Self {
            max_attempts: 1,
            on_failure: FailurePolicy::TreatAsUnresolved,
        }
    }
}
