/// Network adapters for license classification
mod caching_classifier;
mod github_classifier;

pub use caching_classifier::CachingLicenseClassifier;
pub use github_classifier::{GitHubCredentials, GitHubLicenseClassifier};
