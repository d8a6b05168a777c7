use async_trait::async_trait;
use package_licenses::prelude::*;
use reqwest::Url;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock LicenseClassifier for testing that records every URL it is asked about
#[derive(Default, Clone)]
pub struct MockLicenseClassifier {
    pub licenses: HashMap<String, License>,
    pub failing: HashSet<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockLicenseClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, url: &str, license: License) -> Self {
        self.licenses.insert(url.to_string(), license);
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LicenseClassifier for MockLicenseClassifier {
    async fn classify(&self, url: &Url) -> Result<Option<License>> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.failing.contains(url.as_str()) {
            anyhow::bail!("Mock classifier failure for {}", url);
        }
        Ok(self.licenses.get(url.as_str()).cloned())
    }
}
