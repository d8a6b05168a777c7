use package_licenses::prelude::*;
use std::path::Path;

/// Mock PackageSource for testing
pub struct MockPackageSource {
    pub packages: Vec<PackageRecord>,
    pub should_fail: bool,
}

impl MockPackageSource {
    pub fn new(packages: Vec<PackageRecord>) -> Self {
        Self {
            packages,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            packages: Vec::new(),
            should_fail: true,
        }
    }
}

impl PackageSource for MockPackageSource {
    fn packages(
        &self,
        _root: &Path,
        _reporter: &dyn ProgressReporter,
    ) -> Result<Vec<PackageRecord>> {
        if self.should_fail {
            anyhow::bail!("Mock package source failure");
        }
        Ok(self.packages.clone())
    }
}
