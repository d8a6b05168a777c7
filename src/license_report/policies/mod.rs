mod license_source_priority;
mod resolution_policy;

pub use license_source_priority::LicenseSourcePriority;
pub use resolution_policy::{FailurePolicy, ResolutionPolicy};
