pub mod license;
pub mod package_record;
pub mod report_row;

pub use license::License;
pub use package_record::{PackageId, PackageMetadata, PackageRecord, PackageVersion};
pub use report_row::{ReportRow, REPORT_COLUMNS};
