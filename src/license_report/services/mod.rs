mod license_file_materializer;
mod license_resolution_chain;
mod report_row_builder;

pub use license_file_materializer::LicenseFileMaterializer;
pub use license_resolution_chain::LicenseResolutionChain;
pub use report_row_builder::ReportRowBuilder;
