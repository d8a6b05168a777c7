/// Use cases module containing application business logic orchestration
mod generate_license_report;
mod report_pipeline;

pub use generate_license_report::GenerateLicenseReportUseCase;
pub use report_pipeline::ReportPipeline;
