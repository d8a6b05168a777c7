/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod report_format;
mod report_outcome;
mod report_request;

pub use report_format::ReportFormat;
pub use report_outcome::ReportOutcome;
pub use report_request::ReportRequest;
