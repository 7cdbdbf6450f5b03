// Adapters layer: concrete ingestion, storage and reporting implementations.

pub mod csv_source;
pub mod report_sinks;
pub mod storage;
pub mod text_report;

pub use csv_source::{CsvListingSource, CsvOptions};
pub use report_sinks::{ConsoleReportSink, FileReportSink, ReportFormat};
pub use storage::LocalStorage;
