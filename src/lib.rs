pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{CsvListingSource, CsvOptions, FileReportSink, LocalStorage, ReportFormat};
pub use crate::app::build_engine;
pub use crate::core::analyzer::AnalysisEngine;
pub use crate::domain::model::{AnalysisPlan, AnalysisReport, GuitarListing};
pub use crate::utils::error::{AnalyzerError, Result};
