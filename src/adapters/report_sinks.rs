use crate::adapters::csv_source::LISTING_COLUMNS;
use crate::adapters::text_report::render_text;
use crate::core::{AnalysisReport, ReportSink, Storage};
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use std::str::FromStr;

pub const TEXT_REPORT_FILE: &str = "analysis_report.txt";
pub const JSON_REPORT_FILE: &str = "analysis_report.json";
pub const RANKED_CSV_FILE: &str = "ranked_listings.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub const NAMES: [&'static str; 3] = ["text", "json", "csv"];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Text => TEXT_REPORT_FILE,
            ReportFormat::Json => JSON_REPORT_FILE,
            ReportFormat::Csv => RANKED_CSV_FILE,
        }
    }

    pub fn parse_list(formats: &[String]) -> Result<Vec<ReportFormat>> {
        formats.iter().map(|f| f.parse()).collect()
    }
}

impl FromStr for ReportFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(AnalyzerError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", ReportFormat::NAMES.join(", ")),
            }),
        }
    }
}

/// Prints the text rendering to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReportSink;

#[async_trait]
impl ReportSink for ConsoleReportSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn publish(&self, report: &AnalysisReport) -> Result<String> {
        println!("{}", render_text(report));
        Ok("stdout".to_string())
    }
}

/// Writes the requested formats through a `Storage` backend.
pub struct FileReportSink<S: Storage> {
    storage: S,
    output_path: String,
    formats: Vec<ReportFormat>,
}

impl<S: Storage> FileReportSink<S> {
    pub fn new(storage: S, output_path: impl Into<String>, formats: Vec<ReportFormat>) -> Self {
        Self {
            storage,
            output_path: output_path.into(),
            formats,
        }
    }

    fn encode(&self, format: ReportFormat, report: &AnalysisReport) -> Result<Vec<u8>> {
        match format {
            ReportFormat::Text => Ok(render_text(report).into_bytes()),
            ReportFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
            ReportFormat::Csv => {
                // Header written up front so an empty ranking still reloads.
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(Vec::new());
                writer.write_record(LISTING_COLUMNS)?;
                for listing in &report.ranked {
                    writer.serialize(listing)?;
                }
                let data = writer.into_inner().map_err(|e| e.into_error())?;
                Ok(data)
            }
        }
    }
}

#[async_trait]
impl<S: Storage> ReportSink for FileReportSink<S> {
    fn name(&self) -> &str {
        "file"
    }

    async fn publish(&self, report: &AnalysisReport) -> Result<String> {
        let mut written = Vec::with_capacity(self.formats.len());

        for format in &self.formats {
            let data = self.encode(*format, report)?;
            tracing::debug!("Writing {} ({} bytes)", format.file_name(), data.len());
            self.storage
                .write_file(format.file_name(), &data)
                .await
                .map_err(|e| AnalyzerError::ReportError {
                    sink: self.name().to_string(),
                    message: format!("{}: {}", format.file_name(), e),
                })?;
            written.push(format!("{}/{}", self.output_path, format.file_name()));
        }

        Ok(written.join(", "))
    }
}
