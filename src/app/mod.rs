// Application layer: wires a config into a ready-to-run engine.

use crate::adapters::{
    ConsoleReportSink, CsvListingSource, CsvOptions, FileReportSink, LocalStorage, ReportFormat,
};
use crate::core::analyzer::AnalysisEngine;
use crate::core::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};

pub type CsvAnalysisEngine = AnalysisEngine<CsvListingSource<LocalStorage>>;

pub fn csv_options<C: ConfigProvider>(config: &C) -> Result<CsvOptions> {
    let delimiter = config.delimiter();
    let delimiter = u8::try_from(delimiter).map_err(|_| AnalyzerError::InvalidConfigValueError {
        field: "delimiter".to_string(),
        value: delimiter.escape_default().to_string(),
        reason: "Delimiter must be a single ASCII character".to_string(),
    })?;

    Ok(CsvOptions {
        delimiter,
        has_headers: config.has_headers(),
        infer_missing_year: config.infer_missing_year(),
    })
}

/// Engine reading the configured CSV from the local filesystem. The console
/// sink comes first when enabled, followed by a file sink if any output
/// format is configured.
pub fn build_engine<C: ConfigProvider>(
    config: &C,
    console: bool,
    monitor_enabled: bool,
) -> Result<CsvAnalysisEngine> {
    let source = CsvListingSource::new(
        LocalStorage::new(""),
        config.input_path(),
        csv_options(config)?,
    );

    let mut engine =
        AnalysisEngine::new_with_monitoring(source, config.analysis_plan(), monitor_enabled);

    if console {
        engine.add_sink(Box::new(ConsoleReportSink));
    }

    let formats = ReportFormat::parse_list(config.output_formats())?;
    if !formats.is_empty() {
        engine.add_sink(Box::new(FileReportSink::new(
            LocalStorage::new(config.output_path()),
            config.output_path(),
            formats,
        )));
    }

    Ok(engine)
}
