use crate::core::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub analysis: AnalysisSection,
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
    pub has_headers: Option<bool>,
    pub infer_missing_year: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: Option<String>,
    #[serde(default)]
    pub output_formats: Vec<String>,
    pub top_n: Option<usize>,
    #[serde(default)]
    pub title_searches: Vec<String>,
    #[serde(default)]
    pub price_targets: Vec<f64>,
    pub market_breakdown: Option<bool>,
    pub console: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

const DEFAULT_OUTPUT_PATH: &str = "./output";
const DEFAULT_TOP_N: usize = 5;

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GUITAR_DATA})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyzerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let input_path = validation::validate_required_field("input.path", &self.input.path)?;
        validation::validate_path("input.path", input_path)?;
        validation::validate_file_extension(
            "input.path",
            input_path,
            &validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;

        if let Some(raw) = &self.input.delimiter {
            let delimiter = crate::config::parse_delimiter(raw).map_err(|reason| {
                AnalyzerError::InvalidConfigValueError {
                    field: "input.delimiter".to_string(),
                    value: raw.clone(),
                    reason,
                }
            })?;
            validation::validate_delimiter("input.delimiter", delimiter)?;
        }

        validation::validate_path("report.output_path", self.output_path())?;
        validation::validate_output_formats("report.output_formats", &self.report.output_formats)?;
        validation::validate_range("report.top_n", self.top_n(), 1, 1000)?;
        validation::validate_price_targets("report.price_targets", &self.report.price_targets)?;

        validation::validate_log_level("logging.level", self.log_level())?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if format != "compact" && format != "json" {
                return Err(AnalyzerError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn console_enabled(&self) -> bool {
        self.report.console.unwrap_or(true)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or_default()
    }

    /// Falls back to a comma when the configured value is unusable;
    /// `validate_config` reports that case.
    fn delimiter(&self) -> char {
        self.input
            .delimiter
            .as_deref()
            .and_then(|raw| crate::config::parse_delimiter(raw).ok())
            .unwrap_or(',')
    }

    fn has_headers(&self) -> bool {
        self.input.has_headers.unwrap_or(true)
    }

    fn infer_missing_year(&self) -> bool {
        self.input.infer_missing_year.unwrap_or(false)
    }

    fn output_path(&self) -> &str {
        self.report
            .output_path
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_formats(&self) -> &[String] {
        &self.report.output_formats
    }

    fn top_n(&self) -> usize {
        self.report.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    fn title_searches(&self) -> &[String] {
        &self.report.title_searches
    }

    fn price_targets(&self) -> &[f64] {
        &self.report.price_targets
    }

    fn market_breakdown(&self) -> bool {
        self.report.market_breakdown.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
