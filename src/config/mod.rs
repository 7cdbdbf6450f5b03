pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// Accepts a literal character or the names `tab`, `\t`, `comma`, `semicolon`, `pipe`.
pub fn parse_delimiter(raw: &str) -> std::result::Result<char, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok('\t'),
        "comma" => Ok(','),
        "semicolon" => Ok(';'),
        "pipe" => Ok('|'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("expected a single character, got '{}'", raw)),
            }
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "guitar-analyzer")]
#[command(about = "Price statistics and search over scraped guitar listings")]
pub struct CliConfig {
    /// Listings file (title, price, url, condition, year, search_term, scraped_at)
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: char,

    #[arg(long, help = "Input has no header row")]
    pub no_headers: bool,

    #[arg(long, help = "Fill empty year fields from the title")]
    pub infer_year: bool,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Files to write in addition to the console report (text, json, csv)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Case-insensitive title searches
    #[arg(long = "search", value_delimiter = ',')]
    pub searches: Vec<String>,

    /// Exact prices to look up with binary search
    #[arg(long = "find-price", value_delimiter = ',')]
    pub find_prices: Vec<f64>,

    #[arg(long, help = "Skip the per search term breakdown and trends")]
    pub no_market: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log timing and memory per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn has_headers(&self) -> bool {
        !self.no_headers
    }

    fn infer_missing_year(&self) -> bool {
        self.infer_year
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn top_n(&self) -> usize {
        self.top
    }

    fn title_searches(&self) -> &[String] {
        &self.searches
    }

    fn price_targets(&self) -> &[f64] {
        &self.find_prices
    }

    fn market_breakdown(&self) -> bool {
        !self.no_market
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension(
            "input",
            &self.input,
            &validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_output_formats("formats", &self.formats)?;
        if !self.formats.is_empty() {
            validation::validate_path("output_path", &self.output_path)?;
        }
        validation::validate_range("top", self.top, 1, 1000)?;
        validation::validate_price_targets("find-price", &self.find_prices)?;
        Ok(())
    }
}
