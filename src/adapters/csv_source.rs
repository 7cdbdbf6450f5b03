use crate::core::{GuitarListing, ListingSource, LoadSummary, LoadedListings, Storage};
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// Column order of a listing row.
pub const LISTING_COLUMNS: [&str; 7] = [
    "title",
    "price",
    "url",
    "condition",
    "year",
    "search_term",
    "scraped_at",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub infer_missing_year: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            infer_missing_year: false,
        }
    }
}

pub struct CsvListingSource<S: Storage> {
    storage: S,
    path: String,
    options: CsvOptions,
}

impl<S: Storage> CsvListingSource<S> {
    pub fn new(storage: S, path: impl Into<String>, options: CsvOptions) -> Self {
        Self {
            storage,
            path: path.into(),
            options,
        }
    }
}

#[async_trait]
impl<S: Storage> ListingSource for CsvListingSource<S> {
    fn describe(&self) -> String {
        self.path.clone()
    }

    async fn load(&self) -> Result<LoadedListings> {
        tracing::debug!("Reading listings file: {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        tracing::debug!("Read {} bytes", data.len());
        let loaded = parse_listings(&data, &self.options)?;

        let summary = &loaded.summary;
        if summary.rows_read > 0 && summary.skipped_malformed == summary.rows_read {
            return Err(AnalyzerError::InputError {
                path: self.path.clone(),
                message: format!("none of the {} rows could be decoded", summary.rows_read),
            });
        }
        Ok(loaded)
    }
}

/// Parses delimited listing rows into listings.
///
/// Rows with an empty title are dropped; rows the reader cannot decode are
/// skipped and counted. Missing trailing columns become empty text.
pub fn parse_listings(data: &[u8], options: &CsvOptions) -> Result<LoadedListings> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(data);

    let mut listings = Vec::new();
    let mut summary = LoadSummary::default();

    for (row, result) in reader.records().enumerate() {
        summary.rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping malformed row {}: {}", row + 1, e);
                summary.skipped_malformed += 1;
                continue;
            }
        };

        let field = |i: usize| {
            record
                .get(i)
                .map(strip_wrapping_quotes)
                .unwrap_or_default()
                .to_string()
        };

        let title = field(0);
        if title.is_empty() {
            summary.discarded_untitled += 1;
            continue;
        }

        let mut year = field(4);
        if year.is_empty() && options.infer_missing_year {
            if let Some(found) = year_from_title(&title) {
                year = found.to_string();
            }
        }

        listings.push(GuitarListing {
            price: parse_price(record.get(1).unwrap_or_default()),
            url: field(2),
            condition: field(3),
            year,
            search_term: field(5),
            scraped_at: field(6),
            title,
        });
    }

    summary.loaded = listings.len();
    Ok(LoadedListings { listings, summary })
}

pub fn strip_wrapping_quotes(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

/// Price text to a number, `0.0` when nothing usable is found.
///
/// Plain numbers parse directly; otherwise currency symbols and thousands
/// separators are dropped first (`"$1,299.99"`).
pub fn parse_price(raw: &str) -> f64 {
    let raw = strip_wrapping_quotes(raw.trim());
    if let Ok(price) = raw.parse::<f64>() {
        if price.is_finite() {
            return price;
        }
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => 0.0,
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(19[5-9]\d|20[0-3]\d)\b").expect("year pattern compiles"))
}

/// First plausible model year (1950-2039) mentioned in a title.
pub fn year_from_title(title: &str) -> Option<&str> {
    year_pattern()
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
