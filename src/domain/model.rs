use serde::{Deserialize, Serialize};

/// One guitar listing as scraped from a marketplace search.
///
/// `price == 0.0` is the ingestion sentinel for "no valid price"; such listings
/// are counted as records but never enter any price statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuitarListing {
    pub title: String,
    pub price: f64,
    pub url: String,
    pub condition: String,
    pub year: String,
    pub search_term: String,
    pub scraped_at: String,
}

impl GuitarListing {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            url: String::new(),
            condition: String::new(),
            year: String::new(),
            search_term: String::new(),
            scraped_at: String::new(),
        }
    }

    pub fn with_search_term(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = search_term.into();
        self
    }

    pub fn with_scraped_at(mut self, scraped_at: impl Into<String>) -> Self {
        self.scraped_at = scraped_at.into();
        self
    }

    /// Eligible for statistics.
    pub fn is_priced(&self) -> bool {
        self.price > 0.0
    }
}

/// Cheapest and most expensive eligible listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceExtremes<'a> {
    pub cheapest: &'a GuitarListing,
    pub most_expensive: &'a GuitarListing,
}

impl PriceExtremes<'_> {
    pub fn spread(&self) -> f64 {
        self.most_expensive.price - self.cheapest.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceAverage {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
}

/// Fixed half-open price ranges used for the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    Under1000,
    From1000To2000,
    From2000To3000,
    From3000To4000,
    Over4000,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 5] = [
        PriceBucket::Under1000,
        PriceBucket::From1000To2000,
        PriceBucket::From2000To3000,
        PriceBucket::From3000To4000,
        PriceBucket::Over4000,
    ];

    /// Boundary values belong to the higher bucket.
    pub fn for_price(price: f64) -> Self {
        if price < 1000.0 {
            PriceBucket::Under1000
        } else if price < 2000.0 {
            PriceBucket::From1000To2000
        } else if price < 3000.0 {
            PriceBucket::From2000To3000
        } else if price < 4000.0 {
            PriceBucket::From3000To4000
        } else {
            PriceBucket::Over4000
        }
    }

    pub fn index(self) -> usize {
        match self {
            PriceBucket::Under1000 => 0,
            PriceBucket::From1000To2000 => 1,
            PriceBucket::From2000To3000 => 2,
            PriceBucket::From3000To4000 => 3,
            PriceBucket::Over4000 => 4,
        }
    }

    /// `(lower inclusive, upper exclusive)`; the last bucket is unbounded.
    pub fn bounds(self) -> (f64, Option<f64>) {
        match self {
            PriceBucket::Under1000 => (0.0, Some(1000.0)),
            PriceBucket::From1000To2000 => (1000.0, Some(2000.0)),
            PriceBucket::From2000To3000 => (2000.0, Some(3000.0)),
            PriceBucket::From3000To4000 => (3000.0, Some(4000.0)),
            PriceBucket::Over4000 => (4000.0, None),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::Under1000 => "Under $1,000",
            PriceBucket::From1000To2000 => "$1,000 - $2,000",
            PriceBucket::From2000To3000 => "$2,000 - $3,000",
            PriceBucket::From3000To4000 => "$3,000 - $4,000",
            PriceBucket::Over4000 => "Over $4,000",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub counts: [usize; 5],
}

impl BucketCounts {
    pub fn get(&self, bucket: PriceBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PriceBucket, usize)> + '_ {
        PriceBucket::ALL.iter().map(move |b| (*b, self.get(*b)))
    }
}

/// Basic stats read off the sorted price view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceOverview {
    pub priced_count: usize,
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
    pub median: f64,
    #[serde(skip)]
    pub sorted_prices: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeDirection {
    Found,
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchProbe {
    pub position: usize,
    pub value: f64,
    pub direction: ProbeDirection,
}

/// Outcome of a binary search over sorted prices, with its probe trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSearch {
    pub target: f64,
    pub index: Option<usize>,
    pub comparisons: usize,
    pub probes: Vec<SearchProbe>,
}

impl PriceSearch {
    pub fn found(&self) -> bool {
        self.index.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchTermSummary {
    pub search_term: String,
    pub listings: usize,
    pub priced: usize,
    pub average_price: Option<f64>,
    pub cheapest: Option<GuitarListing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Steady,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: chrono::NaiveDate,
    pub average_price: f64,
    pub listings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTrend {
    pub search_term: String,
    pub direction: TrendDirection,
    pub daily: Vec<DailyAverage>,
}

impl PriceTrend {
    pub fn change(&self) -> f64 {
        match (self.daily.first(), self.daily.last()) {
            (Some(first), Some(last)) => last.average_price - first.average_price,
            _ => 0.0,
        }
    }
}

/// Row accounting from ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub loaded: usize,
    pub discarded_untitled: usize,
    pub skipped_malformed: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedListings {
    pub listings: Vec<GuitarListing>,
    pub summary: LoadSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremesReport {
    pub cheapest: GuitarListing,
    pub most_expensive: GuitarListing,
    pub spread: f64,
}

impl From<PriceExtremes<'_>> for ExtremesReport {
    fn from(extremes: PriceExtremes<'_>) -> Self {
        Self {
            cheapest: extremes.cheapest.clone(),
            most_expensive: extremes.most_expensive.clone(),
            spread: extremes.spread(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReport {
    pub bucket: PriceBucket,
    pub label: String,
    pub lower: f64,
    pub upper: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleSearchReport {
    pub needle: String,
    pub matches: Vec<GuitarListing>,
}

/// What the report builder runs beyond the fixed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPlan {
    pub top_n: usize,
    pub title_searches: Vec<String>,
    pub price_targets: Vec<f64>,
    pub market_breakdown: bool,
}

impl Default for AnalysisPlan {
    fn default() -> Self {
        Self {
            top_n: 5,
            title_searches: Vec::new(),
            price_targets: Vec::new(),
            market_breakdown: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub load: LoadSummary,
    pub total_records: usize,
    pub overview: Option<PriceOverview>,
    pub extremes: Option<ExtremesReport>,
    pub average: Option<PriceAverage>,
    pub buckets: Vec<BucketReport>,
    pub ranked: Vec<GuitarListing>,
    pub title_searches: Vec<TitleSearchReport>,
    pub price_lookups: Vec<PriceSearch>,
    pub search_terms: Vec<SearchTermSummary>,
    pub trends: Vec<PriceTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries_belong_to_higher_bucket() {
        assert_eq!(PriceBucket::for_price(999.99), PriceBucket::Under1000);
        assert_eq!(PriceBucket::for_price(1000.0), PriceBucket::From1000To2000);
        assert_eq!(PriceBucket::for_price(2000.0), PriceBucket::From2000To3000);
        assert_eq!(PriceBucket::for_price(3000.0), PriceBucket::From3000To4000);
        assert_eq!(PriceBucket::for_price(4000.0), PriceBucket::Over4000);
    }

    #[test]
    fn test_bucket_index_matches_all_order() {
        for (i, bucket) in PriceBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
            let (lower, _) = bucket.bounds();
            assert_eq!(PriceBucket::for_price(lower.max(0.01)), *bucket);
        }
    }

    #[test]
    fn test_sentinel_price_is_not_priced() {
        assert!(!GuitarListing::new("Gibson Les Paul R9", 0.0).is_priced());
        assert!(GuitarListing::new("Gibson Les Paul R9", 0.01).is_priced());
    }
}
