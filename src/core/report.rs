use crate::core::aggregation::{average_price, bucket_counts, price_extremes, price_overview};
use crate::core::lookup::{binary_search_price, search_titles};
use crate::core::market::{price_trends, summarize_by_search_term};
use crate::core::ordering::sort_listings_by_price;
use crate::domain::model::{
    AnalysisPlan, AnalysisReport, BucketReport, ExtremesReport, GuitarListing, LoadSummary,
    TitleSearchReport,
};

/// Runs every analysis over one record set and collects the results.
///
/// Statistics read the listings in ingestion order; only the ranked section
/// reorders them, so `listings` is left sorted by price on return.
pub fn build_report(
    source: &str,
    listings: &mut [GuitarListing],
    plan: &AnalysisPlan,
    load: LoadSummary,
) -> AnalysisReport {
    let overview = price_overview(listings);
    let extremes: Option<ExtremesReport> = price_extremes(listings).map(Into::into);
    let average = average_price(listings);

    let buckets = bucket_counts(listings)
        .iter()
        .map(|(bucket, count)| {
            let (lower, upper) = bucket.bounds();
            BucketReport {
                bucket,
                label: bucket.label().to_string(),
                lower,
                upper,
                count,
            }
        })
        .collect();

    let title_searches = plan
        .title_searches
        .iter()
        .map(|needle| TitleSearchReport {
            needle: needle.clone(),
            matches: search_titles(listings, needle).into_iter().cloned().collect(),
        })
        .collect();

    let sorted_prices = overview
        .as_ref()
        .map(|o| o.sorted_prices.as_slice())
        .unwrap_or_default();
    let price_lookups = plan
        .price_targets
        .iter()
        .map(|target| binary_search_price(sorted_prices, *target))
        .collect();

    let (search_terms, trends) = if plan.market_breakdown {
        (summarize_by_search_term(listings), price_trends(listings))
    } else {
        (Vec::new(), Vec::new())
    };

    sort_listings_by_price(listings);
    let ranked = listings
        .iter()
        .filter(|listing| listing.is_priced())
        .take(plan.top_n)
        .cloned()
        .collect();

    AnalysisReport {
        source: source.to_string(),
        generated_at: chrono::Utc::now(),
        load,
        total_records: listings.len(),
        overview,
        extremes,
        average,
        buckets,
        ranked,
        title_searches,
        price_lookups,
        search_terms,
        trends,
    }
}
