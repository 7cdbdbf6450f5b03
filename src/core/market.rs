//! Per search term breakdown: best deal per model and price movement across
//! scrape dates.

use crate::core::aggregation::{average_price, price_extremes};
use crate::domain::model::{DailyAverage, GuitarListing, PriceTrend, SearchTermSummary, TrendDirection};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

fn group_by_search_term(listings: &[GuitarListing]) -> BTreeMap<&str, Vec<GuitarListing>> {
    let mut groups: BTreeMap<&str, Vec<GuitarListing>> = BTreeMap::new();
    for listing in listings {
        groups
            .entry(listing.search_term.as_str())
            .or_default()
            .push(listing.clone());
    }
    groups
}

pub fn summarize_by_search_term(listings: &[GuitarListing]) -> Vec<SearchTermSummary> {
    group_by_search_term(listings)
        .into_iter()
        .map(|(term, group)| {
            let average = average_price(&group);
            SearchTermSummary {
                search_term: term.to_string(),
                listings: group.len(),
                priced: average.map(|a| a.count).unwrap_or(0),
                average_price: average.map(|a| a.mean),
                cheapest: price_extremes(&group).map(|e| e.cheapest.clone()),
            }
        })
        .collect()
}

/// Date part of a scrape timestamp, if it is in a recognised format.
pub fn parse_scrape_date(scraped_at: &str) -> Option<NaiveDate> {
    let raw = scraped_at.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Price direction per search term between its first and last scrape date.
///
/// Terms seen on a single date have no trend and are left out.
pub fn price_trends(listings: &[GuitarListing]) -> Vec<PriceTrend> {
    let mut by_term: BTreeMap<&str, BTreeMap<NaiveDate, (usize, f64)>> = BTreeMap::new();

    for listing in listings.iter().filter(|listing| listing.is_priced()) {
        let Some(date) = parse_scrape_date(&listing.scraped_at) else {
            continue;
        };
        let day = by_term
            .entry(listing.search_term.as_str())
            .or_default()
            .entry(date)
            .or_insert((0, 0.0));
        day.0 += 1;
        day.1 += listing.price;
    }

    by_term
        .into_iter()
        .filter(|(_, days)| days.len() > 1)
        .map(|(term, days)| {
            let daily: Vec<DailyAverage> = days
                .into_iter()
                .map(|(date, (count, sum))| DailyAverage {
                    date,
                    average_price: sum / count as f64,
                    listings: count,
                })
                .collect();

            let first = daily[0].average_price;
            let last = daily[daily.len() - 1].average_price;
            let direction = if last > first {
                TrendDirection::Rising
            } else if last < first {
                TrendDirection::Falling
            } else {
                TrendDirection::Steady
            };

            PriceTrend {
                search_term: term.to_string(),
                direction,
                daily,
            }
        })
        .collect()
}
