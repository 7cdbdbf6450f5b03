//! In-place price ordering.
//!
//! Two contracts share one primitive: a plain price slice (fed to binary
//! search) and listings ranked by price. Neither sort is stable.

use crate::domain::model::GuitarListing;

/// Sorts `items` ascending by the price returned from `key`.
///
/// Uses the IEEE total order, so negative and non-finite values are accepted
/// and land in a deterministic position.
pub fn sort_by_price_key<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_unstable_by(|a, b| key(a).total_cmp(&key(b)));
}

pub fn sort_prices_ascending(prices: &mut [f64]) {
    sort_by_price_key(prices, |price| *price);
}

/// Reorders listings by price; no listing field is touched.
pub fn sort_listings_by_price(listings: &mut [GuitarListing]) {
    sort_by_price_key(listings, |listing| listing.price);
}

/// Checks order under the same total order the sorts use, so NaN sits last.
pub fn is_sorted_by_price(prices: &[f64]) -> bool {
    prices.windows(2).all(|pair| pair[0].total_cmp(&pair[1]).is_le())
}
