use crate::core::ordering::sort_prices_ascending;
use crate::domain::model::{
    BucketCounts, GuitarListing, PriceAverage, PriceBucket, PriceExtremes, PriceOverview,
};

pub fn eligible_prices(listings: &[GuitarListing]) -> Vec<f64> {
    listings
        .iter()
        .filter(|listing| listing.is_priced())
        .map(|listing| listing.price)
        .collect()
}

/// Cheapest and most expensive priced listing; the first one wins a tie.
pub fn price_extremes(listings: &[GuitarListing]) -> Option<PriceExtremes<'_>> {
    let mut priced = listings.iter().filter(|listing| listing.is_priced());
    let first = priced.next()?;

    let mut extremes = PriceExtremes {
        cheapest: first,
        most_expensive: first,
    };
    for listing in priced {
        if listing.price < extremes.cheapest.price {
            extremes.cheapest = listing;
        }
        if listing.price > extremes.most_expensive.price {
            extremes.most_expensive = listing;
        }
    }

    Some(extremes)
}

pub fn average_price(listings: &[GuitarListing]) -> Option<PriceAverage> {
    let (count, sum) = listings
        .iter()
        .filter(|listing| listing.is_priced())
        .fold((0usize, 0.0f64), |(count, sum), listing| {
            (count + 1, sum + listing.price)
        });

    if count == 0 {
        return None;
    }

    Some(PriceAverage {
        count,
        sum,
        mean: sum / count as f64,
    })
}

pub fn bucket_counts(listings: &[GuitarListing]) -> BucketCounts {
    let mut buckets = BucketCounts::default();
    for listing in listings.iter().filter(|listing| listing.is_priced()) {
        buckets.counts[PriceBucket::for_price(listing.price).index()] += 1;
    }
    buckets
}

/// Overview stats taken from the sorted view of eligible prices.
pub fn price_overview(listings: &[GuitarListing]) -> Option<PriceOverview> {
    let mut prices = eligible_prices(listings);
    if prices.is_empty() {
        return None;
    }

    sort_prices_ascending(&mut prices);

    let n = prices.len();
    let sum: f64 = prices.iter().sum();
    let median = if n % 2 == 0 {
        (prices[n / 2 - 1] + prices[n / 2]) / 2.0
    } else {
        prices[n / 2]
    };

    Some(PriceOverview {
        priced_count: n,
        lowest: prices[0],
        highest: prices[n - 1],
        average: sum / n as f64,
        median,
        sorted_prices: prices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(prices: &[f64]) -> Vec<GuitarListing> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| GuitarListing::new(format!("Guitar {}", i), *price))
            .collect()
    }

    #[test]
    fn test_average_price() {
        let average = average_price(&priced(&[900.0, 1100.0])).unwrap();
        assert_eq!(average.count, 2);
        assert_eq!(average.sum, 2000.0);
        assert_eq!(average.mean, 1000.0);
    }

    #[test]
    fn test_average_price_no_data() {
        assert!(average_price(&[]).is_none());
        assert!(average_price(&priced(&[0.0, 0.0])).is_none());
    }

    #[test]
    fn test_average_ignores_sentinel_prices() {
        let average = average_price(&priced(&[0.0, 1500.0])).unwrap();
        assert_eq!(average.count, 1);
        assert_eq!(average.mean, 1500.0);
    }

    #[test]
    fn test_bucket_counts_one_per_bucket() {
        let buckets = bucket_counts(&priced(&[500.0, 1500.0, 2500.0, 3500.0, 4500.0]));
        assert_eq!(buckets.counts, [1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_bucket_counts_boundaries_and_exclusions() {
        let buckets = bucket_counts(&priced(&[0.0, 999.99, 1000.0, 4000.0, 12000.0, -5.0]));
        assert_eq!(buckets.get(PriceBucket::Under1000), 1);
        assert_eq!(buckets.get(PriceBucket::From1000To2000), 1);
        assert_eq!(buckets.get(PriceBucket::Over4000), 2);
        assert_eq!(buckets.total(), 4);
    }

    #[test]
    fn test_extremes_exclude_sentinel() {
        let listings = priced(&[0.0, 1200.0]);
        let extremes = price_extremes(&listings).unwrap();
        assert_eq!(extremes.cheapest.price, 1200.0);
        assert_eq!(extremes.most_expensive.price, 1200.0);
        assert_eq!(extremes.cheapest.title, "Guitar 1");
        assert_eq!(extremes.spread(), 0.0);
    }

    #[test]
    fn test_extremes_first_encountered_wins_ties() {
        let listings = priced(&[2000.0, 800.0, 2000.0, 800.0]);
        let extremes = price_extremes(&listings).unwrap();
        assert_eq!(extremes.cheapest.title, "Guitar 1");
        assert_eq!(extremes.most_expensive.title, "Guitar 0");
        assert_eq!(extremes.spread(), 1200.0);
    }

    #[test]
    fn test_extremes_no_data() {
        assert!(price_extremes(&[]).is_none());
        assert!(price_extremes(&priced(&[0.0])).is_none());
    }

    #[test]
    fn test_price_overview() {
        let overview = price_overview(&priced(&[2500.0, 0.0, 500.0, 1200.0, 800.0])).unwrap();
        assert_eq!(overview.priced_count, 4);
        assert_eq!(overview.lowest, 500.0);
        assert_eq!(overview.highest, 2500.0);
        assert_eq!(overview.average, 1250.0);
        assert_eq!(overview.median, 1000.0);
        assert_eq!(overview.sorted_prices, vec![500.0, 800.0, 1200.0, 2500.0]);
    }

    #[test]
    fn test_price_overview_no_data() {
        assert!(price_overview(&priced(&[0.0])).is_none());
    }
}
