use crate::domain::model::{GuitarListing, PriceSearch, ProbeDirection, SearchProbe};

/// Binary search for an exact price in a non-decreasing slice.
///
/// The slice must already be sorted; an unsorted slice yields an arbitrary
/// answer. With duplicate prices any matching index may be returned.
/// `comparisons` counts loop iterations, one per probe.
pub fn binary_search_price(sorted: &[f64], target: f64) -> PriceSearch {
    let mut low = 0usize;
    // Half-open interval [low, high)
    let mut high = sorted.len();
    let mut probes = Vec::new();

    while low < high {
        let mid = low + (high - low) / 2;
        let value = sorted[mid];

        let direction = if value == target {
            ProbeDirection::Found
        } else if value < target {
            ProbeDirection::Higher
        } else {
            ProbeDirection::Lower
        };
        tracing::trace!(position = mid, value, ?direction, "binary search probe");
        probes.push(SearchProbe {
            position: mid,
            value,
            direction,
        });

        match direction {
            ProbeDirection::Found => {
                return PriceSearch {
                    target,
                    index: Some(mid),
                    comparisons: probes.len(),
                    probes,
                };
            }
            ProbeDirection::Higher => low = mid + 1,
            ProbeDirection::Lower => high = mid,
        }
    }

    PriceSearch {
        target,
        index: None,
        comparisons: probes.len(),
        probes,
    }
}

/// Case-insensitive title containment, in input order.
///
/// An empty needle matches every listing.
pub fn search_titles<'a>(listings: &'a [GuitarListing], needle: &str) -> Vec<&'a GuitarListing> {
    let needle = needle.to_lowercase();
    listings
        .iter()
        .filter(|listing| listing.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTED: [f64; 5] = [500.0, 800.0, 1200.0, 2500.0, 4000.0];

    #[test]
    fn test_binary_search_finds_target() {
        let result = binary_search_price(&SORTED, 1200.0);
        assert_eq!(result.index, Some(2));
        assert_eq!(result.comparisons, 1);
        assert_eq!(result.probes[0].direction, ProbeDirection::Found);
    }

    #[test]
    fn test_binary_search_not_found() {
        let result = binary_search_price(&SORTED, 999.0);
        assert_eq!(result.index, None);
        assert!(!result.found());
        assert_eq!(result.comparisons, result.probes.len());
        assert!(result.comparisons <= 3);
    }

    #[test]
    fn test_binary_search_trace_directions() {
        let result = binary_search_price(&SORTED, 4000.0);
        let directions: Vec<ProbeDirection> = result.probes.iter().map(|p| p.direction).collect();
        assert_eq!(
            directions,
            vec![ProbeDirection::Higher, ProbeDirection::Found]
        );
        assert_eq!(result.index, Some(4));

        let result = binary_search_price(&SORTED, 500.0);
        assert_eq!(result.index, Some(0));
        assert_eq!(result.probes[0].direction, ProbeDirection::Lower);
    }

    #[test]
    fn test_binary_search_empty_slice() {
        let result = binary_search_price(&[], 100.0);
        assert_eq!(result.index, None);
        assert_eq!(result.comparisons, 0);
    }

    #[test]
    fn test_binary_search_duplicates_any_match() {
        let prices = [100.0, 200.0, 200.0, 200.0, 300.0];
        let result = binary_search_price(&prices, 200.0);
        let index = result.index.unwrap();
        assert_eq!(prices[index], 200.0);
    }

    fn titled(titles: &[&str]) -> Vec<GuitarListing> {
        titles.iter().map(|t| GuitarListing::new(*t, 1000.0)).collect()
    }

    #[test]
    fn test_search_titles_case_insensitive() {
        let listings = titled(&["Fender Stratocaster", "gibson LES PAUL"]);

        let matches = search_titles(&listings, "strat");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Fender Stratocaster");

        let matches = search_titles(&listings, "Les Paul");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "gibson LES PAUL");
    }

    #[test]
    fn test_search_titles_empty_needle_matches_all_in_order() {
        let listings = titled(&["Fender Stratocaster", "gibson LES PAUL"]);
        let matches = search_titles(&listings, "");
        let titles: Vec<&str> = matches.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Fender Stratocaster", "gibson LES PAUL"]);
    }

    #[test]
    fn test_search_titles_no_match() {
        let listings = titled(&["Fender Stratocaster", "gibson LES PAUL"]);
        assert!(search_titles(&listings, "ZZZ").is_empty());
        assert!(search_titles(&[], "strat").is_empty());
    }
}
