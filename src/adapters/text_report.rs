use crate::domain::model::{AnalysisReport, ProbeDirection, TrendDirection};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 41;
const TITLE_PREVIEW_CHARS: usize = 50;

fn clip_title(title: &str) -> String {
    title.chars().take(TITLE_PREVIEW_CHARS).collect()
}

/// Plain-text rendering of a report, section by section.
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.0)
    }
}

pub fn render_text(report: &AnalysisReport) -> String {
    TextReport(report).to_string()
}

fn write_report<W: Write>(out: &mut W, report: &AnalysisReport) -> fmt::Result {
    writeln!(out, "===GUITAR PRICE ANALYSIS===")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Source: {}", report.source)?;
    writeln!(out, "Total guitars found: {}", report.total_records)?;

    match &report.overview {
        Some(overview) => {
            writeln!(out, "Average price: ${:.2}", overview.average)?;
            writeln!(out, "Median price: ${:.2}", overview.median)?;
            writeln!(out, "Lowest price: ${:.2}", overview.lowest)?;
            writeln!(out, "Highest price: ${:.2}", overview.highest)?;
        }
        None => writeln!(out, "No valid prices found!")?,
    }

    writeln!(out)?;
    writeln!(out, "FINDING MIN AND MAX PRICES")?;
    match &report.extremes {
        Some(extremes) => {
            writeln!(out, " CHEAPEST: ${:.2}", extremes.cheapest.price)?;
            writeln!(out, " {}...", clip_title(&extremes.cheapest.title))?;
            writeln!(out, " MOST EXPENSIVE: ${:.2}", extremes.most_expensive.price)?;
            writeln!(out, " {}...", clip_title(&extremes.most_expensive.title))?;
            writeln!(out, " PRICE DIFFERENCE: ${:.2}", extremes.spread)?;
        }
        None => writeln!(out, " No guitars to analyze!")?,
    }

    writeln!(out)?;
    writeln!(out, "CALCULATING AVERAGE PRICE")?;
    match &report.average {
        Some(average) => {
            writeln!(out, " Total guitars with prices: {}", average.count)?;
            writeln!(out, " Sum of all prices: ${:.2}", average.sum)?;
            writeln!(out, " Average price: ${:.2}", average.mean)?;
        }
        None => writeln!(out, " No valid prices found!")?,
    }

    writeln!(out)?;
    writeln!(out, "COUNTING GUITARS BY PRICE RANGES")?;
    for bucket in &report.buckets {
        writeln!(out, "{}: {} guitars", bucket.label, bucket.count)?;
    }

    if !report.ranked.is_empty() {
        writeln!(out)?;
        writeln!(out, "CHEAPEST {} LISTINGS", report.ranked.len())?;
        for (rank, listing) in report.ranked.iter().enumerate() {
            writeln!(out, " {:>2}. ${:.2} - {}", rank + 1, listing.price, listing.title)?;
        }
    }

    for search in &report.title_searches {
        writeln!(out)?;
        writeln!(out, "SEARCHING FOR: \"{}\"", search.needle)?;
        for listing in &search.matches {
            writeln!(out, "${:.2} - {}", listing.price, listing.title)?;
        }
        if search.matches.is_empty() {
            writeln!(out, "No guitars found with \"{}\"", search.needle)?;
        } else {
            writeln!(out, "Found {} guitars!", search.matches.len())?;
        }
    }

    for lookup in &report.price_lookups {
        writeln!(out)?;
        writeln!(out, "Using Binary Search to find ${:.2}...", lookup.target)?;
        for probe in &lookup.probes {
            let note = match probe.direction {
                ProbeDirection::Found => "match",
                ProbeDirection::Higher => "target is higher, searching right half",
                ProbeDirection::Lower => "target is lower, searching left half",
            };
            writeln!(
                out,
                " Checking position {} (value: ${:.2}) - {}",
                probe.position, probe.value, note
            )?;
        }
        match lookup.index {
            Some(index) => writeln!(
                out,
                " Found at position {} after {} comparisons",
                index, lookup.comparisons
            )?,
            None => writeln!(out, " Not found after {} comparisons", lookup.comparisons)?,
        }
    }

    if !report.search_terms.is_empty() {
        writeln!(out)?;
        writeln!(out, "CHEAPEST IN EACH SEARCH TERM")?;
        for summary in &report.search_terms {
            let term = if summary.search_term.is_empty() {
                "(none)"
            } else {
                summary.search_term.as_str()
            };
            match &summary.cheapest {
                Some(cheapest) => writeln!(
                    out,
                    "  {:30}: {:3} guitars, cheapest ${:.2}",
                    term, summary.listings, cheapest.price
                )?,
                None => writeln!(out, "  {:30}: {:3} guitars, no prices", term, summary.listings)?,
            }
        }
    }

    if !report.trends.is_empty() {
        writeln!(out)?;
        writeln!(out, "MARKET TRENDS")?;
        for trend in &report.trends {
            let direction = match trend.direction {
                TrendDirection::Rising => "Rising",
                TrendDirection::Falling => "Falling",
                TrendDirection::Steady => "Steady",
            };
            writeln!(
                out,
                "  {:30}: {} ({:+.2} over {} days)",
                trend.search_term,
                direction,
                trend.change(),
                trend.daily.len()
            )?;
        }
    }

    Ok(())
}
