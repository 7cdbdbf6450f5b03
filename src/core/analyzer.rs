use crate::core::report::build_report;
use crate::core::{AnalysisPlan, AnalysisReport, ListingSource, ReportSink};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

/// Drives one analysis run: load listings, build the report, publish it to
/// every sink in order.
pub struct AnalysisEngine<S: ListingSource> {
    source: S,
    sinks: Vec<Box<dyn ReportSink>>,
    plan: AnalysisPlan,
    monitor: RunMonitor,
}

impl<S: ListingSource> AnalysisEngine<S> {
    pub fn new(source: S, plan: AnalysisPlan) -> Self {
        Self::new_with_monitoring(source, plan, false)
    }

    pub fn new_with_monitoring(source: S, plan: AnalysisPlan, monitor_enabled: bool) -> Self {
        Self {
            source,
            sinks: Vec::new(),
            plan,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    /// Returns the report together with the destinations each sink reported.
    pub async fn run(&self) -> Result<(AnalysisReport, Vec<String>)> {
        tracing::info!("🎸 Loading listings from {}", self.source.describe());
        let loaded = self.source.load().await?;
        tracing::info!(
            "Loaded {} listings ({} rows read, {} untitled, {} malformed)",
            loaded.summary.loaded,
            loaded.summary.rows_read,
            loaded.summary.discarded_untitled,
            loaded.summary.skipped_malformed
        );
        if loaded.listings.is_empty() {
            tracing::warn!("No guitar listings to analyze");
        }
        self.monitor.mark("load");

        let mut listings = loaded.listings;
        let report = build_report(
            &self.source.describe(),
            &mut listings,
            &self.plan,
            loaded.summary,
        );
        match &report.overview {
            Some(overview) => tracing::debug!(
                "Analyzed {} priced listings, average ${:.2}",
                overview.priced_count,
                overview.average
            ),
            None => tracing::warn!("No valid prices found"),
        }
        self.monitor.mark("analyze");

        let mut destinations = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            tracing::debug!("Publishing report to {} sink", sink.name());
            let destination = sink.publish(&report).await?;
            destinations.push(destination);
        }
        self.monitor.mark("publish");
        self.monitor.log_final_stats();

        Ok((report, destinations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuitarListing, LoadSummary, LoadedListings};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct FixedSource {
        listings: Vec<GuitarListing>,
    }

    #[async_trait]
    impl ListingSource for FixedSource {
        fn describe(&self) -> String {
            "fixture".to_string()
        }

        async fn load(&self) -> Result<LoadedListings> {
            Ok(LoadedListings {
                listings: self.listings.clone(),
                summary: LoadSummary {
                    rows_read: self.listings.len(),
                    loaded: self.listings.len(),
                    ..LoadSummary::default()
                },
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        seen: Arc<Mutex<Vec<usize>>>,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn publish(&self, report: &AnalysisReport) -> Result<String> {
            self.seen.lock().await.push(report.total_records);
            Ok("memory".to_string())
        }
    }

    #[tokio::test]
    async fn test_engine_publishes_to_all_sinks() {
        let source = FixedSource {
            listings: vec![
                GuitarListing::new("Gibson Les Paul Studio", 1499.0),
                GuitarListing::new("No price", 0.0),
            ],
        };
        let first = RecordingSink::default();
        let second = RecordingSink::default();

        let engine = AnalysisEngine::new(source, AnalysisPlan::default())
            .with_sink(first.clone())
            .with_sink(second.clone());

        let (report, destinations) = engine.run().await.unwrap();

        assert_eq!(report.source, "fixture");
        assert_eq!(report.total_records, 2);
        assert_eq!(report.load.loaded, 2);
        assert_eq!(destinations, vec!["memory", "memory"]);
        assert_eq!(*first.seen.lock().await, vec![2]);
        assert_eq!(*second.seen.lock().await, vec![2]);
    }

    #[tokio::test]
    async fn test_engine_handles_empty_source() {
        let engine = AnalysisEngine::new(FixedSource { listings: vec![] }, AnalysisPlan::default());
        let (report, destinations) = engine.run().await.unwrap();
        assert_eq!(report.total_records, 0);
        assert!(report.overview.is_none());
        assert!(destinations.is_empty());
    }
}
