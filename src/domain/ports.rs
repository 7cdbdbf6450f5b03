use crate::domain::model::{AnalysisPlan, AnalysisReport, LoadedListings};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn delimiter(&self) -> char;
    fn has_headers(&self) -> bool;
    fn infer_missing_year(&self) -> bool;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn top_n(&self) -> usize;
    fn title_searches(&self) -> &[String];
    fn price_targets(&self) -> &[f64];
    fn market_breakdown(&self) -> bool;

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            top_n: self.top_n(),
            title_searches: self.title_searches().to_vec(),
            price_targets: self.price_targets().to_vec(),
            market_breakdown: self.market_breakdown(),
        }
    }
}

/// Ingestion side: produces the listings for one analysis run.
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn describe(&self) -> String;
    async fn load(&self) -> Result<LoadedListings>;
}

/// Reporting side: formats or persists a finished report.
#[async_trait]
pub trait ReportSink: Send + Sync {
    fn name(&self) -> &str;

    /// Returns a short description of where the report went.
    async fn publish(&self, report: &AnalysisReport) -> Result<String>;
}
