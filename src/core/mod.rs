pub mod aggregation;
pub mod analyzer;
pub mod lookup;
pub mod market;
pub mod ordering;
pub mod report;

pub use crate::domain::model::{
    AnalysisPlan, AnalysisReport, GuitarListing, LoadSummary, LoadedListings,
};
pub use crate::domain::ports::{ConfigProvider, ListingSource, ReportSink, Storage};
pub use crate::utils::error::Result;
