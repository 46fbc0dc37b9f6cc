pub mod api;
pub mod batch;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::{DicomInfo, DicomInfoExtractor};
pub use batch::{Aggregator, BatchRunner, BatchSummary, Progress, StudyGroup, StudyGroups};
pub use cli::report::{BatchReport, FilterReport, InfoReport};
pub use discovery::{discover, DiscoveryConfig, FileCandidate};
pub use error::{Result, ScopeError};
pub use extraction::{load_image_sample, AttributeRecord, Outcome, RecordExtractor};
pub use filter::{
    FilterParams, FilterPipeline, FilterSpec, FilterStep, ImageSample, ImageStats, PipelineRun,
};
pub use types::*;
