//! Image filtering and before/after comparison
//!
//! - [`ImageSample`]: Decoded pixel array plus source metadata
//! - [`FilterPipeline`]: Ordered filters applied to a common baseline
//! - [`ops`]: Gaussian and Sobel primitives the filters are built from

pub mod image;
pub mod ops;
pub mod pipeline;

pub use image::{ImageMetadata, ImageSample, ImageStats};
pub use pipeline::{
    ChangeSummary, FilterParams, FilterPipeline, FilterResult, FilterSpec, FilterStep, PipelineRun,
};
