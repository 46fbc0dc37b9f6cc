//! Core type definitions shared across dicomscope
//!
//! - [`Field`]: A DICOM attribute value that may be absent from the file
//! - [`PixelSpacing`]: Physical spacing between adjacent pixels

mod field;
mod pixel_spacing;

pub use field::{Field, NOT_AVAILABLE};
pub use pixel_spacing::PixelSpacing;
