use crate::error::{Result, ScopeError};
use crate::extraction::record::read_pixel_spacing;
use crate::extraction::tags::{
    get_float_value, get_string_value, get_u16_value, BITS_ALLOCATED, MODALITY, WINDOW_CENTER,
    WINDOW_WIDTH,
};
use crate::filter::ops::percentile;
use crate::types::{Field, PixelSpacing};
use dicom_object::InMemDicomObject;
use ndarray::Array2;

/// Source attributes carried alongside decoded pixels
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageMetadata {
    pub modality: Field<String>,
    pub pixel_spacing: Field<PixelSpacing>,
    pub window_center: Field<f64>,
    pub window_width: Field<f64>,
    pub bits_allocated: Field<u16>,
}

impl ImageMetadata {
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        Self {
            modality: get_string_value(dcm, MODALITY).into(),
            pixel_spacing: read_pixel_spacing(dcm).into(),
            window_center: get_float_value(dcm, WINDOW_CENTER).into(),
            window_width: get_float_value(dcm, WINDOW_WIDTH).into(),
            bits_allocated: get_u16_value(dcm, BITS_ALLOCATED).into(),
        }
    }
}

/// A 2-D array of finite intensity samples
///
/// Samples are never modified in place; filters build a new `ImageSample`
/// through [`ImageSample::derive`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSample {
    pixels: Array2<f64>,
    metadata: ImageMetadata,
}

impl ImageSample {
    /// Wraps a pixel array
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidValue`] if the array is empty or holds
    /// NaN or infinite values
    pub fn new(pixels: Array2<f64>, metadata: ImageMetadata) -> Result<Self> {
        if pixels.is_empty() {
            return Err(ScopeError::InvalidValue(format!(
                "image has no samples (shape {:?})",
                pixels.dim()
            )));
        }
        if let Some(bad) = pixels.iter().find(|v| !v.is_finite()) {
            return Err(ScopeError::InvalidValue(format!(
                "image contains non-finite sample {}",
                bad
            )));
        }
        Ok(Self { pixels, metadata })
    }

    /// Builds a sample from row-major values without source metadata
    pub fn from_rows(rows: usize, columns: usize, values: Vec<f64>) -> Result<Self> {
        let pixels = Array2::from_shape_vec((rows, columns), values)
            .map_err(|e| ScopeError::InvalidValue(format!("bad image shape: {}", e)))?;
        Self::new(pixels, ImageMetadata::default())
    }

    /// Creates a new sample with the same metadata and different pixels
    pub fn derive(&self, pixels: Array2<f64>) -> Result<Self> {
        Self::new(pixels, self.metadata.clone())
    }

    pub fn pixels(&self) -> &Array2<f64> {
        &self.pixels
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    /// Returns (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn stats(&self) -> ImageStats {
        ImageStats::compute(&self.pixels)
    }
}

/// Descriptive statistics of an image
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub median: f64,
    pub shape: (usize, usize),
    pub element_type: &'static str,
}

impl ImageStats {
    fn compute(pixels: &Array2<f64>) -> Self {
        let n = pixels.len() as f64;
        let min = pixels.iter().copied().fold(f64::INFINITY, f64::min);
        let max = pixels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = pixels.sum() / n;
        let variance = pixels.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted: Vec<f64> = pixels.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        Self {
            min,
            max,
            mean,
            std: variance.sqrt(),
            // non-empty by construction
            median: percentile(&sorted, 50.0).unwrap_or_default(),
            shape: pixels.dim(),
            element_type: "f64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(ImageSample::from_rows(0, 0, vec![]).is_err());
        assert!(ImageSample::from_rows(1, 2, vec![1.0, f64::NAN]).is_err());
        assert!(ImageSample::from_rows(1, 2, vec![1.0, f64::INFINITY]).is_err());
        assert!(ImageSample::from_rows(2, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_stats() {
        let sample = ImageSample::from_rows(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let stats = sample.stats();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean - 2.5).abs() < EPS);
        assert!((stats.std - 1.25_f64.sqrt()).abs() < EPS);
        assert!((stats.median - 2.5).abs() < EPS);
        assert_eq!(stats.shape, (2, 2));
        assert_eq!(stats.element_type, "f64");
    }

    #[test]
    fn test_derive_keeps_metadata() {
        let metadata = ImageMetadata {
            modality: Field::Available("CT".to_string()),
            ..Default::default()
        };
        let sample = ImageSample::new(array![[1.0, 2.0]], metadata.clone()).unwrap();
        let derived = sample.derive(array![[0.0, 0.0]]).unwrap();

        assert_eq!(derived.metadata(), &metadata);
        assert_eq!(sample.pixels(), &array![[1.0, 2.0]]);
    }
}
