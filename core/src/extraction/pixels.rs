use crate::error::{Result, ScopeError};
use crate::filter::{ImageMetadata, ImageSample};
use std::path::Path;

/// Decodes the first frame of a DICOM file into an [`ImageSample`]
///
/// Unlike header extraction, this materializes the full pixel payload. Any
/// failure is returned to the caller; there is no partial result.
///
/// Samples are the raw stored values. RescaleSlope and RescaleIntercept are
/// not applied.
///
/// # Errors
///
/// - [`ScopeError::FileNotFound`] if `path` does not exist
/// - [`ScopeError::DecodeFailure`] if the file or its pixel data cannot be
///   decoded, or the image is not single-channel
#[cfg(feature = "pixeldata")]
pub fn load_image_sample<P: AsRef<Path>>(path: P) -> Result<ImageSample> {
    use dicom_object::open_file;
    use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
    use log::{debug, info};
    use ndarray::Array2;

    let path = path.as_ref();
    if !path.exists() {
        return Err(ScopeError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading pixel data: {}", path.display());
    let dcm = open_file(path)?;
    let decoded = dcm.decode_pixel_data()?;

    if decoded.samples_per_pixel() != 1 {
        return Err(ScopeError::DecodeFailure(format!(
            "expected single-channel pixel data, found {} samples per pixel",
            decoded.samples_per_pixel()
        )));
    }

    let rows = decoded.rows() as usize;
    let columns = decoded.columns() as usize;
    debug!(
        "Decoded {} frame(s) of {}x{}, using frame 0",
        decoded.number_of_frames(),
        rows,
        columns
    );

    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let samples: Vec<f64> = decoded
        .to_vec_frame_with_options::<f32>(0, &options)?
        .into_iter()
        .map(f64::from)
        .collect();
    let pixels = Array2::from_shape_vec((rows, columns), samples).map_err(|e| {
        ScopeError::DecodeFailure(format!("pixel data does not match {}x{}: {}", rows, columns, e))
    })?;

    ImageSample::new(pixels, ImageMetadata::from_dicom(&dcm))
}

/// Pixel decoding is unavailable without the `pixeldata` feature
#[cfg(not(feature = "pixeldata"))]
pub fn load_image_sample<P: AsRef<Path>>(_path: P) -> Result<ImageSample> {
    Err(ScopeError::DependencyMissing(
        "pixel data decoding requires the 'pixeldata' feature".to_string(),
    ))
}

#[cfg(all(test, feature = "pixeldata"))]
mod tests {
    use super::*;
    use crate::test_support::{write_dicom, DicomFixture};
    use crate::types::{Field, PixelSpacing};
    use tempfile::TempDir;

    #[test]
    fn test_load_image_sample() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image.dcm");
        write_dicom(
            &path,
            &DicomFixture::new("1.2.3")
                .modality("CT")
                .pixel_spacing(0.5, 0.5)
                .pixels(2, 3, vec![0, 10, 20, 30, 40, 50]),
        );

        let sample = load_image_sample(&path).unwrap();
        assert_eq!(sample.shape(), (2, 3));
        assert_eq!(sample.pixels()[[1, 2]], 50.0);
        assert_eq!(sample.metadata().modality, Field::Available("CT".to_string()));
        assert_eq!(
            sample.metadata().pixel_spacing,
            Field::Available(PixelSpacing::new(0.5, 0.5))
        );
        assert_eq!(sample.metadata().bits_allocated, Field::Available(16));
    }

    #[test]
    fn test_rescale_is_not_applied() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ct.dcm");
        write_dicom(
            &path,
            &DicomFixture::new("1.2.3")
                .modality("CT")
                .rescale(2.0, -1000.0)
                .pixels(1, 2, vec![0, 100]),
        );

        let sample = load_image_sample(&path).unwrap();
        assert_eq!(sample.pixels().as_slice().unwrap(), &[0.0, 100.0]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_image_sample(dir.path().join("absent.dcm")).unwrap_err();
        assert!(matches!(err, ScopeError::FileNotFound(_)));
    }

    #[test]
    fn test_header_without_pixels_is_decode_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header_only.dcm");
        write_dicom(&path, &DicomFixture::new("1.2.3").modality("SR"));

        let err = load_image_sample(&path).unwrap_err();
        assert!(matches!(err, ScopeError::DecodeFailure(_)));
    }
}
