use crate::error::Result;
use crate::extraction::tags::{
    get_int_value, get_multi_float_value, get_float_value, get_string_value, get_u16_value,
    COLUMNS, INSTANCE_NUMBER, MODALITY, PATIENT_ID, PATIENT_NAME, PIXEL_SPACING, ROWS,
    SERIES_DESCRIPTION, SERIES_NUMBER, SLICE_THICKNESS, STUDY_DESCRIPTION, STUDY_INSTANCE_UID,
};
use crate::types::{Field, PixelSpacing};
use dicom_dictionary_std::tags::PIXEL_DATA;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::debug;
use std::path::{Path, PathBuf};

/// Header attributes of one DICOM file
///
/// Every attribute is a [`Field`], so a file that omits a tag still yields
/// a complete record with the `N/A` sentinel in that slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AttributeRecord {
    /// Path to the DICOM file
    pub file_path: PathBuf,

    /// Base name of the file
    pub file_name: String,

    pub patient_id: Field<String>,
    pub patient_name: Field<String>,

    /// Study Instance UID, the grouping key
    pub study_uid: Field<String>,
    pub study_description: Field<String>,

    pub series_number: Field<i32>,
    pub series_description: Field<String>,
    pub instance_number: Field<i32>,
    pub modality: Field<String>,

    pub rows: Field<u16>,
    pub columns: Field<u16>,
    pub pixel_spacing: Field<PixelSpacing>,
    pub slice_thickness: Field<f64>,
}

impl AttributeRecord {
    /// Reads the fixed attribute list from an opened DICOM object
    pub fn from_dicom(path: &Path, dcm: &InMemDicomObject) -> Self {
        Self {
            file_path: path.to_path_buf(),
            file_name: file_name_of(path),
            patient_id: get_string_value(dcm, PATIENT_ID).into(),
            patient_name: get_string_value(dcm, PATIENT_NAME).into(),
            study_uid: get_string_value(dcm, STUDY_INSTANCE_UID).into(),
            study_description: get_string_value(dcm, STUDY_DESCRIPTION).into(),
            series_number: get_int_value(dcm, SERIES_NUMBER).into(),
            series_description: get_string_value(dcm, SERIES_DESCRIPTION).into(),
            instance_number: get_int_value(dcm, INSTANCE_NUMBER).into(),
            modality: get_string_value(dcm, MODALITY).into(),
            rows: get_u16_value(dcm, ROWS).into(),
            columns: get_u16_value(dcm, COLUMNS).into(),
            pixel_spacing: read_pixel_spacing(dcm).into(),
            slice_thickness: get_float_value(dcm, SLICE_THICKNESS).into(),
        }
    }

    /// Returns the grouping key, if the record has a non-blank study UID
    pub fn study_key(&self) -> Option<&str> {
        self.study_uid.as_non_empty()
    }
}

/// Result of extracting one file
///
/// Exactly one variant holds. A failure carries the error text and the base
/// name of the file that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "status", rename_all = "lowercase"))]
pub enum Outcome {
    Success(AttributeRecord),
    Failure { file_name: String, error: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns the record of a successful extraction
    pub fn record(&self) -> Option<&AttributeRecord> {
        match self {
            Outcome::Success(record) => Some(record),
            Outcome::Failure { .. } => None,
        }
    }

    /// Returns the file name regardless of variant
    pub fn file_name(&self) -> &str {
        match self {
            Outcome::Success(record) => &record.file_name,
            Outcome::Failure { file_name, .. } => file_name,
        }
    }
}

/// Header-only extraction of [`AttributeRecord`]s
///
/// Files are read up to, but not including, the PixelData element, so the
/// cost of extraction follows the header size rather than the image size.
///
/// # Example
///
/// ```no_run
/// use dicomscope_core::{Outcome, RecordExtractor};
///
/// match RecordExtractor::extract("scans/IM-0001-0001.dcm") {
///     Outcome::Success(record) => println!("study {}", record.study_uid),
///     Outcome::Failure { file_name, error } => eprintln!("{}: {}", file_name, error),
/// }
/// ```
pub struct RecordExtractor;

impl RecordExtractor {
    /// Extracts a record from a file, capturing any failure in the outcome
    pub fn extract<P: AsRef<Path>>(path: P) -> Outcome {
        let path = path.as_ref();
        match Self::try_extract(path) {
            Ok(record) => Outcome::Success(record),
            Err(e) => {
                debug!("Extraction failed for {}: {}", path.display(), e);
                Outcome::Failure {
                    file_name: file_name_of(path),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Extracts a record, propagating decoder errors
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScopeError::DecodeFailure`] if the file is missing,
    /// unreadable, or not a valid DICOM file
    pub fn try_extract(path: &Path) -> Result<AttributeRecord> {
        let dcm = OpenFileOptions::new()
            .read_until(PIXEL_DATA)
            .open_file(path)?;
        Ok(AttributeRecord::from_dicom(path, &dcm))
    }
}

/// Reads PixelSpacing, falling back to text parsing for malformed DS values
pub(crate) fn read_pixel_spacing(dcm: &InMemDicomObject) -> Option<PixelSpacing> {
    get_multi_float_value(dcm, PIXEL_SPACING)
        .and_then(|values| PixelSpacing::from_values(&values))
        .or_else(|| {
            get_string_value(dcm, PIXEL_SPACING).and_then(|s| PixelSpacing::parse(&s).ok())
        })
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
