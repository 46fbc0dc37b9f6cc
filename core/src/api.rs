use crate::error::{Result, ScopeError};
use crate::extraction::record::read_pixel_spacing;
use crate::extraction::tags::{
    get_float_value, get_int_value, get_string_value, get_u16_value, COLUMNS, INSTANCE_NUMBER,
    MODALITY, PATIENT_BIRTH_DATE, PATIENT_ID, PATIENT_NAME, PATIENT_SEX, ROWS, SERIES_DESCRIPTION,
    SERIES_INSTANCE_UID, SERIES_NUMBER, SLICE_THICKNESS, STUDY_DATE, STUDY_DESCRIPTION,
    STUDY_INSTANCE_UID, STUDY_TIME,
};
use crate::types::{Field, PixelSpacing};
use dicom_dictionary_std::tags::PIXEL_DATA;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use std::path::Path;

/// Extractor for the single-file information view
///
/// Gathers patient, study, series and image attributes from a DICOM object.
/// Absent attributes come back as [`Field::NotAvailable`]; extraction from an
/// already-opened object never fails.
///
/// # Example
///
/// ```
/// use dicomscope_core::{DicomInfoExtractor, Field};
/// use dicom_object::InMemDicomObject;
/// use dicom_core::{DataElement, PrimitiveValue, VR, Tag};
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0008, 0x0060), // Modality
///     VR::CS,
///     PrimitiveValue::from("CT"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0028, 0x0010), // Rows
///     VR::US,
///     PrimitiveValue::from(512_u16),
/// ));
///
/// let info = DicomInfoExtractor::extract(&dcm);
///
/// assert_eq!(info.series.modality, Field::Available("CT".to_string()));
/// assert_eq!(info.image.rows, Field::Available(512));
/// assert_eq!(info.patient.name, Field::NotAvailable);
/// ```
pub struct DicomInfoExtractor;

impl DicomInfoExtractor {
    /// Extracts all four sections from a DICOM object
    pub fn extract(dcm: &InMemDicomObject) -> DicomInfo {
        DicomInfo {
            patient: PatientInfo {
                name: get_string_value(dcm, PATIENT_NAME).into(),
                id: get_string_value(dcm, PATIENT_ID).into(),
                birth_date: get_string_value(dcm, PATIENT_BIRTH_DATE).into(),
                sex: get_string_value(dcm, PATIENT_SEX).into(),
            },
            study: StudyInfo {
                description: get_string_value(dcm, STUDY_DESCRIPTION).into(),
                date: get_string_value(dcm, STUDY_DATE).into(),
                time: get_string_value(dcm, STUDY_TIME).into(),
                uid: get_string_value(dcm, STUDY_INSTANCE_UID).into(),
            },
            series: SeriesInfo {
                description: get_string_value(dcm, SERIES_DESCRIPTION).into(),
                number: get_int_value(dcm, SERIES_NUMBER).into(),
                modality: get_string_value(dcm, MODALITY).into(),
                uid: get_string_value(dcm, SERIES_INSTANCE_UID).into(),
            },
            image: ImageInfo {
                rows: get_u16_value(dcm, ROWS).into(),
                columns: get_u16_value(dcm, COLUMNS).into(),
                instance_number: get_int_value(dcm, INSTANCE_NUMBER).into(),
                slice_thickness: get_float_value(dcm, SLICE_THICKNESS).into(),
                pixel_spacing: read_pixel_spacing(dcm).into(),
            },
        }
    }

    /// Opens a file header and extracts its information
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::FileNotFound`] if the file does not exist and
    /// [`ScopeError::DecodeFailure`] if it is not a readable DICOM file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DicomInfo> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScopeError::FileNotFound(path.to_path_buf()));
        }

        let dcm = OpenFileOptions::new()
            .read_until(PIXEL_DATA)
            .open_file(path)?;
        Ok(Self::extract(&dcm))
    }
}

/// Attributes of a single DICOM file, by information entity
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DicomInfo {
    pub patient: PatientInfo,
    pub study: StudyInfo,
    pub series: SeriesInfo,
    pub image: ImageInfo,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PatientInfo {
    pub name: Field<String>,
    pub id: Field<String>,
    pub birth_date: Field<String>,
    pub sex: Field<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudyInfo {
    pub description: Field<String>,
    pub date: Field<String>,
    pub time: Field<String>,
    pub uid: Field<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesInfo {
    pub description: Field<String>,
    pub number: Field<i32>,
    pub modality: Field<String>,
    pub uid: Field<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImageInfo {
    pub rows: Field<u16>,
    pub columns: Field<u16>,
    pub instance_number: Field<i32>,

    /// Nominal slice thickness in millimeters
    pub slice_thickness: Field<f64>,
    pub pixel_spacing: Field<PixelSpacing>,
}
