use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

// Study Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);

// Series Tags
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// Instance Tags
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);

// Image Geometry Tags
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);

// Display Tags
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present, cannot be converted to string,
/// or holds only padding
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i32
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

/// Helper to get u16 value from DICOM tag
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u16>().ok())
}

/// Helper to get the first floating point value from DICOM tag
///
/// Multi-valued DS elements (e.g. several window centers) yield the first one.
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Helper to get all floating point values from DICOM tag
pub fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn sample_object() -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CT ")),
            DataElement::new(STUDY_DESCRIPTION, VR::LO, PrimitiveValue::from("  ")),
            DataElement::new(ROWS, VR::US, PrimitiveValue::from(512_u16)),
            DataElement::new(SERIES_NUMBER, VR::IS, PrimitiveValue::from("3")),
            DataElement::new(
                PIXEL_SPACING,
                VR::DS,
                PrimitiveValue::Strs(vec!["0.5".to_string(), "0.75".to_string()].into()),
            ),
        ])
    }

    #[test]
    fn test_tag_values() {
        assert_eq!(STUDY_INSTANCE_UID, Tag(0x0020, 0x000D));
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(PIXEL_SPACING, Tag(0x0028, 0x0030));
    }

    #[test]
    fn test_get_string_value_trims_and_filters_blank() {
        let dcm = sample_object();
        assert_eq!(get_string_value(&dcm, MODALITY), Some("CT".to_string()));
        assert_eq!(get_string_value(&dcm, STUDY_DESCRIPTION), None);
        assert_eq!(get_string_value(&dcm, PATIENT_ID), None);
    }

    #[test]
    fn test_numeric_helpers() {
        let dcm = sample_object();
        assert_eq!(get_u16_value(&dcm, ROWS), Some(512));
        assert_eq!(get_int_value(&dcm, SERIES_NUMBER), Some(3));
        assert_eq!(get_int_value(&dcm, INSTANCE_NUMBER), None);
        assert_eq!(
            get_multi_float_value(&dcm, PIXEL_SPACING),
            Some(vec![0.5, 0.75])
        );
        assert_eq!(get_float_value(&dcm, PIXEL_SPACING), Some(0.5));
    }
}
