//! DICOM fixtures written to disk for tests

use crate::extraction::tags::{
    BITS_ALLOCATED, COLUMNS, INSTANCE_NUMBER, MODALITY, PATIENT_ID, PIXEL_SPACING, ROWS,
    SAMPLES_PER_PIXEL, SERIES_NUMBER, SOP_INSTANCE_UID, STUDY_DESCRIPTION, STUDY_INSTANCE_UID,
};
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_dictionary_std::tags::{
    BITS_STORED, HIGH_BIT, PHOTOMETRIC_INTERPRETATION, PIXEL_DATA, PIXEL_REPRESENTATION,
    RESCALE_INTERCEPT, RESCALE_SLOPE,
};
use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::InMemDicomObject;
use std::path::Path;

const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
const SECONDARY_CAPTURE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.7";

/// Builder for a minimal DICOM file
pub struct DicomFixture {
    elements: Vec<DataElement<InMemDicomObject>>,
}

impl DicomFixture {
    pub fn new(study_uid: &str) -> Self {
        Self { elements: Vec::new() }
            .text(STUDY_INSTANCE_UID, VR::UI, study_uid)
            .text(SOP_INSTANCE_UID, VR::UI, "1.2.826.0.1.3680043.2.1125.1")
    }

    /// Fixture without any study UID
    pub fn without_study() -> Self {
        Self { elements: Vec::new() }.text(SOP_INSTANCE_UID, VR::UI, "1.2.826.0.1.3680043.2.1125.2")
    }

    pub fn patient_id(self, value: &str) -> Self {
        self.text(PATIENT_ID, VR::LO, value)
    }

    pub fn modality(self, value: &str) -> Self {
        self.text(MODALITY, VR::CS, value)
    }

    pub fn study_description(self, value: &str) -> Self {
        self.text(STUDY_DESCRIPTION, VR::LO, value)
    }

    pub fn series_number(self, value: i32) -> Self {
        self.text(SERIES_NUMBER, VR::IS, &value.to_string())
    }

    pub fn instance_number(self, value: i32) -> Self {
        self.text(INSTANCE_NUMBER, VR::IS, &value.to_string())
    }

    pub fn pixel_spacing(mut self, row: f64, col: f64) -> Self {
        self.elements.push(DataElement::new(
            PIXEL_SPACING,
            VR::DS,
            PrimitiveValue::Strs(vec![row.to_string(), col.to_string()].into()),
        ));
        self
    }

    pub fn rescale(self, slope: f64, intercept: f64) -> Self {
        self.text(RESCALE_SLOPE, VR::DS, &slope.to_string())
            .text(RESCALE_INTERCEPT, VR::DS, &intercept.to_string())
    }

    /// Adds a 16-bit MONOCHROME2 image of the given shape
    pub fn pixels(mut self, rows: u16, columns: u16, samples: Vec<u16>) -> Self {
        self.elements.extend([
            DataElement::new(ROWS, VR::US, PrimitiveValue::from(rows)),
            DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(columns)),
            DataElement::new(SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(
                PHOTOMETRIC_INTERPRETATION,
                VR::CS,
                PrimitiveValue::from("MONOCHROME2"),
            ),
            DataElement::new(BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(BITS_STORED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)),
            DataElement::new(PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)),
            DataElement::new(PIXEL_DATA, VR::OW, PrimitiveValue::U16(samples.into())),
        ]);
        self
    }

    fn text(mut self, tag: Tag, vr: VR, value: &str) -> Self {
        self.elements
            .push(DataElement::new(tag, vr, PrimitiveValue::from(value)));
        self
    }
}

/// Writes the fixture as a Part 10 file with preamble and file meta group
pub fn write_dicom(path: &Path, fixture: &DicomFixture) {
    let obj = InMemDicomObject::from_element_iter(fixture.elements.iter().cloned());
    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(SECONDARY_CAPTURE_STORAGE)
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
        )
        .expect("valid file meta");
    file_obj.write_to_file(path).expect("fixture written");
}
