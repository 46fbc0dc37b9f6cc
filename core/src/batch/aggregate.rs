use crate::extraction::AttributeRecord;
use crate::types::Field;
use indexmap::IndexMap;
use log::debug;

/// Records sharing one Study Instance UID, in processing order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudyGroup {
    pub study_uid: String,
    pub records: Vec<AttributeRecord>,
}

impl StudyGroup {
    /// Summarizes the group from its first record
    ///
    /// Description, patient id and modality are not checked for consistency
    /// across the group; the first record seen wins.
    pub fn summary(&self) -> StudySummary {
        let first = self.records.first();
        StudySummary {
            study_uid: self.study_uid.clone(),
            description: first
                .map(|r| r.study_description.clone())
                .unwrap_or_default(),
            patient_id: first.map(|r| r.patient_id.clone()).unwrap_or_default(),
            modality: first.map(|r| r.modality.clone()).unwrap_or_default(),
            image_count: self.records.len(),
        }
    }
}

/// Per-study figures shown in the batch report
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudySummary {
    pub study_uid: String,
    pub description: Field<String>,
    pub patient_id: Field<String>,
    pub modality: Field<String>,
    pub image_count: usize,
}

/// Study groups keyed by UID, in order of first appearance
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct StudyGroups {
    groups: IndexMap<String, StudyGroup>,
}

impl StudyGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, study_uid: &str) -> Option<&StudyGroup> {
        self.groups.get(study_uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudyGroup> {
        self.groups.values()
    }

    pub fn summaries(&self) -> Vec<StudySummary> {
        self.iter().map(StudyGroup::summary).collect()
    }
}

/// Groups records by Study Instance UID
///
/// # Example
///
/// ```no_run
/// use dicomscope_core::{Aggregator, Outcome, RecordExtractor};
///
/// let outcomes = vec![RecordExtractor::extract("a.dcm"), RecordExtractor::extract("b.dcm")];
/// let groups = Aggregator::group(outcomes.iter().filter_map(Outcome::record));
/// for summary in groups.summaries() {
///     println!("{}: {} images", summary.study_uid, summary.image_count);
/// }
/// ```
pub struct Aggregator;

impl Aggregator {
    /// Appends each record to the group of its study UID
    ///
    /// Records without a study UID are left out of every group.
    pub fn group<'a, I>(records: I) -> StudyGroups
    where
        I: IntoIterator<Item = &'a AttributeRecord>,
    {
        let mut groups: IndexMap<String, StudyGroup> = IndexMap::new();

        for record in records {
            let Some(key) = record.study_key() else {
                debug!("{} has no study UID, not grouped", record.file_name);
                continue;
            };

            groups
                .entry(key.to_string())
                .or_insert_with(|| StudyGroup {
                    study_uid: key.to_string(),
                    records: Vec::new(),
                })
                .records
                .push(record.clone());
        }

        StudyGroups { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str, study: Option<&str>, description: &str) -> AttributeRecord {
        AttributeRecord {
            file_path: PathBuf::from(name),
            file_name: name.to_string(),
            patient_id: Field::Available(format!("P-{}", name)),
            patient_name: Field::NotAvailable,
            study_uid: study.map(str::to_string).into(),
            study_description: Field::Available(description.to_string()),
            series_number: Field::NotAvailable,
            series_description: Field::NotAvailable,
            instance_number: Field::NotAvailable,
            modality: Field::Available("CT".to_string()),
            rows: Field::NotAvailable,
            columns: Field::NotAvailable,
            pixel_spacing: Field::NotAvailable,
            slice_thickness: Field::NotAvailable,
        }
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let records = vec![
            record("1.dcm", Some("S2"), "Chest CT"),
            record("2.dcm", Some("S1"), "Brain MRI"),
            record("3.dcm", Some("S2"), "Chest CT (recon)"),
            record("4.dcm", None, "Orphan"),
            record("5.dcm", Some("  "), "Blank"),
        ];

        let groups = Aggregator::group(&records);

        assert_eq!(groups.len(), 2);
        let keys: Vec<&str> = groups.iter().map(|g| g.study_uid.as_str()).collect();
        assert_eq!(keys, vec!["S2", "S1"]);

        let s2 = groups.get("S2").unwrap();
        let names: Vec<&str> = s2.records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["1.dcm", "3.dcm"]);
        for group in groups.iter() {
            assert!(group
                .records
                .iter()
                .all(|r| r.study_key() == Some(group.study_uid.as_str())));
        }
    }

    #[test]
    fn test_summary_uses_first_record() {
        let records = vec![
            record("1.dcm", Some("S1"), "First"),
            record("2.dcm", Some("S1"), "Second"),
        ];
        let summary = Aggregator::group(&records).get("S1").unwrap().summary();

        assert_eq!(summary.description, Field::Available("First".to_string()));
        assert_eq!(summary.patient_id, Field::Available("P-1.dcm".to_string()));
        assert_eq!(summary.image_count, 2);
    }

    #[test]
    fn test_no_records() {
        let groups = Aggregator::group(&Vec::<AttributeRecord>::new());
        assert!(groups.is_empty());
        assert!(groups.summaries().is_empty());
    }
}
