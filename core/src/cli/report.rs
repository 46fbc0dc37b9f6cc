use crate::api::DicomInfo;
use crate::batch::BatchSummary;
use crate::filter::{FilterParams, ImageSample, ImageStats, PipelineRun};
use std::fmt;

/// UID width in the single-file report
const INFO_UID_WIDTH: usize = 40;

/// UID width in the per-study batch listing
const STUDY_UID_WIDTH: usize = 50;

/// Renders a percent change, or `undefined` when the baseline was zero
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.2}%", pct),
        None => "undefined".to_string(),
    }
}

/// Text report for a single DICOM file
pub struct InfoReport<'a> {
    info: &'a DicomInfo,
}

impl<'a> InfoReport<'a> {
    pub fn new(info: &'a DicomInfo) -> Self {
        Self { info }
    }
}

impl<'a> fmt::Display for InfoReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;

        writeln!(f, "DICOM File Information")?;
        writeln!(f, "======================")?;
        writeln!(f)?;

        writeln!(f, "Patient")?;
        writeln!(f, "-------")?;
        writeln!(f, "Name:           {}", info.patient.name)?;
        writeln!(f, "ID:             {}", info.patient.id)?;
        writeln!(f, "Birth Date:     {}", info.patient.birth_date)?;
        writeln!(f, "Sex:            {}", info.patient.sex)?;
        writeln!(f)?;

        writeln!(f, "Study")?;
        writeln!(f, "-----")?;
        writeln!(f, "Description:    {}", info.study.description)?;
        writeln!(f, "Date:           {}", info.study.date)?;
        writeln!(f, "Time:           {}", info.study.time)?;
        writeln!(f, "UID:            {}", info.study.uid.truncated(INFO_UID_WIDTH))?;
        writeln!(f)?;

        writeln!(f, "Series")?;
        writeln!(f, "------")?;
        writeln!(f, "Description:    {}", info.series.description)?;
        writeln!(f, "Number:         {}", info.series.number)?;
        writeln!(f, "Modality:       {}", info.series.modality)?;
        writeln!(f, "UID:            {}", info.series.uid.truncated(INFO_UID_WIDTH))?;
        writeln!(f)?;

        writeln!(f, "Image")?;
        writeln!(f, "-----")?;
        writeln!(f, "Rows:           {}", info.image.rows)?;
        writeln!(f, "Columns:        {}", info.image.columns)?;
        writeln!(f, "Instance:       {}", info.image.instance_number)?;
        writeln!(f, "Slice Thickness: {}", info.image.slice_thickness)?;
        writeln!(f, "Pixel Spacing:  {}", info.image.pixel_spacing)?;

        Ok(())
    }
}

/// Text report for a batch run
pub struct BatchReport<'a> {
    summary: &'a BatchSummary,
}

impl<'a> BatchReport<'a> {
    pub fn new(summary: &'a BatchSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for BatchReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "Batch Processing Summary")?;
        writeln!(f, "========================")?;
        writeln!(f, "Total files:    {}", summary.total)?;
        writeln!(
            f,
            "Successful:     {} ({:.1}%)",
            summary.successful,
            summary.success_rate()
        )?;
        writeln!(
            f,
            "Failed:         {} ({:.1}%)",
            summary.failed,
            summary.failure_rate()
        )?;
        writeln!(f, "Unique studies: {}", summary.studies.len())?;

        if !summary.studies.is_empty() {
            writeln!(f)?;
            writeln!(f, "Studies")?;
            writeln!(f, "-------")?;
            for study in summary.studies.summaries() {
                let uid: String = study.study_uid.chars().take(STUDY_UID_WIDTH).collect();
                writeln!(f, "{}...", uid)?;
                writeln!(f, "  Description: {}", study.description)?;
                writeln!(f, "  Patient ID:  {}", study.patient_id)?;
                writeln!(f, "  Modality:    {}", study.modality)?;
                writeln!(f, "  Images:      {}", study.image_count)?;
            }
        }

        if !summary.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Errors")?;
            writeln!(f, "------")?;
            for err in &summary.errors {
                writeln!(f, "  {}: {}", err.file_name, err.error)?;
            }
            if summary.remaining_errors > 0 {
                writeln!(f, "  ... and {} more errors", summary.remaining_errors)?;
            }
        }

        Ok(())
    }
}

/// Text report comparing filter outputs against the original image
pub struct FilterReport<'a> {
    sample: &'a ImageSample,
    run: &'a PipelineRun,
    params: &'a FilterParams,
}

impl<'a> FilterReport<'a> {
    pub fn new(sample: &'a ImageSample, run: &'a PipelineRun, params: &'a FilterParams) -> Self {
        Self {
            sample,
            run,
            params,
        }
    }
}

fn write_stats(f: &mut fmt::Formatter<'_>, stats: &ImageStats) -> fmt::Result {
    writeln!(
        f,
        "  Shape:  {} x {} ({})",
        stats.shape.0, stats.shape.1, stats.element_type
    )?;
    writeln!(f, "  Range:  [{:.2}, {:.2}]", stats.min, stats.max)?;
    writeln!(f, "  Mean:   {:.2}", stats.mean)?;
    writeln!(f, "  Std:    {:.2}", stats.std)?;
    writeln!(f, "  Median: {:.2}", stats.median)
}

impl<'a> fmt::Display for FilterReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metadata = self.sample.metadata();
        let (rows, columns) = self.sample.shape();

        writeln!(f, "Image Metadata")?;
        writeln!(f, "==============")?;
        writeln!(f, "Dimensions:     {} x {}", rows, columns)?;
        writeln!(f, "Modality:       {}", metadata.modality)?;
        writeln!(f, "Bits Allocated: {}", metadata.bits_allocated)?;
        match metadata.pixel_spacing.as_option() {
            Some(spacing) => writeln!(f, "Pixel Spacing:  {}", spacing.format_precise(3))?,
            None => writeln!(f, "Pixel Spacing:  {}", metadata.pixel_spacing)?,
        }
        writeln!(f)?;

        writeln!(f, "Original")?;
        write_stats(f, &self.run.baseline)?;

        for step in &self.run.steps {
            writeln!(f)?;
            writeln!(f, "{}", step.spec)?;
            match &step.result {
                Ok(result) => {
                    write_stats(f, &result.stats)?;
                    writeln!(f, "  Mean change: {}", format_change(result.change.mean_pct))?;
                    writeln!(f, "  Std change:  {}", format_change(result.change.std_pct))?;
                }
                Err(e) => writeln!(f, "  Failed: {}", e)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Processing Summary")?;
        writeln!(f, "==================")?;
        writeln!(f, "Original shape:  {} x {}", rows, columns)?;
        writeln!(
            f,
            "Filters applied: {}/{}",
            self.run.applied_count(),
            self.run.steps.len()
        )?;
        writeln!(f, "Gaussian sigma:  {:?}", self.params.gaussian_sigma)?;
        writeln!(f, "Edge sigma:      {:?}", self.params.edge_sigma)?;
        writeln!(
            f,
            "Contrast:        {}",
            if self.params.enable_contrast {
                "enabled"
            } else {
                "disabled"
            }
        )?;

        Ok(())
    }
}
