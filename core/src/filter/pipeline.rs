use crate::error::{Result, ScopeError};
use crate::filter::image::{ImageSample, ImageStats};
use crate::filter::ops::{gradient, percentile, smooth, MAX_SIGMA};
use log::{debug, info, warn};
use ndarray::{Array2, Axis, Zip};
use std::fmt;

/// One filter and its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FilterSpec {
    /// Gaussian blur; larger sigma smooths more
    Smoothing { sigma: f64 },

    /// Gaussian smoothing followed by Sobel gradient magnitude
    EdgeDetection { sigma: f64 },

    /// Percentile clipping followed by rescaling to [0, 1]
    ContrastEnhancement { low: f64, high: f64 },
}

impl FilterSpec {
    /// Display name of the filter kind
    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Smoothing { .. } => "Gaussian Blur",
            FilterSpec::EdgeDetection { .. } => "Edge Detection",
            FilterSpec::ContrastEnhancement { .. } => "Contrast Enhancement",
        }
    }

    /// Checks parameter ranges
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidParameter`] for a sigma outside
    /// `0..=MAX_SIGMA`, or percentiles outside `0 <= low < high <= 100`
    pub fn validate(&self) -> Result<()> {
        match *self {
            FilterSpec::Smoothing { sigma } | FilterSpec::EdgeDetection { sigma } => {
                if !(0.0..=MAX_SIGMA).contains(&sigma) {
                    return Err(ScopeError::InvalidParameter(format!(
                        "{}: sigma must be between 0 and {}, got {}",
                        self.name(),
                        MAX_SIGMA,
                        sigma
                    )));
                }
            }
            FilterSpec::ContrastEnhancement { low, high } => {
                if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low >= high
                {
                    return Err(ScopeError::InvalidParameter(format!(
                        "{}: percentiles must satisfy 0 <= low < high <= 100, got {} and {}",
                        self.name(),
                        low,
                        high
                    )));
                }
            }
        }
        Ok(())
    }

    /// Applies the filter to `input`, producing a new sample
    pub fn apply(&self, input: &ImageSample) -> Result<ImageSample> {
        self.validate()?;
        let pixels = match *self {
            FilterSpec::Smoothing { sigma } => smooth(input.pixels(), sigma),
            FilterSpec::EdgeDetection { sigma } => edge_magnitude(input.pixels(), sigma),
            FilterSpec::ContrastEnhancement { low, high } => {
                enhance_contrast(input.pixels(), low, high)?
            }
        };
        input.derive(pixels)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Smoothing { sigma } | FilterSpec::EdgeDetection { sigma } => {
                write!(f, "{} (sigma={:?})", self.name(), sigma)
            }
            FilterSpec::ContrastEnhancement { low, high } => {
                write!(f, "{} (p{:?}-p{:?})", self.name(), low, high)
            }
        }
    }
}

fn edge_magnitude(pixels: &Array2<f64>, sigma: f64) -> Array2<f64> {
    let smoothed = smooth(pixels, sigma);
    let gx = gradient(&smoothed, Axis(0));
    let gy = gradient(&smoothed, Axis(1));
    Zip::from(&gx).and(&gy).map_collect(|x, y| x.hypot(*y))
}

fn enhance_contrast(pixels: &Array2<f64>, low: f64, high: f64) -> Result<Array2<f64>> {
    let mut sorted: Vec<f64> = pixels.iter().copied().collect();
    sorted.sort_by(f64::total_cmp);

    let (p_low, p_high) = match (percentile(&sorted, low), percentile(&sorted, high)) {
        (Some(l), Some(h)) => (l, h),
        _ => {
            return Err(ScopeError::DegenerateStatistics(
                "image has no samples".to_string(),
            ))
        }
    };

    let range = p_high - p_low;
    if range <= 0.0 {
        return Err(ScopeError::DegenerateStatistics(format!(
            "percentiles p{} and p{} are both {}; contrast range is empty",
            low, high, p_low
        )));
    }

    Ok(pixels.mapv(|v| (v.clamp(p_low, p_high) - p_low) / range))
}

/// Relative change of filtered statistics against the baseline, in percent
///
/// A value is `None` when the baseline statistic is zero and the ratio is
/// undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ChangeSummary {
    pub mean_pct: Option<f64>,
    pub std_pct: Option<f64>,
}

impl ChangeSummary {
    pub fn between(baseline: &ImageStats, filtered: &ImageStats) -> Self {
        Self {
            mean_pct: percent_change(baseline.mean, filtered.mean),
            std_pct: percent_change(baseline.std, filtered.std),
        }
    }
}

fn percent_change(baseline: f64, value: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    let change = (value - baseline) / baseline * 100.0;
    change.is_finite().then_some(change)
}

/// Output of one filter applied to the baseline
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub name: &'static str,
    pub output: ImageSample,
    pub stats: ImageStats,
    pub change: ChangeSummary,
}

/// A filter paired with its result
#[derive(Debug)]
pub struct FilterStep {
    pub spec: FilterSpec,
    pub result: Result<FilterResult>,
}

/// Everything produced by one [`FilterPipeline::run`]
#[derive(Debug)]
pub struct PipelineRun {
    pub baseline: ImageStats,
    /// One step per filter, in pipeline order
    pub steps: Vec<FilterStep>,
}

impl PipelineRun {
    /// Number of steps that produced a result
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.result.is_ok()).count()
    }

    pub fn all_applied(&self) -> bool {
        self.applied_count() == self.steps.len()
    }
}

/// Ordered set of filters, each applied independently to the same baseline
///
/// # Example
///
/// ```
/// use dicomscope_core::{FilterPipeline, FilterSpec, ImageSample};
///
/// let baseline = ImageSample::from_rows(1, 3, vec![0.0, 50.0, 100.0]).unwrap();
/// let pipeline = FilterPipeline::new(vec![
///     FilterSpec::Smoothing { sigma: 0.0 },
///     FilterSpec::ContrastEnhancement { low: 0.0, high: 100.0 },
/// ]);
///
/// let run = pipeline.run(&baseline);
/// assert_eq!(run.steps.len(), 2);
///
/// let contrast = run.steps[1].result.as_ref().unwrap();
/// assert_eq!(contrast.output.pixels().as_slice().unwrap(), &[0.0, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPipeline {
    specs: Vec<FilterSpec>,
}

impl FilterPipeline {
    pub fn new(specs: Vec<FilterSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    /// Applies every filter to `baseline` and compares each to it
    ///
    /// Filters are not chained: each one sees the original baseline. A
    /// failing filter is recorded in its step and does not stop the others.
    pub fn run(&self, baseline: &ImageSample) -> PipelineRun {
        let baseline_stats = baseline.stats();
        debug!("Baseline statistics: {:?}", baseline_stats);

        let steps = self
            .specs
            .iter()
            .map(|spec| {
                info!("Applying {}", spec);
                let result = spec.apply(baseline).map(|output| {
                    let stats = output.stats();
                    FilterResult {
                        name: spec.name(),
                        change: ChangeSummary::between(&baseline_stats, &stats),
                        stats,
                        output,
                    }
                });
                if let Err(e) = &result {
                    warn!("{} skipped: {}", spec.name(), e);
                }
                FilterStep {
                    spec: *spec,
                    result,
                }
            })
            .collect();

        PipelineRun {
            baseline: baseline_stats,
            steps,
        }
    }
}

/// Parameters of the standard blur / edge / contrast pipeline
///
/// # Example
///
/// ```
/// use dicomscope_core::FilterParams;
///
/// let params = FilterParams::default().with_gaussian_sigma(3.0).contrast(false);
/// assert_eq!(params.pipeline().specs().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FilterParams {
    /// Sigma of the Gaussian blur step
    pub gaussian_sigma: f64,

    /// Sigma of the smoothing before edge detection
    pub edge_sigma: f64,

    /// Whether the contrast enhancement step runs
    pub enable_contrast: bool,

    pub percentile_low: f64,
    pub percentile_high: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            gaussian_sigma: 2.0,
            edge_sigma: 1.0,
            enable_contrast: true,
            percentile_low: 2.0,
            percentile_high: 98.0,
        }
    }
}

impl FilterParams {
    pub fn with_gaussian_sigma(mut self, sigma: f64) -> Self {
        self.gaussian_sigma = sigma;
        self
    }

    pub fn with_edge_sigma(mut self, sigma: f64) -> Self {
        self.edge_sigma = sigma;
        self
    }

    pub fn with_percentiles(mut self, low: f64, high: f64) -> Self {
        self.percentile_low = low;
        self.percentile_high = high;
        self
    }

    pub fn contrast(mut self, enabled: bool) -> Self {
        self.enable_contrast = enabled;
        self
    }

    /// Builds the pipeline these parameters describe
    pub fn pipeline(&self) -> FilterPipeline {
        let mut specs = vec![
            FilterSpec::Smoothing {
                sigma: self.gaussian_sigma,
            },
            FilterSpec::EdgeDetection {
                sigma: self.edge_sigma,
            },
        ];
        if self.enable_contrast {
            specs.push(FilterSpec::ContrastEnhancement {
                low: self.percentile_low,
                high: self.percentile_high,
            });
        }
        FilterPipeline::new(specs)
    }
}
