use clap::Parser;
use dicomscope_core::cli::{setup_logging, OutputFormat};
use dicomscope_core::{load_image_sample, FilterParams, FilterReport, ImageSample, PipelineRun};
use log::{error, info};
use std::path::PathBuf;
use std::process;

/// CLI tool for comparing image filters on a DICOM file
#[derive(Parser, Debug)]
#[command(name = "dicomfilter")]
#[command(about = "Apply smoothing, edge detection and contrast enhancement to a DICOM image")]
#[command(version)]
struct Cli {
    /// Path to DICOM file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Sigma of the Gaussian blur
    #[arg(long, default_value_t = 2.0)]
    gaussian_sigma: f64,

    /// Sigma of the smoothing applied before edge detection
    #[arg(long, default_value_t = 1.0)]
    edge_sigma: f64,

    /// Skip contrast enhancement
    #[arg(long)]
    no_contrast: bool,

    /// Lower percentile for contrast enhancement
    #[arg(long, default_value_t = 2.0)]
    percentile_low: f64,

    /// Upper percentile for contrast enhancement
    #[arg(long, default_value_t = 98.0)]
    percentile_high: f64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> FilterParams {
        FilterParams::default()
            .with_gaussian_sigma(self.gaussian_sigma)
            .with_edge_sigma(self.edge_sigma)
            .with_percentiles(self.percentile_low, self.percentile_high)
            .contrast(!self.no_contrast)
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let sample = match load_image_sample(&cli.file) {
        Ok(sample) => sample,
        Err(e) => {
            error!("Failed to load {}: {}", cli.file.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let params = cli.params();
    let pipeline = params.pipeline();
    info!(
        "Applying {} filters to {}",
        pipeline.specs().len(),
        cli.file.display()
    );

    let run = pipeline.run(&sample);
    if !run.all_applied() {
        info!(
            "{} of {} filters applied",
            run.applied_count(),
            run.steps.len()
        );
    }

    output_run(&sample, &run, &params, cli.format);
}

fn output_run(sample: &ImageSample, run: &PipelineRun, params: &FilterParams, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            print!("{}", FilterReport::new(sample, run, params));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(sample, run, params) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(
    sample: &ImageSample,
    run: &PipelineRun,
    params: &FilterParams,
) -> Result<String, serde_json::Error> {
    use dicomscope_core::filter::{ChangeSummary, ImageMetadata};
    use dicomscope_core::{FilterSpec, ImageStats};
    use serde::Serialize;

    #[derive(Serialize)]
    struct RunJson<'a> {
        metadata: &'a ImageMetadata,
        params: &'a FilterParams,
        original: &'a ImageStats,
        filters: Vec<StepJson<'a>>,
    }

    #[derive(Serialize)]
    struct StepJson<'a> {
        filter: &'a FilterSpec,
        name: &'static str,
        stats: Option<&'a ImageStats>,
        change: Option<&'a ChangeSummary>,
        error: Option<String>,
    }

    let filters = run
        .steps
        .iter()
        .map(|step| match &step.result {
            Ok(result) => StepJson {
                filter: &step.spec,
                name: step.spec.name(),
                stats: Some(&result.stats),
                change: Some(&result.change),
                error: None,
            },
            Err(e) => StepJson {
                filter: &step.spec,
                name: step.spec.name(),
                stats: None,
                change: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let output = RunJson {
        metadata: sample.metadata(),
        params,
        original: &run.baseline,
        filters,
    };

    serde_json::to_string_pretty(&output)
}
