use clap::Parser;
use dicomscope_core::cli::{setup_logging, OutputFormat};
use dicomscope_core::{discover, BatchReport, BatchRunner, BatchSummary, DiscoveryConfig};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::process;

/// CLI tool for extracting header metadata from every DICOM file in a directory tree
#[derive(Parser, Debug)]
#[command(name = "dicombatch")]
#[command(about = "Extract DICOM metadata from a directory tree and group it by study")]
#[command(version)]
struct Cli {
    /// Directory containing DICOM files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Additional file extension to treat as DICOM (repeatable)
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn discovery_config(&self) -> DiscoveryConfig {
        self.extensions
            .iter()
            .fold(DiscoveryConfig::default(), |config, ext| {
                config.with_extension(ext)
            })
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Processing directory: {}", cli.directory.display());

    let files = match discover(&cli.directory, &cli.discovery_config()) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to scan directory: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        warn!("No DICOM files found under {}", cli.directory.display());
    }

    let text = cli.format == OutputFormat::Text;
    let outcomes = BatchRunner::run(&files, |progress| {
        if text {
            println!("{}", progress);
        } else {
            debug!("{}", progress);
        }
    });

    let summary = BatchSummary::from_outcomes(&outcomes);
    output_summary(&summary, cli.format);
}

fn output_summary(summary: &BatchSummary, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", BatchReport::new(summary));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(summary) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_extra_extensions() {
        let cli = Cli::try_parse_from(["dicombatch", "-e", "ima", "--extension", ".IMG", "scans"])
            .unwrap();
        let config = cli.discovery_config();

        assert!(config.is_candidate(Path::new("a.IMA")));
        assert!(config.is_candidate(Path::new("a.img")));
        assert!(config.is_candidate(Path::new("a.dcm")));
        assert!(!config.is_candidate(Path::new("a.txt")));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dicombatch", "scans"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("scans"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.extensions.is_empty());
    }
}
