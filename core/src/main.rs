use clap::Parser;
use dicomscope_core::cli::{setup_logging, Cli, OutputFormat};
use dicomscope_core::{DicomInfo, DicomInfoExtractor, InfoReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!("Error: {} is not a file", cli.file.display());
        process::exit(1);
    }

    info!("Reading: {}", cli.file.display());

    let info = match DicomInfoExtractor::from_file(&cli.file) {
        Ok(info) => info,
        Err(e) => {
            error!("Failed to read {}: {}", cli.file.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    output_info(&info, cli.format);
}

fn output_info(info: &DicomInfo, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            print!("{}", InfoReport::new(info));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(info) {
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
