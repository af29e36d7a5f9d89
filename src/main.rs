//! Main binary entry point for the spdx-presenter.

use clap::Parser;
use spdx_presenter::Config;
use spdx_presenter::errors::PresenterError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Catalog snapshot (JSON) to present
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Destination for the SPDX tag-value document
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    #[arg(short, long)]
    verbose: bool,

    /// Validate the snapshot against the catalog schema before presenting
    #[arg(long)]
    validate: bool,
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), PresenterError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config {
        input_file: cli.input,
        output_file: cli.output,
        validate: cli.validate,
    };

    spdx_presenter::run(config)
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => {
            log::info!("Presentation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
