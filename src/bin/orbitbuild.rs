//! Extract the orbit of one body from a Horizons vector table.
//!
//! ```text
//! orbitbuild data/mars.txt --output-dir bin --tolerance 0.1
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).
use std::{path::PathBuf, process::ExitCode};

use camino::Utf8PathBuf;
use clap::Parser;
use orbitbuild::{
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PLACEMENT_TOLERANCE},
    extract_and_write, ExtractionParams, OrbitBuildError,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "orbitbuild", about = "Extract one complete orbit from a Horizons vector table")]
struct Args {
    /// Horizons vector table of the body
    ephemeris_file: PathBuf,

    /// Directory receiving bin<body>.json
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Maximum |dx| and |dy| (AU) between the last sample and its place on the orbit
    #[arg(long, default_value_t = DEFAULT_PLACEMENT_TOLERANCE)]
    tolerance: f64,
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf, OrbitBuildError> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| OrbitBuildError::Utf8PathError(p.display().to_string()))
}

fn run(args: Args) -> Result<Utf8PathBuf, OrbitBuildError> {
    let params = ExtractionParams::builder()
        .placement_tolerance(args.tolerance)
        .output_dir(utf8(args.output_dir)?)
        .build()?;
    extract_and_write(&utf8(args.ephemeris_file)?, &params)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Args::parse()) {
        Ok(path) => {
            println!("{path}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "orbit extraction failed");
            ExitCode::FAILURE
        }
    }
}
