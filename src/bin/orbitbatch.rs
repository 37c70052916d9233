//! Extract the orbit of every body listed in a body configuration file.
//!
//! ```text
//! orbitbatch --config config/planet_config --output-dir bin
//! ```
//!
//! Bodies that fail are logged and skipped; the exit status is non-zero if any did.
use std::{path::PathBuf, process::ExitCode};

use camino::Utf8PathBuf;
use clap::Parser;
use orbitbuild::{
    batch::build_all,
    body_config::read_body_config,
    constants::{DEFAULT_BODY_CONFIG, DEFAULT_OUTPUT_DIR, DEFAULT_PLACEMENT_TOLERANCE},
    ExtractionParams, OrbitBuildError,
};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "orbitbatch", about = "Extract the orbits of all configured bodies")]
struct Args {
    /// Body configuration list (name:file:color:size:other)
    #[arg(long, default_value = DEFAULT_BODY_CONFIG)]
    config: PathBuf,

    /// Directory receiving the bin<body>.json records
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

/// Number of bodies that could not be written.
fn run(args: Args) -> Result<usize, OrbitBuildError> {
    let params = ExtractionParams::builder()
        .placement_tolerance(args.tolerance)
        .output_dir(utf8(args.output_dir)?)
        .build()?;
    let config = utf8(args.config)?;

    let bodies = read_body_config(&config)?;
    if bodies.is_empty() {
        warn!(config = %config, "no body configured");
    }

    let outcomes = build_all(&bodies, &params);
    for outcome in &outcomes {
        if let Ok(path) = &outcome.result {
            println!("{}\t{path}", outcome.body_name);
        }
    }
    Ok(outcomes.iter().filter(|o| !o.is_ok()).count())
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
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "some orbits were not extracted");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(%err, "batch aborted");
            ExitCode::FAILURE
        }
    }
}
