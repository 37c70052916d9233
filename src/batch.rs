//! # Batch extraction
//!
//! Runs [`extract_and_write`] over every body of a configuration list. A failing body is
//! logged and reported in its [`BatchOutcome`]; the remaining bodies are still processed.
//!
//! With the `progress` feature a progress bar shows the bodies done so far and the time
//! spent per body.
#[cfg(feature = "progress")]
use std::time::Duration;

use camino::Utf8PathBuf;
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

#[cfg(feature = "progress")]
use crate::progress_bar::{fmt_dur, BodyTimer};
use crate::{
    body_config::BodyConfig, extraction_params::ExtractionParams, orbit_builder::extract_and_write,
    orbitbuild_errors::OrbitBuildError,
};

/// Result of the extraction of one body.
#[derive(Debug)]
pub struct BatchOutcome {
    pub body_name: String,
    /// Path of the written record, or why the body was skipped.
    pub result: Result<Utf8PathBuf, OrbitBuildError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn build_one(body: &BodyConfig, params: &ExtractionParams) -> BatchOutcome {
    let result = extract_and_write(&body.ephemeris_file, params);
    if let Err(err) = &result {
        error!(
            body = %body.body_name,
            file = %body.ephemeris_file,
            %err,
            "orbit extraction failed"
        );
    }
    BatchOutcome {
        body_name: body.body_name.clone(),
        result,
    }
}

fn log_summary(outcomes: &[BatchOutcome]) {
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        bodies = outcomes.len(),
        written = outcomes.len() - failed,
        failed,
        "batch finished"
    );
}

/// Extract and write the orbit of every body, in configuration order.
///
/// Arguments
/// -----------------
/// * `bodies` — Bodies to process, as read by [`read_body_config`](crate::body_config::read_body_config).
/// * `params` — Placement tolerance and output directory shared by all bodies.
///
/// Return
/// ----------
/// * One [`BatchOutcome`] per body, in the same order as `bodies`.
#[cfg(not(feature = "progress"))]
pub fn build_all(bodies: &[BodyConfig], params: &ExtractionParams) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = bodies.iter().map(|b| build_one(b, params)).collect();
    log_summary(&outcomes);
    outcomes
}

#[cfg(feature = "progress")]
pub fn build_all(bodies: &[BodyConfig], params: &ExtractionParams) -> Vec<BatchOutcome> {
    let pb = ProgressBar::new(bodies.len().max(1) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | ETA {eta_precise} | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.enable_steady_tick(Duration::from_millis(200));

    let mut timer = BodyTimer::new(0.2);
    let mut outcomes = Vec::with_capacity(bodies.len());
    for body in bodies {
        pb.set_message(body.body_name.clone());
        outcomes.push(build_one(body, params));

        let last = timer.tick();
        pb.set_message(format!(
            "last: {}, avg: {}",
            fmt_dur(last),
            fmt_dur(timer.avg())
        ));
        pb.inc(1);
    }
    pb.finish_and_clear();

    log_summary(&outcomes);
    outcomes
}
