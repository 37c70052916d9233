//! # Orbit extraction pipeline
//!
//! Builds an [`OrbitRecord`] from one Horizons vector table:
//!
//! ```text
//! scan_header ─► decode_record* ─► ApsisDetector ─► seek back ─► extract_segment ─► locate_placement ─► OrbitRecord
//!                 (first pass)                                    (second pass)
//! ```
//!
//! The only state carried from the first pass to the second one is the stream position of
//! the two bounding apsides and the reference sample. Nothing is written unless every step
//! succeeded.
use std::{
    fs::File,
    io::{BufRead, BufReader, Seek},
};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use crate::{
    apsis_detector::ApsisDetector,
    extraction_params::ExtractionParams,
    orbit_record::OrbitRecord,
    orbit_segment::extract_segment,
    orbitbuild_errors::OrbitBuildError,
    placement::locate_placement,
    vector_table::vector_reader::VectorReader,
};

/// Extract one complete orbit from a vector table stream.
///
/// Arguments
/// -----------------
/// * `stream` — Seekable text stream positioned at the start of the table.
/// * `params` — Placement tolerance (the output directory is not used here).
///
/// Return
/// ----------
/// * The [`OrbitRecord`] of the most recent complete orbit in the table.
///
/// Errors
/// ----------
/// * Format errors from the header or the records.
/// * [`OrbitBuildError::InsufficientOrbitCoverage`] if the table spans less than 1.5 orbits.
/// * [`OrbitBuildError::NoPlacementCandidate`] if the last sample is far from the extracted orbit.
pub fn build_orbit<R: BufRead + Seek>(
    stream: R,
    params: &ExtractionParams,
) -> Result<OrbitRecord, OrbitBuildError> {
    let mut reader = VectorReader::new(stream)?;
    let header = reader.header().clone();

    let mut detector = ApsisDetector::new();
    let mut sample_count = 0usize;
    let mut missing_distance = 0usize;
    for sample in reader.samples() {
        let sample = sample?;
        sample_count += 1;
        if sample.distance.is_none() {
            missing_distance += 1;
        }
        detector.push(sample);
    }
    if missing_distance > 0 {
        warn!(
            body = %header.body_name,
            missing_distance,
            "records without RG, using the position norm as distance"
        );
    }

    let bounds = detector.finish()?;
    let segment = extract_segment(
        &mut reader,
        bounds.first.sample.position,
        bounds.last.sample.position,
        &bounds.reference,
        params.placement_tolerance,
    )?;
    if segment.len() != bounds.segment_len() {
        warn!(
            expected = bounds.segment_len(),
            found = segment.len(),
            "orbit segment size differs between the two passes"
        );
    }

    let placement_index = locate_placement(
        &segment.candidates,
        &bounds.reference.coords,
        params.placement_tolerance,
    )?;

    let record = OrbitRecord {
        body_name: header.body_name,
        sample_interval: header.step_size,
        extremes: segment.extremes,
        placement_index,
        orbit_start_jd: segment.start_jd,
        orbit: segment.coords,
    };

    info!(
        body = %record.body_name,
        samples = sample_count,
        apsis = ?bounds.kind(),
        points = record.point_count(),
        placement = record.placement_index,
        start = %record.orbit_start_epoch(),
        "orbit extracted"
    );
    Ok(record)
}

/// [`build_orbit`] over a file.
pub fn build_orbit_from_path(
    path: &Utf8Path,
    params: &ExtractionParams,
) -> Result<OrbitRecord, OrbitBuildError> {
    let file = File::open(path)?;
    build_orbit(BufReader::new(file), params)
}

/// Extract the orbit of one ephemeris file and write its record into `params.output_dir`.
///
/// Return
/// ----------
/// * The path of the written record.
pub fn extract_and_write(
    path: &Utf8Path,
    params: &ExtractionParams,
) -> Result<Utf8PathBuf, OrbitBuildError> {
    let record = build_orbit_from_path(path, params)?;
    let written = record.write_to_dir(&params.output_dir)?;
    info!(path = %written, "orbit record written");
    Ok(written)
}
