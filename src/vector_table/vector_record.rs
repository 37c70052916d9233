use std::io::BufRead;

use itertools::Itertools;
use nalgebra::Vector3;

use crate::{
    constants::{
        AstronomicalUnit, JulianDate, StreamPosition, END_OF_EPHEMERIS, LIGHT_TIME_MARKER,
        MIN_COORD_TOKEN_LEN,
    },
    orbitbuild_errors::{OrbitBuildError, ParseVectorError},
};

use super::read_line;

/// One decoded record of a vector table.
///
/// Fields
/// --------
/// * `position` — Byte offset of the record's first line, used to seek back to it.
/// * `jd` — Julian date (TDB) of the sample.
/// * `distance` — Distance to the center body (AU), `None` when the export omits it.
/// * `coords` — Cartesian position relative to the center body (AU).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub position: StreamPosition,
    pub jd: JulianDate,
    pub distance: Option<AstronomicalUnit>,
    pub coords: Vector3<f64>,
}

impl Sample {
    /// Distance used to find the apsides: the recorded `RG` value, or the norm of the
    /// position when the record does not carry one.
    pub fn range(&self) -> AstronomicalUnit {
        self.distance.unwrap_or_else(|| self.coords.norm())
    }
}

/// Outcome of [`decode_record`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRecord {
    Sample(Sample),
    /// The `$$$EOE` line was reached; no further record follows.
    EndOfStream,
}

fn parse_julian_date(line: &str) -> Result<JulianDate, ParseVectorError> {
    line.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ParseVectorError::InvalidJulianDate(line.trim().to_string()))
}

/// Parse ` X = 1.3E+00 Y = 5.4E-01 Z =-2.0E-05`.
///
/// The line is split on `=` then on whitespace; labels are the short tokens, the values are
/// the tokens longer than [`MIN_COORD_TOKEN_LEN`].
fn parse_coordinates(line: &str) -> Result<Vector3<f64>, ParseVectorError> {
    line.split('=')
        .flat_map(str::split_whitespace)
        .filter(|token| token.len() > MIN_COORD_TOKEN_LEN)
        .map(|token| token.parse::<f64>().ok())
        .collect_tuple()
        .and_then(|(x, y, z)| Some(Vector3::new(x?, y?, z?)))
        .ok_or_else(|| ParseVectorError::InvalidCoordinates(line.trim().to_string()))
}

/// Parse ` LT= 8.1E-03 RG= 1.4E+00 RR= 9.4E-05`, returning `RG`.
fn parse_distance(line: &str) -> Result<Option<AstronomicalUnit>, ParseVectorError> {
    if line.chars().nth(1) != Some(LIGHT_TIME_MARKER) {
        return Ok(None);
    }

    line.split('=')
        .nth(2)
        .and_then(|field| field.split_whitespace().next())
        .and_then(|token| token.parse().ok())
        .map(Some)
        .ok_or_else(|| ParseVectorError::InvalidDistance(line.trim().to_string()))
}

/// Decode exactly one 4-line record from the current stream position.
///
/// Arguments
/// -----------------
/// * `reader` — Stream positioned on the first line of a record (or on `$$$EOE`).
/// * `position` — Byte offset of that line, captured by the caller **before** this call.
///
/// Return
/// ----------
/// * [`DecodedRecord::Sample`] for a data record, [`DecodedRecord::EndOfStream`] when
///   line 1 is the `$$$EOE` marker. The end marker is a normal loop terminator.
///
/// Errors
/// ----------
/// * [`ParseVectorError::TruncatedRecord`] if the file ends inside a record or before `$$$EOE`.
/// * [`ParseVectorError::InvalidJulianDate`], [`ParseVectorError::InvalidCoordinates`],
///   [`ParseVectorError::InvalidDistance`] for malformed lines.
///
/// See also
/// ------------
/// * [`crate::vector_table::vector_reader::VectorReader::next_record`] – Captures `position` itself.
pub fn decode_record<R: BufRead>(
    reader: &mut R,
    position: StreamPosition,
) -> Result<DecodedRecord, OrbitBuildError> {
    let mut line = String::new();
    let mut next_line = |line: &mut String| -> Result<(), OrbitBuildError> {
        if read_line(reader, line)? {
            Ok(())
        } else {
            Err(ParseVectorError::TruncatedRecord(position).into())
        }
    };

    next_line(&mut line)?;
    if line.starts_with(END_OF_EPHEMERIS) {
        return Ok(DecodedRecord::EndOfStream);
    }
    let jd = parse_julian_date(&line)?;

    next_line(&mut line)?;
    let coords = parse_coordinates(&line)?;

    // velocity
    next_line(&mut line)?;

    next_line(&mut line)?;
    let distance = parse_distance(&line)?;

    Ok(DecodedRecord::Sample(Sample {
        position,
        jd,
        distance,
        coords,
    }))
}
