use std::{io::BufRead, sync::LazyLock};

use regex::Regex;

use crate::{
    constants::{BODY_NAME_TOKEN, START_OF_EPHEMERIS},
    orbitbuild_errors::{OrbitBuildError, ParseVectorError},
};

use super::read_line;

static STEP_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step-size\s*:\s*(\d+)\s*minutes").expect("step size pattern")
});

/// Identification of the table taken from its preamble.
///
/// Fields
/// --------
/// * `body_name` — Target body, e.g. `Mars` for `Mars Barycenter`.
/// * `step_size` — Minutes between two consecutive samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorHeader {
    pub body_name: String,
    pub step_size: u32,
}

/// True for `Step-size : ...`, tested the way the table is laid out: an `S` in column 1
/// and a `-` in column 5.
fn is_step_size_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.first() == Some(&b'S') && bytes.get(4) == Some(&b'-')
}

fn parse_step_size(line: &str) -> Result<u32, ParseVectorError> {
    STEP_SIZE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ParseVectorError::InvalidStepSize(line.trim().to_string()))
}

/// Consume the preamble of a vector table and stop on the first data record.
///
/// The banner line is skipped, the body name is token #4 of the second line, and every
/// following line is read until `$$$SOE`. The first step-size line met on the way gives
/// the sample interval.
///
/// Arguments
/// -----------------
/// * `reader` — Text stream positioned at the very first line of the file.
///
/// Return
/// ----------
/// * The [`VectorHeader`], with `reader` positioned on line 1 of the first record.
///
/// Errors
/// ----------
/// * [`ParseVectorError::MissingHeaderField`] if the name token or the step-size line is absent.
/// * [`ParseVectorError::MissingStartOfEphemeris`] if the file ends before `$$$SOE`.
/// * [`ParseVectorError::InvalidStepSize`] if the step-size value is not an integer.
/// * [`OrbitBuildError::IoError`] on read failures.
pub fn scan_header<R: BufRead>(reader: &mut R) -> Result<VectorHeader, OrbitBuildError> {
    let mut line = String::new();

    // banner
    if !read_line(reader, &mut line)? || !read_line(reader, &mut line)? {
        return Err(ParseVectorError::MissingHeaderField("body name").into());
    }
    let body_name = line
        .split_whitespace()
        .nth(BODY_NAME_TOKEN)
        .ok_or(ParseVectorError::MissingHeaderField("body name"))?
        .to_string();

    let mut step_size = None;
    loop {
        if !read_line(reader, &mut line)? {
            return Err(ParseVectorError::MissingStartOfEphemeris.into());
        }
        if line.trim_end() == START_OF_EPHEMERIS {
            break;
        }
        if step_size.is_none() && is_step_size_line(&line) {
            step_size = Some(parse_step_size(&line)?);
        }
    }

    let step_size = step_size.ok_or(ParseVectorError::MissingHeaderField("Step-size"))?;
    Ok(VectorHeader {
        body_name,
        step_size,
    })
}
