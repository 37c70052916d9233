//! # Orbit segment extraction
//!
//! Second pass over a vector table: replays the samples of the orbit chosen by the
//! [`ApsisDetector`](crate::apsis_detector::ApsisDetector) and accumulates what the orbit
//! record needs.
//!
//! For every sample of the half-open range `[first, last)`:
//! - `x` then `y` are appended to the interleaved coordinate sequence,
//! - the [`OrbitExtremes`] box is widened,
//! - the sample is kept as a [`PlacementCandidate`] when its `x` and `y` are both within
//!   the placement tolerance of the reference sample.
//!
//! Two strategies are offered. [`extract_segment`] seeks back into the file and decodes the
//! range again, keeping memory bounded. [`extract_segment_from_samples`] works on samples
//! already held in memory, for callers that buffered the whole table.
use std::io::{BufRead, Seek};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{JulianDate, OrbitCoords, StreamPosition},
    orbitbuild_errors::{OrbitBuildError, ParseVectorError},
    vector_table::{
        vector_reader::VectorReader,
        vector_record::{DecodedRecord, Sample},
    },
};

/// Bounding box of the orbit in the x/y plane (AU).
///
/// The box starts at the origin, where the primary sits, and only grows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitExtremes {
    pub max_x: f64,
    pub min_x: f64,
    pub max_y: f64,
    pub min_y: f64,
}

impl OrbitExtremes {
    /// Widen the box to include `(x, y)`.
    ///
    /// A value is tested against the minimum only when it is not a new maximum, so on a
    /// degenerate box the maximum is the one moved.
    pub fn widen(&mut self, x: f64, y: f64) {
        if x > self.max_x {
            self.max_x = x;
        } else if x < self.min_x {
            self.min_x = x;
        }
        if y > self.max_y {
            self.max_y = y;
        } else if y < self.min_y {
            self.min_y = y;
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A segment sample close enough (in x and y) to the reference sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    /// Zero-based index of the sample within the segment
    pub index: usize,
    pub coords: Vector3<f64>,
}

/// Result of the second pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSegment {
    pub start_jd: JulianDate,
    pub coords: OrbitCoords,
    pub extremes: OrbitExtremes,
    pub candidates: Vec<PlacementCandidate>,
}

impl OrbitSegment {
    /// Number of samples in the segment.
    pub fn len(&self) -> usize {
        self.coords.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// `(x, y)` of the sample at `index`.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        let x = *self.coords.get(2 * index)?;
        let y = *self.coords.get(2 * index + 1)?;
        Some((x, y))
    }
}

struct SegmentAccumulator<'a> {
    reference: &'a Vector3<f64>,
    tolerance: f64,
    start_jd: Option<JulianDate>,
    coords: OrbitCoords,
    extremes: OrbitExtremes,
    candidates: Vec<PlacementCandidate>,
}

impl<'a> SegmentAccumulator<'a> {
    fn new(reference: &'a Sample, tolerance: f64, capacity: usize) -> Self {
        SegmentAccumulator {
            reference: &reference.coords,
            tolerance,
            start_jd: None,
            coords: Vec::with_capacity(2 * capacity),
            extremes: OrbitExtremes::default(),
            candidates: Vec::new(),
        }
    }

    fn push(&mut self, sample: &Sample) {
        let index = self.coords.len() / 2;
        let (x, y) = (sample.coords.x, sample.coords.y);

        self.start_jd.get_or_insert(sample.jd);
        self.extremes.widen(x, y);
        self.coords.push(x);
        self.coords.push(y);

        if (x - self.reference.x).abs() < self.tolerance
            && (y - self.reference.y).abs() < self.tolerance
        {
            self.candidates.push(PlacementCandidate {
                index,
                coords: sample.coords,
            });
        }
    }

    fn finish(self) -> Option<OrbitSegment> {
        Some(OrbitSegment {
            start_jd: self.start_jd?,
            coords: self.coords,
            extremes: self.extremes,
            candidates: self.candidates,
        })
    }
}

/// Re-read the records between two stream positions.
///
/// Arguments
/// -----------------
/// * `reader` — Reader over the same table the positions were captured from.
/// * `first` — Offset of the first sample of the segment (included).
/// * `last` — Offset of the sample opening the next orbit (excluded).
/// * `reference` — Sample the body must be placed at, usually the last one of the table.
/// * `tolerance` — Maximum `|Δx|` and `|Δy|` for a placement candidate (AU).
///
/// Return
/// ----------
/// * The accumulated [`OrbitSegment`]. Decoding stops at `last` or at `$$$EOE`.
///
/// Errors
/// ----------
/// * Any decoding error of the records in range.
/// * [`ParseVectorError::TruncatedRecord`] if no record can be read at `first`.
pub fn extract_segment<R: BufRead + Seek>(
    reader: &mut VectorReader<R>,
    first: StreamPosition,
    last: StreamPosition,
    reference: &Sample,
    tolerance: f64,
) -> Result<OrbitSegment, OrbitBuildError> {
    reader.seek_to(first)?;
    let mut accumulator = SegmentAccumulator::new(reference, tolerance, 0);

    loop {
        match reader.next_record()? {
            DecodedRecord::Sample(sample) if sample.position < last => accumulator.push(&sample),
            _ => break,
        }
    }

    accumulator
        .finish()
        .ok_or_else(|| ParseVectorError::TruncatedRecord(first).into())
}

/// Same as [`extract_segment`] over samples already in memory, `first..last` being indices
/// into `samples`.
///
/// Return
/// ----------
/// * `None` when the range is empty or out of bounds.
pub fn extract_segment_from_samples(
    samples: &[Sample],
    first: usize,
    last: usize,
    reference: &Sample,
    tolerance: f64,
) -> Option<OrbitSegment> {
    let range = samples.get(first..last)?;
    let mut accumulator = SegmentAccumulator::new(reference, tolerance, range.len());
    range.iter().for_each(|sample| accumulator.push(sample));
    accumulator.finish()
}

#[cfg(test)]
mod orbit_segment_test {
    use super::*;

    fn sample(i: usize, x: f64, y: f64) -> Sample {
        Sample {
            position: i as u64,
            jd: 2458000.5 + i as f64,
            distance: None,
            coords: Vector3::new(x, y, 0.0),
        }
    }

    #[test]
    fn test_widen_extremes() {
        let mut extremes = OrbitExtremes::default();
        for (x, y) in [(1.2, 0.3), (-0.4, 1.5), (-1.6, -0.2), (0.1, -1.1)] {
            extremes.widen(x, y);
        }
        assert_eq!(
            extremes,
            OrbitExtremes {
                max_x: 1.2,
                min_x: -1.6,
                max_y: 1.5,
                min_y: -1.1
            }
        );
        assert!(extremes.contains(0.0, 0.0));
        assert!((extremes.width() - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_widen_favours_maximum() {
        // inverted box: a value beyond both bounds only moves the maximum
        let mut extremes = OrbitExtremes {
            max_x: -1.0,
            min_x: 1.0,
            max_y: 0.0,
            min_y: 0.0,
        };
        extremes.widen(2.0, 0.0);
        assert_eq!(extremes.max_x, 2.0);
        assert_eq!(extremes.min_x, 1.0);

        extremes.widen(0.5, 0.0);
        assert_eq!(extremes.max_x, 2.0);
        assert_eq!(extremes.min_x, 0.5);
    }

    #[test]
    fn test_extract_from_samples() {
        let samples: Vec<Sample> = (0..8)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::FRAC_PI_2;
                sample(i, angle.cos(), angle.sin())
            })
            .collect();
        let reference = &samples[7];

        let segment = extract_segment_from_samples(&samples, 2, 6, reference, 0.1).unwrap();

        assert_eq!(segment.len(), 4);
        assert_eq!(segment.coords.len(), 8);
        assert_eq!(segment.start_jd, 2458002.5);
        assert_eq!(segment.candidates.len(), 1);
        assert_eq!(segment.candidates[0].index, 1);
        assert_eq!(segment.point(1), Some((samples[3].coords.x, samples[3].coords.y)));
        assert_eq!(segment.point(4), None);

        for (x, y) in segment.coords.chunks(2).map(|p| (p[0], p[1])) {
            assert!(segment.extremes.contains(x, y));
        }

        assert!(extract_segment_from_samples(&samples, 3, 3, reference, 0.1).is_none());
        assert!(extract_segment_from_samples(&samples, 6, 12, reference, 0.1).is_none());
    }
}
