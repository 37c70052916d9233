use nalgebra::Vector3;

use crate::{orbit_segment::PlacementCandidate, orbitbuild_errors::OrbitBuildError};

/// Pick the segment sample where the body is placed when the animation starts.
///
/// The candidates already passed the x/y tolerance filter of the segment extraction. A single
/// candidate is taken as is; among several, the one with the smallest 3D distance to the
/// reference wins, the earliest one on ties.
///
/// Arguments
/// -----------------
/// * `candidates` — Samples of the segment close to the reference in x and y.
/// * `reference` — Position of the reference sample (AU).
/// * `tolerance` — Tolerance used to gather `candidates`, reported on failure.
///
/// Return
/// ----------
/// * The zero-based index of the chosen sample within the segment.
///
/// Errors
/// ----------
/// * [`OrbitBuildError::NoPlacementCandidate`] when `candidates` is empty.
pub fn locate_placement(
    candidates: &[PlacementCandidate],
    reference: &Vector3<f64>,
    tolerance: f64,
) -> Result<usize, OrbitBuildError> {
    match candidates {
        [] => Err(OrbitBuildError::NoPlacementCandidate { tolerance }),
        [single] => Ok(single.index),
        [head, tail @ ..] => {
            let mut best = (head.index, (head.coords - reference).norm());
            for candidate in tail {
                let distance = (candidate.coords - reference).norm();
                if distance < best.1 {
                    best = (candidate.index, distance);
                }
            }
            Ok(best.0)
        }
    }
}
