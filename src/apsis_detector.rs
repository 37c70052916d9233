//! # Online apsis detection
//!
//! Finds the perihelia and aphelia of a body from the stream of its samples, in a single
//! forward pass and with a two-sample window, then picks the two apsides that bound the most
//! recent complete orbit.
//!
//! ## Algorithm
//! -----------------
//! 1. The first sample is discarded: the table may start anywhere on the orbit and its first
//!    record cannot be trusted as an apsis.
//! 2. The second and third samples seed the direction: a decreasing distance leaves a
//!    perihelion pending, anything else an aphelion.
//! 3. For every following pair `(current, next)`:
//!    * rising distance with a pending perihelion records `current` as a perihelion;
//!    * non-rising distance with a pending aphelion records `current` as an aphelion;
//!    * in every case the pending apsis becomes the opposite of the current direction.
//! 4. [`ApsisDetector::finish`] selects, among the kinds with two candidates or more, the one
//!    whose latest candidate comes last. Its two latest candidates delimit the orbit.
//!
//! Because a kind can only be recorded while it is pending, and recording it flips the pending
//! state, two candidates of the same kind are never recorded back-to-back.
//!
//! ## Indices
//! -----------------
//! Candidate indices count samples from 0 at the **second** sample of the table (the first
//! one kept). Stream positions are carried along for the second pass.
use tracing::debug;

use crate::{orbitbuild_errors::OrbitBuildError, vector_table::vector_record::Sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApsisKind {
    /// Closest point to the primary
    Perihelion,
    /// Farthest point from the primary
    Aphelion,
}

/// The apsis the detector is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Aphelion,
    Perihelion,
}

/// A sample recognised as a local extremum of the distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ApsisCandidate {
    pub kind: ApsisKind,
    pub index: usize,
    pub sample: Sample,
}

/// The two latest candidates of one kind, plus how many were seen overall.
#[derive(Debug, Clone, Default)]
struct ApsisHistory {
    previous: Option<ApsisCandidate>,
    latest: Option<ApsisCandidate>,
    count: usize,
}

impl ApsisHistory {
    fn record(&mut self, candidate: ApsisCandidate) {
        self.previous = self.latest.replace(candidate);
        self.count += 1;
    }

    fn pair(&self) -> Option<(&ApsisCandidate, &ApsisCandidate)> {
        self.previous.as_ref().zip(self.latest.as_ref())
    }
}

/// Boundaries of the orbit chosen by [`ApsisDetector::finish`].
///
/// Fields
/// --------
/// * `first` — Apsis opening the orbit (included in the segment).
/// * `last` — Next apsis of the same kind, opening the following orbit (excluded).
/// * `reference` — Last sample of the table, where the body must be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitBounds {
    pub first: ApsisCandidate,
    pub last: ApsisCandidate,
    pub reference: Sample,
}

impl OrbitBounds {
    pub fn kind(&self) -> ApsisKind {
        self.first.kind
    }

    /// Number of samples in `[first, last)`.
    pub fn segment_len(&self) -> usize {
        self.last.index - self.first.index
    }
}

/// Streaming apsis detector, fed one [`Sample`] at a time.
///
/// # Example
///
/// ```rust,no_run
/// use orbitbuild::apsis_detector::ApsisDetector;
/// use orbitbuild::vector_table::vector_reader::VectorReader;
/// use camino::Utf8Path;
///
/// # fn run() -> Result<(), orbitbuild::orbitbuild_errors::OrbitBuildError> {
/// let mut reader = VectorReader::open(Utf8Path::new("data/mars.txt"))?;
/// let mut detector = ApsisDetector::new();
/// for sample in reader.samples() {
///     detector.push(sample?);
/// }
/// let bounds = detector.finish()?;
/// println!("orbit of {} samples", bounds.segment_len());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApsisDetector {
    skipped_first: bool,
    current: Option<Sample>,
    current_index: usize,
    pending: Option<Pending>,
    perihelia: ApsisHistory,
    aphelia: ApsisHistory,
}

impl ApsisDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next sample of the table.
    pub fn push(&mut self, next: Sample) {
        if !self.skipped_first {
            self.skipped_first = true;
            return;
        }

        let Some(current) = self.current.take() else {
            self.current = Some(next);
            return;
        };

        let rising = next.range() > current.range();
        match self.pending {
            None => {
                self.pending = Some(if rising {
                    Pending::Aphelion
                } else {
                    Pending::Perihelion
                });
            }
            Some(Pending::Perihelion) if rising => {
                self.record(ApsisKind::Perihelion, current);
                self.pending = Some(Pending::Aphelion);
            }
            Some(Pending::Aphelion) if !rising => {
                self.record(ApsisKind::Aphelion, current);
                self.pending = Some(Pending::Perihelion);
            }
            Some(_) => {
                self.pending = Some(if rising {
                    Pending::Aphelion
                } else {
                    Pending::Perihelion
                });
            }
        }

        self.current = Some(next);
        self.current_index += 1;
    }

    fn record(&mut self, kind: ApsisKind, sample: Sample) {
        debug!(
            ?kind,
            index = self.current_index,
            jd = sample.jd,
            range = sample.range(),
            "apsis candidate"
        );
        let candidate = ApsisCandidate {
            kind,
            index: self.current_index,
            sample,
        };
        match kind {
            ApsisKind::Perihelion => self.perihelia.record(candidate),
            ApsisKind::Aphelion => self.aphelia.record(candidate),
        }
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Number of perihelia recorded so far.
    pub fn perihelion_count(&self) -> usize {
        self.perihelia.count
    }

    /// Number of aphelia recorded so far.
    pub fn aphelion_count(&self) -> usize {
        self.aphelia.count
    }

    /// Latest candidate of the given kind, if any.
    pub fn latest(&self, kind: ApsisKind) -> Option<&ApsisCandidate> {
        match kind {
            ApsisKind::Perihelion => self.perihelia.latest.as_ref(),
            ApsisKind::Aphelion => self.aphelia.latest.as_ref(),
        }
    }

    /// Stop scanning and choose the orbit boundaries.
    ///
    /// Return
    /// ----------
    /// * The [`OrbitBounds`] of the kind whose latest candidate is the most recent, among the
    ///   kinds that have at least two candidates.
    ///
    /// Errors
    /// ----------
    /// * [`OrbitBuildError::InsufficientOrbitCoverage`] when no kind reached two candidates:
    ///   the table does not cover the 1.5+ orbits needed.
    pub fn finish(self) -> Result<OrbitBounds, OrbitBuildError> {
        let insufficient = || OrbitBuildError::InsufficientOrbitCoverage {
            perihelia: self.perihelia.count,
            aphelia: self.aphelia.count,
        };

        let (first, last) = match (self.perihelia.pair(), self.aphelia.pair()) {
            (Some(peri), Some(aph)) => {
                if aph.1.index > peri.1.index {
                    aph
                } else {
                    peri
                }
            }
            (Some(peri), None) => peri,
            (None, Some(aph)) => aph,
            (None, None) => return Err(insufficient()),
        };
        let reference = self.current.clone().ok_or_else(insufficient)?;

        Ok(OrbitBounds {
            first: first.clone(),
            last: last.clone(),
            reference,
        })
    }
}
