//! # Extraction parameters
//!
//! [`ExtractionParams`] gathers the settings of one extraction run: the tolerance used to
//! find where the body is placed on its orbit, and the directory receiving the records.
//!
//! ```rust
//! use orbitbuild::extraction_params::ExtractionParams;
//!
//! let params = ExtractionParams::builder()
//!     .placement_tolerance(0.05)
//!     .output_dir("out/orbits")
//!     .build()
//!     .unwrap();
//! assert_eq!(params.output_dir, "out/orbits");
//! ```
use std::cmp::Ordering::Greater;

use camino::Utf8PathBuf;

use crate::{
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PLACEMENT_TOLERANCE},
    orbitbuild_errors::OrbitBuildError,
};

/// Settings of an extraction run.
///
/// Fields
/// -----------------
/// * `placement_tolerance` — Maximum `|Δx|` and `|Δy|` (AU) for a segment sample to be
///   considered at the same place as the reference sample. Default `0.1`.
/// * `output_dir` — Directory receiving `bin<body>.json`. Default `bin`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionParams {
    pub placement_tolerance: f64,
    pub output_dir: Utf8PathBuf,
}

impl ExtractionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ExtractionParamsBuilder`] starting from the defaults.
    pub fn builder() -> ExtractionParamsBuilder {
        ExtractionParamsBuilder::new()
    }
}

impl Default for ExtractionParams {
    fn default() -> Self {
        ExtractionParams {
            placement_tolerance: DEFAULT_PLACEMENT_TOLERANCE,
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Builder for [`ExtractionParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionParamsBuilder {
    params: ExtractionParams,
}

impl ExtractionParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ExtractionParams::default(),
        }
    }

    pub fn placement_tolerance(mut self, v: f64) -> Self {
        self.params.placement_tolerance = v;
        self
    }

    pub fn output_dir(mut self, v: impl Into<Utf8PathBuf>) -> Self {
        self.params.output_dir = v.into();
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `placement_tolerance > 0.0` (NaN rejected).
    /// * `output_dir` is not empty.
    pub fn build(self) -> Result<ExtractionParams, OrbitBuildError> {
        let p = &self.params;

        if p.placement_tolerance.partial_cmp(&0.0) != Some(Greater) {
            return Err(OrbitBuildError::InvalidExtractionParameter(
                "placement_tolerance must be > 0".into(),
            ));
        }
        if p.output_dir.as_str().is_empty() {
            return Err(OrbitBuildError::InvalidExtractionParameter(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(self.params)
    }
}
