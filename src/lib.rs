//! Extraction of one complete orbit per body from JPL Horizons vector tables, written as
//! compact records for an orbit renderer.
pub mod apsis_detector;
pub mod batch;
pub mod body_config;
pub mod constants;
pub mod extraction_params;
pub mod orbit_builder;
pub mod orbit_record;
pub mod orbit_segment;
pub mod orbitbuild_errors;
pub mod placement;
#[cfg(feature = "progress")]
mod progress_bar;
pub mod vector_table;

pub use extraction_params::ExtractionParams;
pub use orbit_builder::{build_orbit, build_orbit_from_path, extract_and_write};
pub use orbit_record::OrbitRecord;
pub use orbitbuild_errors::OrbitBuildError;
