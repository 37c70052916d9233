//! # Constants and type definitions for orbitbuild
//!
//! Markers of the Horizons vector-table layout, default extraction settings, and the type
//! aliases shared by the parser, the apsis detector and the orbit record.

// -------------------------------------------------------------------------------------------------
// Vector table layout
// -------------------------------------------------------------------------------------------------

/// Line opening the block of data records
pub const START_OF_EPHEMERIS: &str = "$$$SOE";

/// Line closing the block of data records
pub const END_OF_EPHEMERIS: &str = "$$$EOE";

/// Index of the body name among the whitespace tokens of the second header line
/// (`Revised: Jul 31, 2013   Mars Barycenter ...`)
pub const BODY_NAME_TOKEN: usize = 4;

/// Coordinate tokens are longer than this; shorter tokens are the `X`, `Y`, `Z` labels
pub const MIN_COORD_TOKEN_LEN: usize = 6;

/// Second character of the fourth record line when it carries `LT= .. RG= .. RR= ..`
pub const LIGHT_TIME_MARKER: char = 'L';

// -------------------------------------------------------------------------------------------------
// Extraction defaults
// -------------------------------------------------------------------------------------------------

/// Two orbit points closer than this on both x and y (AU) may be the same place
pub const DEFAULT_PLACEMENT_TOLERANCE: f64 = 1.0e-1;

/// Directory receiving the orbit records
pub const DEFAULT_OUTPUT_DIR: &str = "bin";

/// Default location of the body configuration list read by `orbitbatch`
pub const DEFAULT_BODY_CONFIG: &str = "config/planet_config";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian date (TDB for Horizons vector tables)
pub type JulianDate = f64;

/// Distance in astronomical units
pub type AstronomicalUnit = f64;

/// Byte offset of a record inside the ephemeris file
pub type StreamPosition = u64;

/// Interleaved `x, y` orbit coordinates as drawn by the renderer
pub type OrbitCoords = Vec<f64>;
