use thiserror::Error;

/// Line-level failures while reading a Horizons vector table.
///
/// Variants
/// -----------------
/// * `MissingStartOfEphemeris` – The header ended without a `$$$SOE` line.
/// * `MissingHeaderField` – A mandatory header token (body name, step size) is absent.
/// * `InvalidStepSize` – The `Step-size` line does not carry an integer; payload is the line.
/// * `TruncatedRecord` – The file ended in the middle of a 4-line record (or before `$$$EOE`).
/// * `InvalidJulianDate` – Line 1 of a record does not start with a float.
/// * `InvalidCoordinates` – Line 2 of a record does not hold exactly three coordinates.
/// * `InvalidDistance` – Line 4 carries an `LT=` prefix but no parsable `RG` value.
///
/// See also
/// ------------
/// * [`crate::vector_table::header_scanner::scan_header`] – Header checks.
/// * [`crate::vector_table::vector_record::decode_record`] – Record checks.
#[derive(Error, Debug, PartialEq)]
pub enum ParseVectorError {
    #[error("no $$$SOE marker found before the end of the header")]
    MissingStartOfEphemeris,
    #[error("missing header field: {0}")]
    MissingHeaderField(&'static str),
    #[error("invalid step size line: {0}")]
    InvalidStepSize(String),
    #[error("record truncated at byte {0}")]
    TruncatedRecord(u64),
    #[error("invalid julian date line: {0}")]
    InvalidJulianDate(String),
    #[error("invalid coordinates line: {0}")]
    InvalidCoordinates(String),
    #[error("invalid distance line: {0}")]
    InvalidDistance(String),
}

#[derive(Error, Debug)]
pub enum OrbitBuildError {
    #[error("Malformed vector table: {0}")]
    VectorTableFormat(#[from] ParseVectorError),

    #[error(
        "Not enough apsides to bound an orbit ({perihelia} perihelia, {aphelia} aphelia); the ephemeris must span 1.5+ orbits"
    )]
    InsufficientOrbitCoverage { perihelia: usize, aphelia: usize },

    #[error("No orbit sample within {tolerance} of the reference position")]
    NoPlacementCandidate { tolerance: f64 },

    #[error("Invalid extraction parameter: {0}")]
    InvalidExtractionParameter(String),

    #[error("Malformed body configuration line {line}: {content}")]
    MalformedConfigLine { line: usize, content: String },

    #[error("Body configuration parsing error: {0}")]
    ConfigParseError(#[from] csv::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Orbit record serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PartialEq for OrbitBuildError {
    fn eq(&self, other: &Self) -> bool {
        use OrbitBuildError::*;
        match (self, other) {
            (VectorTableFormat(a), VectorTableFormat(b)) => a == b,
            (
                InsufficientOrbitCoverage {
                    perihelia: p1,
                    aphelia: a1,
                },
                InsufficientOrbitCoverage {
                    perihelia: p2,
                    aphelia: a2,
                },
            ) => p1 == p2 && a1 == a2,
            (NoPlacementCandidate { tolerance: a }, NoPlacementCandidate { tolerance: b }) => {
                a == b
            }
            (InvalidExtractionParameter(a), InvalidExtractionParameter(b)) => a == b,
            (
                MalformedConfigLine {
                    line: l1,
                    content: c1,
                },
                MalformedConfigLine {
                    line: l2,
                    content: c2,
                },
            ) => l1 == l2 && c1 == c2,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,

            // not comparable: same variant is enough
            (ConfigParseError(_), ConfigParseError(_)) => true,
            (IoError(_), IoError(_)) => true,
            (SerializationError(_), SerializationError(_)) => true,

            _ => false,
        }
    }
}
