//! # Orbit record
//!
//! The artifact handed to the renderer: one complete orbit of a body with the metadata
//! needed to scale it and to place the body on it.
//!
//! ## Layout
//! -----------------
//! Fields are serialized in this order, which the renderer relies on:
//!
//! | field             | type            | meaning                                             |
//! |-------------------|-----------------|-----------------------------------------------------|
//! | `body_name`       | string          | target body, also the key of the output file        |
//! | `sample_interval` | integer         | minutes between two orbit points                    |
//! | `extremes`        | 4 floats        | `max_x`, `min_x`, `max_y`, `min_y` of the orbit (AU)|
//! | `placement_index` | integer         | point where the body is drawn first                 |
//! | `orbit_start_jd`  | float           | Julian date (TDB) of the first orbit point          |
//! | `orbit`           | array of floats | interleaved `x, y` of every orbit point (AU)        |
//!
//! The file is JSON, named `bin<body_name>.json`. Floats round-trip exactly.
use std::{fs, io::BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{JulianDate, OrbitCoords},
    orbit_segment::OrbitExtremes,
    orbitbuild_errors::OrbitBuildError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitRecord {
    pub body_name: String,
    pub sample_interval: u32,
    pub extremes: OrbitExtremes,
    pub placement_index: usize,
    pub orbit_start_jd: JulianDate,
    pub orbit: OrbitCoords,
}

impl OrbitRecord {
    /// Name of the file holding the record of `body_name`.
    pub fn file_name(body_name: &str) -> String {
        format!("bin{body_name}.json")
    }

    /// Number of `(x, y)` points of the orbit.
    pub fn point_count(&self) -> usize {
        self.orbit.len() / 2
    }

    /// `(x, y)` of the point the body is placed at.
    pub fn placement_point(&self) -> Option<(f64, f64)> {
        let i = 2 * self.placement_index;
        Some((*self.orbit.get(i)?, *self.orbit.get(i + 1)?))
    }

    /// Start of the orbit as an [`Epoch`] (Horizons vector tables are in TDB).
    pub fn orbit_start_epoch(&self) -> Epoch {
        Epoch::from_jde_tdb(self.orbit_start_jd)
    }

    /// Serialize the record into `dir`, creating the directory if needed.
    ///
    /// The record is encoded in memory first and written with a single call, so a failure
    /// never leaves a half-written record behind the encoding step.
    ///
    /// Return
    /// ----------
    /// * The path of the written file.
    pub fn write_to_dir(&self, dir: &Utf8Path) -> Result<Utf8PathBuf, OrbitBuildError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(&self.body_name));
        let encoded = serde_json::to_vec(self)?;
        fs::write(&path, encoded)?;
        Ok(path)
    }

    /// Load a record previously written by [`write_to_dir`](OrbitRecord::write_to_dir).
    pub fn read_from_file(path: &Utf8Path) -> Result<Self, OrbitBuildError> {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod orbit_record_test {
    use super::*;

    fn record() -> OrbitRecord {
        OrbitRecord {
            body_name: "Mars".into(),
            sample_interval: 1440,
            extremes: OrbitExtremes {
                max_x: 1.3907159042637195,
                min_x: -1.6663690880346218,
                max_y: 1.5118024066940125,
                min_y: -1.4519393012009013,
            },
            placement_index: 1,
            orbit_start_jd: 2457640.5,
            orbit: vec![
                1.3907159042637195,
                -0.1,
                0.1000000000000000055511151231257827,
                1.5118024066940125,
                -1.6663690880346218,
                -1.4519393012009013,
            ],
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(OrbitRecord::file_name("Mars"), "binMars.json");
    }

    #[test]
    fn test_accessors() {
        let record = record();
        assert_eq!(record.point_count(), 3);
        assert_eq!(record.placement_point(), Some((0.1, 1.5118024066940125)));
        approx::assert_abs_diff_eq!(
            record.orbit_start_epoch().to_jde_tdb_days(),
            record.orbit_start_jd,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_field_order() {
        let json = serde_json::to_string(&record()).unwrap();
        let keys = [
            "\"body_name\"",
            "\"sample_interval\"",
            "\"extremes\"",
            "\"max_x\"",
            "\"min_x\"",
            "\"max_y\"",
            "\"min_y\"",
            "\"placement_index\"",
            "\"orbit_start_jd\"",
            "\"orbit\"",
        ];
        let offsets: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let out = Utf8Path::from_path(dir.path()).unwrap().join("bin");

        let record = record();
        let path = record.write_to_dir(&out).unwrap();
        assert_eq!(path, out.join("binMars.json"));

        let loaded = OrbitRecord::read_from_file(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            OrbitRecord::read_from_file(Utf8Path::new("nowhere/binPluto.json")),
            Err(OrbitBuildError::IoError(_))
        ));
    }
}
