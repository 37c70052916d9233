//! # Body configuration list
//!
//! Line-oriented list of the bodies to process, shared with the renderer:
//!
//! ```text
//! # name : ephemeris file : color : relative size : other
//! Mercury:data/mercury.txt:gray:0.38:none
//! Saturn:data/saturn.txt:gold:9.45:ring
//! $
//! ```
//!
//! - lines starting with `#` are comments,
//! - a line starting with `$` ends the list (anything after it is ignored),
//! - every other non-blank line holds exactly five `:`-separated fields.
//!
//! Only the body name and the ephemeris path matter for orbit extraction; the other fields
//! are kept for the renderer.
use std::{fs::File, io::Read};

use camino::{Utf8Path, Utf8PathBuf};

use crate::orbitbuild_errors::OrbitBuildError;

const FIELD_COUNT: usize = 5;

/// One entry of the body configuration list.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub body_name: String,
    pub ephemeris_file: Utf8PathBuf,
    pub color: String,
    pub relative_size: f64,
    pub other: String,
}

/// Parse a body configuration list from any reader.
///
/// Errors
/// ----------
/// * [`OrbitBuildError::MalformedConfigLine`] for a line without five fields or with a
///   non-numeric relative size; `line` is 1-based.
/// * [`OrbitBuildError::ConfigParseError`] for read failures inside the CSV reader.
pub fn parse_body_config<R: Read>(input: R) -> Result<Vec<BodyConfig>, OrbitBuildError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut bodies = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.get(0).is_some_and(|field| field.starts_with('$')) {
            break;
        }

        let line = record.position().map_or(0, |p| p.line() as usize);
        let malformed = || OrbitBuildError::MalformedConfigLine {
            line,
            content: record.iter().collect::<Vec<_>>().join(":"),
        };
        if record.len() != FIELD_COUNT {
            return Err(malformed());
        }

        bodies.push(BodyConfig {
            body_name: record[0].to_string(),
            ephemeris_file: Utf8PathBuf::from(&record[1]),
            color: record[2].to_string(),
            relative_size: record[3].parse().map_err(|_| malformed())?,
            other: record[4].to_string(),
        });
    }

    Ok(bodies)
}

/// Read the body configuration list at `path`.
pub fn read_body_config(path: &Utf8Path) -> Result<Vec<BodyConfig>, OrbitBuildError> {
    parse_body_config(File::open(path)?)
}

#[cfg(test)]
mod body_config_test {
    use super::*;

    const CONFIG: &str = "\
# name:file:color:size:other
Mars:data/mars.txt:red: 0.53 :none

Saturn:data/saturn.txt:gold:9.45:ring
$ end of list
Pluto:data/pluto.txt:brown:0.18:none
";

    #[test]
    fn test_parse_body_config() {
        let bodies = parse_body_config(CONFIG.as_bytes()).unwrap();

        assert_eq!(bodies.len(), 2);
        assert_eq!(
            bodies[0],
            BodyConfig {
                body_name: "Mars".into(),
                ephemeris_file: "data/mars.txt".into(),
                color: "red".into(),
                relative_size: 0.53,
                other: "none".into(),
            }
        );
        assert_eq!(bodies[1].body_name, "Saturn");
        assert!(bodies[1].other.starts_with("ring"));
    }

    #[test]
    fn test_malformed_lines() {
        let missing_field = "Venus:data/venus.txt:yellow:0.95:none\nMars:data/mars.txt:red:0.53\n";
        assert_eq!(
            parse_body_config(missing_field.as_bytes()),
            Err(OrbitBuildError::MalformedConfigLine {
                line: 2,
                content: "Mars:data/mars.txt:red:0.53".into()
            })
        );

        let bad_size = "Mars:data/mars.txt:red:big:none\n";
        assert!(matches!(
            parse_body_config(bad_size.as_bytes()),
            Err(OrbitBuildError::MalformedConfigLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(parse_body_config("$\n".as_bytes()), Ok(vec![]));
        assert_eq!(parse_body_config("".as_bytes()), Ok(vec![]));
    }
}
