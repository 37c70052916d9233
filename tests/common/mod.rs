#![allow(dead_code)]

use std::{f64::consts::TAU, fmt::Write};

use approx::assert_abs_diff_eq;
use orbitbuild::OrbitRecord;

/// Samples per revolution of [`ellipse_orbit`].
pub const SAMPLES_PER_ORBIT: usize = 48;

pub const FIRST_JD: f64 = 2457023.5;

/// Horizons float layout: `1.309801081200231E+00`.
pub fn sci(value: f64) -> String {
    let formatted = format!("{value:.15E}");
    let (mantissa, exponent) = formatted.split_once('E').unwrap();
    let exponent: i32 = exponent.parse().unwrap();
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.abs())
}

/// `= 1.3E+00` or `=-1.3E+00`, the sign abutting the equal sign.
fn field(label: &str, value: f64) -> String {
    if value < 0.0 {
        format!("{label}={}", sci(value))
    } else {
        format!("{label}= {}", sci(value))
    }
}

/// Render a Horizons vector table (Jul 31, 2013 layout) of `positions`, one sample per day.
///
/// With `with_distance = false` the fourth line of every record carries bare numbers, without
/// the `LT=` labels, and the reader must fall back to the norm of the position.
pub fn vector_table(body: &str, positions: &[[f64; 3]], with_distance: bool) -> String {
    let mut table = String::new();
    let stars = "*".repeat(79);
    writeln!(table, "{stars}").unwrap();
    writeln!(
        table,
        " Revised: Jul 31, 2013             {body} Barycenter                          4"
    )
    .unwrap();
    writeln!(table, "{stars}").unwrap();
    writeln!(
        table,
        "Target body name: {body} Barycenter (4)             {{source: DE431mx}}"
    )
    .unwrap();
    writeln!(table, "Center body name: Sun (10)                        {{source: DE431mx}}").unwrap();
    writeln!(table, "Start time      : A.D. 2015-Jan-01 00:00:00.0000 TDB").unwrap();
    writeln!(table, "Stop  time      : A.D. 2018-Jan-25 00:00:00.0000 TDB").unwrap();
    writeln!(table, "Step-size       : 1440 minutes").unwrap();
    writeln!(table, "{stars}").unwrap();
    writeln!(table, "$$$SOE").unwrap();

    for (day, &[x, y, z]) in positions.iter().enumerate() {
        let jd = FIRST_JD + day as f64;
        let range = (x * x + y * y + z * z).sqrt();
        writeln!(table, "{jd:.9} = A.D. 2015-Jan-01 00:00:00.0000 TDB").unwrap();
        writeln!(
            table,
            " {} {} {}",
            field("X ", x),
            field("Y ", y),
            field("Z ", z)
        )
        .unwrap();
        writeln!(
            table,
            " {} {} {}",
            field("VX", -y * 1e-2),
            field("VY", x * 1e-2),
            field("VZ", 0.0)
        )
        .unwrap();
        if with_distance {
            writeln!(
                table,
                " {} {} {}",
                field("LT", range * 5.775e-3),
                field("RG", range),
                field("RR", 0.0)
            )
            .unwrap();
        } else {
            writeln!(
                table,
                "  {}  {}  {}",
                sci(range * 5.775e-3),
                sci(range),
                sci(0.0)
            )
            .unwrap();
        }
    }

    writeln!(table, "$$$EOE").unwrap();
    writeln!(table, "{stars}").unwrap();
    writeln!(table, "Coordinate system description:").unwrap();
    writeln!(table, "  Ecliptic and Mean Equinox of Reference Epoch").unwrap();
    writeln!(table, "{stars}").unwrap();
    table
}

/// `count` positions on a slightly inclined Mars-like ellipse, [`SAMPLES_PER_ORBIT`] per
/// revolution, starting just past perihelion.
pub fn ellipse_orbit(count: usize) -> Vec<[f64; 3]> {
    let (a, e) = (1.52, 0.093);
    (0..count)
        .map(|k| {
            let theta = 0.1 + k as f64 * TAU / SAMPLES_PER_ORBIT as f64;
            let r = a * (1.0 - e * e) / (1.0 + e * theta.cos());
            [r * theta.cos(), r * theta.sin(), 0.05 * r * theta.sin()]
        })
        .collect()
}

/// Five samples on the x axis with distances `1.52, 1.50, 1.48, 1.50, 1.52`.
pub fn mars_table() -> String {
    let positions: Vec<[f64; 3]> = [1.52, 1.50, 1.48, 1.50, 1.52]
        .iter()
        .map(|&r| [r, 0.0, 0.0])
        .collect();
    vector_table("Mars", &positions, true)
}

/// Check the invariants every orbit record must hold.
pub fn assert_record_consistent(record: &OrbitRecord) {
    assert_eq!(record.orbit.len() % 2, 0);
    assert!(record.placement_index < record.point_count());

    let ext = record.extremes;
    for point in record.orbit.chunks(2) {
        assert!(ext.min_x <= point[0] && point[0] <= ext.max_x);
        assert!(ext.min_y <= point[1] && point[1] <= ext.max_y);
    }
    assert_abs_diff_eq!(
        record.orbit_start_epoch().to_jde_tdb_days(),
        record.orbit_start_jd,
        epsilon = 1e-6
    );
}
