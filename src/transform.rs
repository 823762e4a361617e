//! ECI to render-space conversion.
//!
//! The propagation model works in an inertial frame; the globe is Earth-fixed.
//! Conversion runs in a fixed order: sidereal angle for the instant, inertial
//! to geodetic, NaN rejection, then the shared spherical projection.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::helpers::modulus;
use crate::projection::geodetic_to_cartesian;
use crate::types::{Eci, Geodetic, RenderPosition, A, F};

///Greenwich Mean Sidereal Time in radians.
///Meeus' approach from celestrak https://celestrak.org/columns/v02n02/
pub fn sidereal_angle(time: DateTime<Utc>) -> f64 {
    let years = time.year() as f64 - 1.;
    let a = (years / 100.).trunc();
    let b = 2. - a + (a / 4.).trunc();
    let julian_year = (365.25 * years).trunc() + (30.6001_f64 * 14.).trunc() + 1720994.5 + b;
    let day = time.ordinal();
    let julian_day = julian_year + day as f64;
    let j2000_day = julian_day - 2451545.0;
    let offset = time.num_seconds_from_midnight() as f64 / 86400.;
    let t = j2000_day / 36525.0;
    let theta_0 = 24110.54841 + 8640184.812866 * t + 0.093104 * t * t
        - t * t * t * 6.2 * 10_f64.powf(-6.);
    let side_time = modulus(theta_0 + 1.00273790934 * offset * 86400., 86400.);
    2. * PI * side_time / 86400.
}

///Geodetic sub-point of an ECI position at a wall-clock instant. Latitude by
///iteration on the ellipsoid, longitude from the sidereal angle.
pub fn eci_to_geodetic(eci: &Eci, time: DateTime<Utc>) -> Geodetic {
    let sidereal = sidereal_angle(time);
    let lat_alt = get_lat_and_alt(eci);
    Geodetic {
        lat: lat_alt[0],
        lon: get_lon(eci, sidereal),
        alt: lat_alt[1],
    }
}

fn get_lat_and_alt(satellite: &Eci) -> [f64; 2] {
    let mut guess = (satellite.z).atan2((satellite.x.powf(2.) + satellite.y.powf(2.)).sqrt());
    let e2 = 2. * F - F * F;
    let mut c = 1. / (1. - e2 * guess.sin().powf(2.)).sqrt();
    let mut last_guess: f64 = 0.;
    let r = (satellite.x.powf(2.) + satellite.y.powf(2.)).sqrt();
    while (guess.to_degrees() - last_guess.to_degrees()).abs() > 0.00001 {
        last_guess = guess;
        c = 1. / ((1. - e2 * last_guess.sin().powf(2.)).sqrt());
        guess = (satellite.z + A * c * e2 * last_guess.sin()).atan2(r);
    }
    let alt = (r / guess.cos()) - A * c;
    [guess.to_degrees(), alt]
}

fn get_lon(satellite: &Eci, sidereal_angle: f64) -> f64 {
    let angle = ((satellite.y.atan2(satellite.x)) - sidereal_angle).to_degrees() + 180.;
    modulus(angle, 360.) - 180.
}

///Full pipeline for one body on one tick. `None` means no position for this
///instant; the caller keeps the previous one.
pub fn eci_to_render_position(
    eci: &Eci,
    time: DateTime<Utc>,
    radius: f64,
) -> Option<RenderPosition> {
    let geodetic = eci_to_geodetic(eci, time);
    if geodetic.lat.is_nan() || geodetic.lon.is_nan() {
        return None;
    }
    Some(geodetic_to_cartesian(geodetic.lat, geodetic.lon, radius))
}
