//! Annual aberration
//!
//! The apparent direction of a star is displaced toward the apex of the
//! Earth's orbital motion by up to κ ≈ 20.5″. The Earth's velocity is taken
//! from a low-precision solar theory (the Sun's true longitude to about
//! 0.01°), which keeps the displacement accurate to a few milliarcseconds.
//! The eccentricity ("e-") terms of the orbit are included, as in the FK5
//! convention used for catalog mean places.
//!
//! Source: Meeus, *Astronomical Algorithms*, chapters 23 and 25.

use crate::constants::{ABERRATION_CONSTANT, ASEC2RAD};
use crate::coordinates::Cartesian3;
use crate::framelib::rot_x;

/// Mean anomaly of the Sun and its equation of the center, both in degrees
fn sun_anomaly_and_center(t: f64) -> (f64, f64) {
    let mean_anomaly = 357.52911 + (35999.05029 - 0.0001537 * t) * t;
    let m = mean_anomaly.to_radians();

    let center = (1.914602 - (0.004817 + 0.000014 * t) * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    (mean_anomaly, center)
}

/// Geometric true longitude of the Sun in radians, referred to the mean
/// equinox of date, `t` Julian centuries (TT) since J2000.0.
pub fn sun_true_longitude(t: f64) -> f64 {
    let mean_longitude = 280.46646 + (36000.76983 + 0.0003032 * t) * t;
    let (_, center) = sun_anomaly_and_center(t);

    (mean_longitude + center).rem_euclid(360.0).to_radians()
}

/// Sun-Earth distance in AU
pub fn sun_radius_vector(t: f64) -> f64 {
    let (mean_anomaly, center) = sun_anomaly_and_center(t);
    let true_anomaly = (mean_anomaly + center).to_radians();
    let e = earth_orbit_eccentricity(t);

    1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
}

/// Eccentricity of the Earth's orbit
pub fn earth_orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - (0.000042037 + 0.0000001267 * t) * t
}

/// Longitude of the perihelion of the Earth's orbit in radians
pub fn perihelion_longitude(t: f64) -> f64 {
    (102.93735 + (1.71946 + 0.00046 * t) * t).to_radians()
}

/// Earth's orbital velocity in units of the speed of light, in the
/// equatorial frame defined by `obliquity` (radians).
///
/// Pass the true obliquity to get the velocity in the true equator and
/// equinox of date, the mean obliquity for the mean frame.
pub fn earth_velocity(t: f64, obliquity: f64) -> Cartesian3 {
    let kappa = ABERRATION_CONSTANT * ASEC2RAD;
    let sun = sun_true_longitude(t);
    let e = earth_orbit_eccentricity(t);
    let perihelion = perihelion_longitude(t);

    // The Earth moves toward ecliptic longitude ☉ - 90°
    let ecliptic = Cartesian3::new(
        kappa * (sun.sin() - e * perihelion.sin()),
        kappa * (-sun.cos() + e * perihelion.cos()),
        0.0,
    );

    ecliptic.rotate(&rot_x(-obliquity))
}

/// Displaces a unit direction by the observer velocity `velocity` (units of c)
///
/// Returns `None` if the displaced vector degenerates to zero.
pub fn apply_annual_aberration(direction: Cartesian3, velocity: Cartesian3) -> Option<Cartesian3> {
    (direction + velocity).normalize()
}
