//! Precession of the equator and the mean obliquity of the ecliptic
//!
//! Uses the IAU 1976 (Lieske) equatorial precession angles ζ, z and θ,
//! which pair with the IAU 1980 mean obliquity. The angles are polynomials
//! in Julian centuries of TT measured from J2000.0.
//!
//! Source: Lieske et al. 1977, A&A 58, 1-16; Meeus, *Astronomical
//! Algorithms*, chapter 21.

use crate::constants::ASEC2RAD;
use crate::framelib::{rot_y, rot_z};
use crate::time::Epoch;
use nalgebra::Matrix3;

/// Equatorial precession angles `(ζ, z, θ)` in radians from J2000.0 to
/// `t` Julian centuries (TT) after it.
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let zeta = (2306.2181 + (0.30188 + 0.017998 * t) * t) * t;
    let z = (2306.2181 + (1.09468 + 0.018203 * t) * t) * t;
    let theta = (2004.3109 + (-0.42665 - 0.041833 * t) * t) * t;
    (zeta * ASEC2RAD, z * ASEC2RAD, theta * ASEC2RAD)
}

/// Rotation from the mean equator and equinox of J2000.0 to the mean
/// equator and equinox of `t` Julian centuries (TT) after J2000.0.
///
/// `P = R3(-z) · R2(θ) · R3(-ζ)`
pub fn precession_matrix(t: f64) -> Matrix3<f64> {
    let (zeta, z, theta) = precession_angles(t);
    rot_z(-z) * rot_y(theta) * rot_z(-zeta)
}

/// Rotation from the mean equator and equinox of `from` to that of `to`
pub fn precession_between(from: &Epoch, to: &Epoch) -> Matrix3<f64> {
    let to_date = precession_matrix(to.julian_centuries());
    let from_date = precession_matrix(from.julian_centuries());
    to_date * from_date.transpose()
}

/// IAU 1980 mean obliquity of the ecliptic in radians
///
/// At J2000.0: ε₀ = 84381.448″ ≈ 23°26′21.448″
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = 84381.448 + (-46.8150 + (-0.00059 + 0.001813 * t) * t) * t;
    arcsec * ASEC2RAD
}
