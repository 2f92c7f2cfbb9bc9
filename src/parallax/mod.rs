//! Annual parallax
//!
//! A catalog place is barycentric. Seen from the Earth, a star of parallax ϖ
//! is displaced away from the Earth's heliocentric position by up to ϖ. The
//! Earth's position comes from the same low-precision solar theory as the
//! aberration velocity, rotated into the J2000.0 mean equator so that it can
//! be applied to a direction before precession.
//!
//! Source: Meeus, *Astronomical Algorithms*, chapter 25; Explanatory
//! Supplement to the Astronomical Almanac, 3.25.

use crate::aberration::{sun_radius_vector, sun_true_longitude};
use crate::constants::ASEC2RAD;
use crate::coordinates::Cartesian3;
use crate::framelib::rot_x;
use crate::precessionlib::mean_obliquity;

/// Drift of the equinox of date from the J2000.0 equinox along the
/// ecliptic, degrees per Julian year
const EQUINOX_DRIFT_DEG_PER_YEAR: f64 = 0.01397;

/// Heliocentric position of the Earth in AU, J2000.0 mean equator and
/// equinox, `t` Julian centuries (TT) since J2000.0.
///
/// The Sun's ecliptic latitude (under 1.2″) is neglected.
pub fn earth_position(t: f64) -> Cartesian3 {
    let longitude = sun_true_longitude(t) - (EQUINOX_DRIFT_DEG_PER_YEAR * 100.0 * t).to_radians();
    let distance = sun_radius_vector(t);

    let ecliptic = Cartesian3::new(
        -distance * longitude.cos(),
        -distance * longitude.sin(),
        0.0,
    );
    ecliptic.rotate(&rot_x(-mean_obliquity(0.0)))
}

/// Moves a unit barycentric direction to the geocentric direction of a star
/// with parallax `parallax_arcsec`, for an Earth at `earth` (AU).
///
/// Returns `None` if the displaced vector degenerates to zero.
pub fn apply_annual_parallax(
    direction: Cartesian3,
    parallax_arcsec: f64,
    earth: Cartesian3,
) -> Option<Cartesian3> {
    (direction - earth * (parallax_arcsec * ASEC2RAD)).normalize()
}
