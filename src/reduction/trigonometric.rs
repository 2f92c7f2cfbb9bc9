use super::{years_from_j2000, CatalogMeanPlace, ReductionModel, SpaceMotionReducer};
use crate::framelib::inertial::Equatorial;
use crate::time::Epoch;
use crate::Result;
use log::trace;
use std::f64::consts::FRAC_PI_2;

/// Below this cos δ the star sits on a pole and RA motion is undefined
const POLE_COS_DEC: f64 = 1e-12;

/// Largest rounding excess past ±π/2 that is clamped back onto the pole
const POLE_ROUNDING_RAD: f64 = 1e-12;

/// Proper motion added linearly to RA and Dec
///
/// `δ' = δ + μδ·Δt` and `α' = α + μα*·Δt / cos δ`. Radial velocity is not
/// used. A declination carried over a pole is folded back along the great
/// circle through both poles: every crossing moves the right ascension to
/// the opposite meridian, however many times the star goes around.
#[derive(Debug, Clone)]
pub struct TrigonometricReducer {
    epoch: Epoch,
    interval_years: f64,
}

impl TrigonometricReducer {
    pub fn new(epoch: Epoch) -> Self {
        TrigonometricReducer {
            interval_years: years_from_j2000(&epoch),
            epoch,
        }
    }
}

impl SpaceMotionReducer for TrigonometricReducer {
    fn model(&self) -> ReductionModel {
        ReductionModel::Trigonometric
    }

    fn epoch(&self) -> Epoch {
        self.epoch
    }

    fn set_epoch(&mut self, epoch: Epoch) {
        self.interval_years = years_from_j2000(&epoch);
        self.epoch = epoch;
    }

    fn interval_years(&self) -> f64 {
        self.interval_years
    }

    fn reduce(&self, star: &CatalogMeanPlace) -> Result<Equatorial> {
        star.validate()?;

        let dt = self.interval_years;
        let cos_dec = star.dec.to_radians().cos();

        let mut ra = star.ra;
        if cos_dec >= POLE_COS_DEC {
            ra += star.pm_ra / cos_dec * dt / 3600.0;
        }

        let (dec, flipped) = fold_declination(star.dec + star.pm_dec * dt / 3600.0);
        if flipped {
            ra += 180.0;
        }

        // 90° in radians can round just past π/2
        let mut dec = dec.to_radians();
        if dec.abs() > FRAC_PI_2 && dec.abs() - FRAC_PI_2 < POLE_ROUNDING_RAD {
            dec = dec.clamp(-FRAC_PI_2, FRAC_PI_2);
        }
        let direction = Equatorial::new(ra.to_radians(), dec);
        trace!(
            "tri: ({:.7}, {:.7}) -> ({:.7}, {:.7}) over {:.4} yr",
            star.ra,
            star.dec,
            direction.ra_degrees(),
            direction.dec_degrees(),
            dt
        );
        direction.ensure_in_range()?;
        Ok(direction)
    }
}

/// Folds a declination in degrees into [-90°, 90°], reporting whether the
/// star ends up on the opposite meridian
fn fold_declination(dec: f64) -> (f64, bool) {
    // Position along the meridian circle, 0° at the south pole
    let along = (dec + 90.0).rem_euclid(360.0);
    if along > 180.0 {
        (270.0 - along, true)
    } else {
        (along - 90.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedStarError;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_motion() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2010.0).unwrap());
        let star = CatalogMeanPlace::new(100.0, 60.0, 0.1, 0.36, -0.72, 30.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        // cos 60° = 0.5 doubles the RA rate
        assert_relative_eq!(moved.ra_degrees(), 100.0 + 0.72 * 10.0 / 3600.0, epsilon = 1e-10);
        assert_relative_eq!(moved.dec_degrees(), 60.0 - 0.72 * 10.0 / 3600.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ignores_radial_velocity() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2500.0).unwrap());
        let star = CatalogMeanPlace::new(10.0, 10.0, 0.5, 0.1, 0.1, 0.0).unwrap();
        let fast = CatalogMeanPlace {
            rad_vel: -400.0,
            ..star
        };
        assert_eq!(reducer.reduce(&star).unwrap(), reducer.reduce(&fast).unwrap());
    }

    #[test]
    fn test_wraps_right_ascension_backwards() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2100.0).unwrap());
        let star = CatalogMeanPlace::new(0.0001, 0.0, 0.0, -1.0, 0.0, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();
        assert_relative_eq!(moved.ra_degrees(), 360.0 + 0.0001 - 100.0 / 3600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reflects_over_north_pole() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2100.0).unwrap());
        let star = CatalogMeanPlace::new(30.0, 89.99, 0.0, 0.0, 1.0, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        assert_relative_eq!(moved.dec_degrees(), 90.0 - 64.0 / 3600.0, epsilon = 1e-9);
        assert_relative_eq!(moved.ra_degrees(), 210.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reflects_over_south_pole() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2100.0).unwrap());
        let star = CatalogMeanPlace::new(300.0, -89.99, 0.0, 0.0, -1.0, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        assert_relative_eq!(moved.dec_degrees(), -90.0 + 64.0 / 3600.0, epsilon = 1e-9);
        assert_relative_eq!(moved.ra_degrees(), 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_declination_wraps_past_both_poles() {
        // 10″/yr for 100 000 yr is 277.8°: over the south pole and back up
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(102_000.0).unwrap());
        let star = CatalogMeanPlace::new(10.0, 0.0, 0.0, 0.0, 10.0, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        assert_relative_eq!(moved.dec_degrees(), 1_000_000.0 / 3600.0 - 360.0, epsilon = 1e-8);
        assert_relative_eq!(moved.ra_degrees(), 10.0, epsilon = 1e-8);
    }

    #[test]
    fn test_declination_past_one_pole_far_out() {
        // 500 000″ = 138.9°, over the north pole only
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(52_000.0).unwrap());
        let star = CatalogMeanPlace::new(10.0, 0.0, 0.0, 0.0, 10.0, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        assert_relative_eq!(moved.dec_degrees(), 180.0 - 500_000.0 / 3600.0, epsilon = 1e-8);
        assert_relative_eq!(moved.ra_degrees(), 190.0, epsilon = 1e-8);
    }

    #[test]
    fn test_fold_declination() {
        assert_eq!(fold_declination(45.0), (45.0, false));
        assert_eq!(fold_declination(90.0), (90.0, false));
        assert_eq!(fold_declination(-90.0), (-90.0, false));
        assert_eq!(fold_declination(100.0), (80.0, true));
        assert_eq!(fold_declination(-100.0), (-80.0, true));
        assert_eq!(fold_declination(270.0), (-90.0, false));
        assert_eq!(fold_declination(370.0), (10.0, false));
        assert_eq!(fold_declination(-460.0), (-80.0, true));
    }

    #[test]
    fn test_star_on_the_pole_keeps_its_ra() {
        let reducer = TrigonometricReducer::new(Epoch::from_julian_year(2050.0).unwrap());
        let star = CatalogMeanPlace::new(45.0, 90.0, 0.0, 5.0, -0.5, 0.0).unwrap();
        let moved = reducer.reduce(&star).unwrap();

        assert!(moved.ra_degrees().is_finite());
        assert_relative_eq!(moved.ra_degrees(), 45.0, epsilon = 1e-12);
        assert_relative_eq!(moved.dec_degrees(), 90.0 - 25.0 / 3600.0, epsilon = 1e-10);
    }

    #[test]
    fn test_validates_before_reducing() {
        let reducer = TrigonometricReducer::new(Epoch::j2000());
        let star = CatalogMeanPlace {
            ra: 10.0,
            dec: -91.0,
            parallax: 0.0,
            pm_ra: 0.0,
            pm_dec: 0.0,
            rad_vel: 0.0,
        };
        assert!(matches!(
            reducer.reduce(&star),
            Err(FixedStarError::InvalidCatalogData { .. })
        ));
    }
}
