use super::{years_from_j2000, CatalogMeanPlace, ReductionModel, SpaceMotionReducer};
use crate::constants::{ASEC2RAD, AU_PER_YEAR_KMS};
use crate::coordinates::Cartesian3;
use crate::framelib::inertial::{Equatorial, InertialFrame};
use crate::time::Epoch;
use crate::{FixedStarError, Result};
use log::trace;

/// Straight-line space motion
///
/// The star's space velocity is built in units of its own distance per
/// Julian year: the two proper motion components along the tangent plane
/// plus the radial component `ϖ·vr / 4.74047`. The position `p + v·Δt` is
/// then converted back to a direction. A zero parallax places the star at
/// infinity, so radial velocity has no effect.
#[derive(Debug, Clone)]
pub struct DynamicalReducer {
    epoch: Epoch,
    interval_years: f64,
}

impl DynamicalReducer {
    pub fn new(epoch: Epoch) -> Self {
        DynamicalReducer {
            interval_years: years_from_j2000(&epoch),
            epoch,
        }
    }

    /// Space velocity of the star in units of its distance per Julian year
    pub fn space_velocity(star: &CatalogMeanPlace) -> Cartesian3 {
        let ra = star.ra.to_radians();
        let dec = star.dec.to_radians();
        let position = Cartesian3::from_spherical(ra, dec, 1.0);
        let (east, north) = Cartesian3::tangent_basis(ra, dec);

        // ϖ in arcsec and vr in km/s; 1 AU/yr = 4.74047 km/s
        let radial = star.parallax * star.rad_vel / AU_PER_YEAR_KMS;

        east * (star.pm_ra * ASEC2RAD)
            + north * (star.pm_dec * ASEC2RAD)
            + position * (radial * ASEC2RAD)
    }
}

impl SpaceMotionReducer for DynamicalReducer {
    fn model(&self) -> ReductionModel {
        ReductionModel::Dynamical
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

        let position = star.direction().to_cartesian();
        let moved = position + Self::space_velocity(star) * self.interval_years;
        if moved.magnitude() == 0.0 {
            return Err(FixedStarError::CalculationError(
                "star reached the observer".to_string(),
            ));
        }

        let direction = Equatorial::from_cartesian(moved);
        trace!(
            "dyn: ({:.7}, {:.7}) -> ({:.7}, {:.7}) over {:.4} yr",
            star.ra,
            star.dec,
            direction.ra_degrees(),
            direction.dec_degrees(),
            self.interval_years
        );
        direction.ensure_in_range()?;
        Ok(direction)
    }
}
