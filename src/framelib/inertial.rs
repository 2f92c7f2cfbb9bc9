use crate::coordinates::cartesian::Cartesian3;
use crate::{FixedStarError, Result};
use std::f64::consts::{FRAC_PI_2, PI};

// Marker trait for inertial coordinate systems
pub trait InertialFrame: Sized {
    fn to_cartesian(&self) -> Cartesian3;
    fn from_cartesian(cart: Cartesian3) -> Self;

    fn angle_between(&self, other: &Self) -> f64 {
        self.to_cartesian().angular_distance(&other.to_cartesian())
    }
}

// Equatorial coordinates (RA/Dec)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Equatorial {
    pub ra: f64,  // Right ascension in radians
    pub dec: f64, // Declination in radians
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        let mut normalized_ra = ra.rem_euclid(2.0 * PI);
        // rem_euclid of a tiny negative value rounds to exactly 2π
        if normalized_ra >= 2.0 * PI {
            normalized_ra = 0.0;
        }
        Equatorial {
            ra: normalized_ra,
            dec,
        }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    /// Get right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    /// Get declination in degrees
    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }

    /// Calculate angular distance to another Equatorial coordinate in radians
    pub fn angular_distance(&self, other: &Equatorial) -> f64 {
        self.angle_between(other)
    }

    /// Checks that this direction lies on the celestial sphere proper:
    /// RA in [0, 2π) and Dec in [-π/2, π/2].
    ///
    /// A direction failing this check was produced by a broken reduction,
    /// so it is reported rather than wrapped into range.
    pub fn ensure_in_range(&self) -> Result<()> {
        if !self.ra.is_finite() || !self.dec.is_finite() {
            return Err(FixedStarError::CalculationError(format!(
                "non-finite direction (ra={}, dec={})",
                self.ra, self.dec
            )));
        }
        if !(0.0..2.0 * PI).contains(&self.ra) {
            return Err(FixedStarError::CalculationError(format!(
                "right ascension {} rad outside [0, 2π)",
                self.ra
            )));
        }
        if self.dec.abs() > FRAC_PI_2 {
            return Err(FixedStarError::CalculationError(format!(
                "declination {} rad outside [-π/2, π/2]",
                self.dec
            )));
        }
        Ok(())
    }
}

impl InertialFrame for Equatorial {
    fn to_cartesian(&self) -> Cartesian3 {
        Cartesian3::from_spherical(self.ra, self.dec, 1.0)
    }

    fn from_cartesian(cart: Cartesian3) -> Self {
        let (ra, dec, _) = cart.to_spherical();
        Equatorial::new(ra, dec)
    }
}
