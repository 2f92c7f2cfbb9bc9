//! Equinoctial coordinates and the observer-frame corrections
//!
//! An [`EquinoctialCoordinate`] is a right ascension and declination bound to
//! an epoch: the equator and equinox it is referred to, and the set of
//! corrections that produced it. [`EquinoctialCorrector`] is the seam between
//! the star's own motion and the observer-frame effects; the crate ships
//! [`ApparentPlaceCorrector`], which applies precession, nutation and annual
//! aberration in that order.

use crate::aberration::{apply_annual_aberration, earth_velocity};
use crate::coordinates::{Angle, Cartesian3, Equatorial};
use crate::framelib::inertial::InertialFrame;
use crate::nutationlib::Nutation;
use crate::precessionlib::{mean_obliquity, precession_matrix};
use crate::time::Epoch;
use crate::{FixedStarError, Result};
use log::trace;
use serde::Serialize;
use std::fmt;

/// Which optional corrections to apply on top of precession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CorrectionOptions {
    pub with_annual_aberration: bool,
    pub with_nutation: bool,
}

impl Default for CorrectionOptions {
    /// Everything on: the apparent place
    fn default() -> Self {
        CorrectionOptions {
            with_annual_aberration: true,
            with_nutation: true,
        }
    }
}

impl CorrectionOptions {
    /// Precession only: the mean place of date
    pub fn none() -> Self {
        CorrectionOptions {
            with_annual_aberration: false,
            with_nutation: false,
        }
    }

    pub fn with_annual_aberration(mut self, enabled: bool) -> Self {
        self.with_annual_aberration = enabled;
        self
    }

    pub fn with_nutation(mut self, enabled: bool) -> Self {
        self.with_nutation = enabled;
        self
    }
}

/// Right ascension and declination referred to the equator and equinox of an epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquinoctialCoordinate {
    ra: Angle,
    dec: Angle,
    epoch: Epoch,
    options: CorrectionOptions,
}

impl EquinoctialCoordinate {
    /// Build a coordinate from a direction already referred to `epoch`
    pub fn new(direction: Equatorial, epoch: Epoch, options: CorrectionOptions) -> Self {
        EquinoctialCoordinate {
            ra: Angle::from_radians(direction.ra),
            dec: Angle::from_radians(direction.dec),
            epoch,
            options,
        }
    }

    pub fn ra(&self) -> Angle {
        self.ra
    }

    pub fn dec(&self) -> Angle {
        self.dec
    }

    /// The epoch whose equator and equinox this coordinate is referred to
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// The corrections that were applied to produce this coordinate
    pub fn options(&self) -> CorrectionOptions {
        self.options
    }

    pub fn to_equatorial(&self) -> Equatorial {
        Equatorial::new(self.ra.to_radians(), self.dec.to_radians())
    }

    pub fn to_cartesian(&self) -> Cartesian3 {
        self.to_equatorial().to_cartesian()
    }
}

impl fmt::Display for EquinoctialCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.ra.format_hms(3),
            self.dec.format_dms(2)
        )
    }
}

/// Applies observer-frame corrections to a J2000.0 mean direction
pub trait EquinoctialCorrector {
    /// Refer `mean` (mean equator and equinox of J2000.0) to `epoch`, applying
    /// precession and whichever of nutation and annual aberration `options`
    /// asks for.
    fn apply(
        &self,
        mean: &Equatorial,
        epoch: &Epoch,
        options: CorrectionOptions,
    ) -> Result<EquinoctialCoordinate>;
}

/// IAU 1976 precession, IAU 2000B nutation and first-order annual aberration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApparentPlaceCorrector;

impl ApparentPlaceCorrector {
    pub fn new() -> Self {
        ApparentPlaceCorrector
    }
}

fn ensure_finite(stage: &str, v: &Cartesian3) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FixedStarError::CorrectionFailure(format!(
            "non-finite direction after {}",
            stage
        )))
    }
}

impl EquinoctialCorrector for ApparentPlaceCorrector {
    fn apply(
        &self,
        mean: &Equatorial,
        epoch: &Epoch,
        options: CorrectionOptions,
    ) -> Result<EquinoctialCoordinate> {
        let t = epoch.julian_centuries();
        let mut p = mean.to_cartesian();
        ensure_finite("input", &p)?;

        p = p.rotate(&precession_matrix(t));
        ensure_finite("precession", &p)?;
        trace!("mean place of date: {:?}", Equatorial::from_cartesian(p));

        let obliquity = if options.with_nutation {
            let nutation = Nutation::at(t);
            p = p.rotate(&nutation.matrix());
            ensure_finite("nutation", &p)?;
            trace!(
                "nutation dpsi={:.4}\" deps={:.4}\"",
                nutation.delta_psi.to_degrees() * 3600.0,
                nutation.delta_eps.to_degrees() * 3600.0
            );
            nutation.true_obliquity()
        } else {
            mean_obliquity(t)
        };

        if options.with_annual_aberration {
            p = apply_annual_aberration(p, earth_velocity(t, obliquity)).ok_or_else(|| {
                FixedStarError::CorrectionFailure(
                    "aberration collapsed the direction vector".to_string(),
                )
            })?;
            ensure_finite("annual aberration", &p)?;
        }

        let direction = Equatorial::from_cartesian(p);
        trace!("corrected place: {:?}", direction);
        Ok(EquinoctialCoordinate::new(direction, *epoch, options))
    }
}
