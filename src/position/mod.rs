//! Apparent place of a fixed star at a configured epoch
//!
//! [`FixedStarPosition`] holds an (epoch, model) pair and turns catalog mean
//! places into apparent equinoctial coordinates. The space-motion model picks
//! the reducer, which also applies annual parallax; the corrector then applies
//! precession, nutation and annual aberration for the same epoch.
//!
//! ```rust
//! use fixedstar::{CatalogMeanPlace, Epoch, FixedStarPosition, ReductionModel};
//!
//! let mut position = FixedStarPosition::from_strs("2462088.69", "tri").unwrap();
//! assert_eq!(position.model(), ReductionModel::Trigonometric);
//!
//! // Bad input is rejected without touching the configuration
//! assert!(position.set_model_str("abc").is_err());
//! assert_eq!(position.model(), ReductionModel::Trigonometric);
//!
//! position.set_epoch(Epoch::j2000());
//! let star = CatalogMeanPlace::new(41.05, 49.2283, 0.089, 0.336, -0.089, 25.0).unwrap();
//! let apparent = position.get(&star).unwrap();
//! assert_eq!(apparent.epoch(), Epoch::j2000());
//! ```

use crate::equinoctial::{
    ApparentPlaceCorrector, CorrectionOptions, EquinoctialCoordinate, EquinoctialCorrector,
};
use crate::reduction::{CatalogMeanPlace, ReductionModel, SpaceMotionReducer};
use crate::time::Epoch;
use crate::Result;
use log::{debug, trace};
use serde_json::Value;

/// Apparent place calculator for a fixed (epoch, model) configuration
///
/// Reconfiguration takes `&mut self`, so a shared calculator cannot change
/// under a concurrent `get`. Every setter validates its input before any
/// state changes.
#[derive(Debug)]
pub struct FixedStarPosition<C = ApparentPlaceCorrector> {
    epoch: Epoch,
    model: ReductionModel,
    reducer: Box<dyn SpaceMotionReducer>,
    corrector: C,
}

impl FixedStarPosition<ApparentPlaceCorrector> {
    /// A calculator for `epoch` using the dynamical model
    pub fn new(epoch: Epoch) -> Self {
        Self::with_model(epoch, ReductionModel::Dynamical)
    }

    pub fn with_model(epoch: Epoch, model: ReductionModel) -> Self {
        Self::with_corrector(epoch, model, ApparentPlaceCorrector)
    }

    /// Parses both settings, e.g. `("J2028.87", "dyn")`
    pub fn from_strs(epoch: &str, model: &str) -> Result<Self> {
        let epoch: Epoch = epoch.parse()?;
        let model: ReductionModel = model.parse()?;
        Ok(Self::with_model(epoch, model))
    }
}

impl<C: EquinoctialCorrector> FixedStarPosition<C> {
    /// A calculator that hands reduced directions to `corrector`
    pub fn with_corrector(epoch: Epoch, model: ReductionModel, corrector: C) -> Self {
        debug!("fixed star position at {} with model {}", epoch, model);
        FixedStarPosition {
            epoch,
            model,
            reducer: model.reducer(epoch),
            corrector,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Sets the observation epoch, keeping the current reducer
    pub fn set_epoch(&mut self, epoch: Epoch) {
        debug!("epoch set to {}", epoch);
        self.epoch = epoch;
        self.reducer.set_epoch(epoch);
    }

    /// Parses and sets the epoch; on error the configuration is unchanged
    pub fn set_epoch_str(&mut self, epoch: &str) -> Result<()> {
        let epoch: Epoch = epoch.parse()?;
        self.set_epoch(epoch);
        Ok(())
    }

    pub fn model(&self) -> ReductionModel {
        self.model
    }

    /// Selects the space-motion model
    ///
    /// Setting the model already in use keeps the existing reducer.
    pub fn set_model(&mut self, model: ReductionModel) {
        if model == self.model {
            debug!("model already {}, reducer kept", model);
            return;
        }
        debug!("model {} -> {}, reducer replaced", self.model, model);
        self.model = model;
        self.reducer = model.reducer(self.epoch);
    }

    /// Parses and sets the model (`"dyn"` or `"tri"`); on error the
    /// configuration is unchanged
    pub fn set_model_str(&mut self, model: &str) -> Result<()> {
        let model: ReductionModel = model.parse()?;
        self.set_model(model);
        Ok(())
    }

    /// The reducer currently in use
    pub fn reducer(&self) -> &dyn SpaceMotionReducer {
        self.reducer.as_ref()
    }

    pub fn corrector(&self) -> &C {
        &self.corrector
    }

    /// Apparent place of `star` at the configured epoch
    pub fn get(&self, star: &CatalogMeanPlace) -> Result<EquinoctialCoordinate> {
        let mean = self.reducer.geocentric_place(star)?;
        trace!(
            "geocentric mean place at epoch ({:.7}, {:.7})",
            mean.ra_degrees(),
            mean.dec_degrees()
        );

        let apparent = self
            .corrector
            .apply(&mean, &self.epoch, CorrectionOptions::default())?;
        trace!(
            "apparent place ({:.7}, {:.7})",
            apparent.ra().to_degrees(),
            apparent.dec().to_degrees()
        );
        Ok(apparent)
    }

    /// Like [`get`](Self::get), for a loosely typed JSON record with the
    /// fields `RA`, `Dec`, `parallax`, `PMRA`, `PMDec` and `radVel`
    pub fn get_value(&self, record: &Value) -> Result<EquinoctialCoordinate> {
        let star = CatalogMeanPlace::try_from(record)?;
        self.get(&star)
    }

    /// Apparent places of several stars; fails on the first bad record
    pub fn get_many(&self, stars: &[CatalogMeanPlace]) -> Result<Vec<EquinoctialCoordinate>> {
        stars.iter().map(|star| self.get(star)).collect()
    }
}
