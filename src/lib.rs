//! Fixedstar: apparent places of fixed stars
//!
//! This crate reduces a star's catalog mean place at J2000.0 (right ascension,
//! declination, proper motion, parallax and radial velocity) to its apparent
//! equatorial position at an arbitrary epoch. The star's own space motion is
//! applied first, then annual parallax, precession, nutation and annual
//! aberration.
//!
//! ```rust
//! use fixedstar::{CatalogMeanPlace, Epoch, FixedStarPosition};
//!
//! let epoch = Epoch::tt(2462088.69).unwrap();
//! let position = FixedStarPosition::new(epoch);
//!
//! // theta Persei
//! let star = CatalogMeanPlace::new(41.0500, 49.2283, 0.089, 0.336, -0.089, 25.0).unwrap();
//! let apparent = position.get(&star).unwrap();
//! assert!((apparent.ra().to_degrees() - 41.5599646).abs() < 0.002);
//! ```

use thiserror::Error;

pub mod aberration;
pub mod constants;
pub mod coordinates;
pub mod equinoctial;
pub mod framelib;
pub mod nutationlib;
pub mod parallax;
pub mod position;
pub mod precessionlib;
pub mod reduction;
pub mod time;

// Re-export commonly used types
pub use coordinates::Equatorial;
pub use equinoctial::{
    ApparentPlaceCorrector, CorrectionOptions, EquinoctialCoordinate, EquinoctialCorrector,
};
pub use position::FixedStarPosition;
pub use reduction::{CatalogMeanPlace, ReductionModel, SpaceMotionReducer};
pub use time::{Epoch, Timescale};

/// Main error type for the fixedstar library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixedStarError {
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid catalog data for `{field}`: {reason}")]
    InvalidCatalogData { field: String, reason: String },

    #[error("Correction failure: {0}")]
    CorrectionFailure(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl FixedStarError {
    /// Shorthand for an [`FixedStarError::InvalidCatalogData`] error
    pub fn catalog(field: &str, reason: impl Into<String>) -> Self {
        FixedStarError::InvalidCatalogData {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for fixedstar operations
pub type Result<T> = std::result::Result<T, FixedStarError>;
