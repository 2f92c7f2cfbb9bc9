//! # Cartesian Direction Vectors
//!
//! `Cartesian3` is the intermediate representation used by every reduction
//! step in this crate. A star's catalog direction is turned into a vector,
//! moved along its space velocity, rotated by the precession and nutation
//! matrices, displaced by the aberration vector and finally turned back into
//! right ascension and declination.
//!
//! ## Coordinate System Convention
//!
//! - **X-axis**: Points toward the equinox (RA = 0°, Dec = 0°)
//! - **Y-axis**: Points toward RA = 90°, Dec = 0°
//! - **Z-axis**: Points toward the north celestial pole (Dec = +90°)
//!
//! ## Examples
//!
//! ```rust
//! use fixedstar::coordinates::cartesian::Cartesian3;
//!
//! let equinox = Cartesian3::new(1.0, 0.0, 0.0);
//! let north_pole = Cartesian3::new(0.0, 0.0, 1.0);
//! assert_eq!(equinox.dot(&north_pole), 0.0);
//! ```

use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// Three-dimensional Cartesian vector
///
/// Used both for unit directions on the celestial sphere and for positions
/// and velocities expressed in units of a star's distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian3 {
    /// X-component (toward the equinox)
    pub x: f64,
    /// Y-component (toward RA = 90°)
    pub y: f64,
    /// Z-component (toward north celestial pole)
    pub z: f64,
}

impl Cartesian3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a vector from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `ra` - Right ascension in radians
    /// * `dec` - Declination in radians
    /// * `distance` - Length of the vector (1.0 for unit directions)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedstar::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let north_pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
    /// assert!((north_pole.x).abs() < 1e-15);
    /// assert!((north_pole.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_spherical(ra: f64, dec: f64, distance: f64) -> Self {
        let (sin_dec, cos_dec) = dec.sin_cos();
        let (sin_ra, cos_ra) = ra.sin_cos();
        Cartesian3 {
            x: distance * cos_dec * cos_ra,
            y: distance * cos_dec * sin_ra,
            z: distance * sin_dec,
        }
    }

    /// Converts to spherical coordinates
    ///
    /// Returns `(ra, dec, distance)` with right ascension in [0, 2π) and
    /// declination in [-π/2, π/2]. The declination is computed with `atan2`
    /// so that directions close to the poles keep full precision.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let r_xy = (self.x * self.x + self.y * self.y).sqrt();
        let dec = self.z.atan2(r_xy);
        let ra = if r_xy == 0.0 {
            0.0 // Arbitrary choice at poles
        } else {
            let mut ra = self.y.atan2(self.x);
            if ra < 0.0 {
                ra += 2.0 * PI;
            }
            // atan2 of a tiny negative y rounds up to exactly 2π
            if ra >= 2.0 * PI {
                ra -= 2.0 * PI;
            }
            ra
        };

        (ra, dec, distance)
    }

    /// Unit vectors pointing toward increasing right ascension and
    /// increasing declination at the given direction.
    ///
    /// These span the tangent plane in which proper motion is measured.
    pub fn tangent_basis(ra: f64, dec: f64) -> (Cartesian3, Cartesian3) {
        let (sin_ra, cos_ra) = ra.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        let east = Cartesian3::new(-sin_ra, cos_ra, 0.0);
        let north = Cartesian3::new(-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec);
        (east, north)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Angle between two vectors in radians, in [0, π]
    pub fn angular_distance(&self, other: &Cartesian3) -> f64 {
        // atan2(|a×b|, a·b) stays accurate for nearly parallel vectors,
        // which is the usual case when comparing reduced positions
        let cross = self.cross(other).magnitude();
        let dot = self.dot(other);
        if cross == 0.0 && dot == 0.0 {
            return 0.0;
        }
        cross.atan2(dot)
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Applies a rotation (or any linear map) to this vector
    pub fn rotate(&self, matrix: &Matrix3<f64>) -> Cartesian3 {
        Cartesian3::from_vector3(matrix * self.to_vector3())
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}
