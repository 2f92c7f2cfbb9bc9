//! Reference frames and the elementary rotations between them
//!
//! The precession and nutation matrices are products of rotations about the
//! coordinate axes. Following the convention of the Explanatory Supplement,
//! `rot_x(φ)`, `rot_y(φ)` and `rot_z(φ)` rotate the *reference frame* by a
//! positive angle φ, so a fixed direction appears to turn by -φ.

pub mod inertial;

use nalgebra::Matrix3;

/// Frame rotation about the x-axis by `angle` radians
pub fn rot_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Frame rotation about the y-axis by `angle` radians
pub fn rot_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Frame rotation about the z-axis by `angle` radians
pub fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Cartesian3;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_frame_rotation_sense() {
        // Turning the frame +90° about z carries the old y-axis onto the new x-axis
        let y_axis = Cartesian3::new(0.0, 1.0, 0.0);
        let v = y_axis.rotate(&rot_z(FRAC_PI_2));
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-15);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-15);

        let z_axis = Cartesian3::new(0.0, 0.0, 1.0);
        let v = z_axis.rotate(&rot_x(FRAC_PI_2));
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-15);

        let x_axis = Cartesian3::new(1.0, 0.0, 0.0);
        let v = x_axis.rotate(&rot_y(FRAC_PI_2));
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rotations_are_orthogonal() {
        for m in [rot_x(0.3), rot_y(-1.1), rot_z(2.5)] {
            let identity = m * m.transpose();
            assert_relative_eq!(identity, Matrix3::identity(), epsilon = 1e-15);
        }
    }
}
