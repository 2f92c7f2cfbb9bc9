pub mod angle;
pub mod cartesian;

pub use angle::Angle;
pub use cartesian::Cartesian3;

// Re-export the Equatorial coordinate system from framelib
pub use crate::framelib::inertial::Equatorial;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framelib::inertial::InertialFrame;
    use std::f64::consts::PI;

    #[test]
    fn test_equatorial_conversions() {
        let coord = Equatorial::from_degrees(41.05, 49.2283);

        assert!((coord.ra_degrees() - 41.05).abs() < 1e-12);
        assert!((coord.dec_degrees() - 49.2283).abs() < 1e-12);

        let cart = coord.to_cartesian();
        assert!((cart.magnitude() - 1.0).abs() < 1e-15);
        let back = Equatorial::from_cartesian(cart);
        assert!((back.ra - coord.ra).abs() < 1e-14);
        assert!((back.dec - coord.dec).abs() < 1e-14);
    }

    #[test]
    fn test_angular_distance() {
        let p1 = Equatorial::new(1.0, 0.5);
        assert!(p1.angle_between(&p1).abs() < 1e-10);

        // Polaris to Vega is about 51 degrees
        let polaris = Equatorial::new(37.95 * PI / 180.0, 89.26 * PI / 180.0);
        let vega = Equatorial::new(279.23 * PI / 180.0, 38.78 * PI / 180.0);
        let dist_deg = polaris.angular_distance(&vega) * 180.0 / PI;
        assert!((dist_deg - 51.0).abs() < 1.0);
    }
}
