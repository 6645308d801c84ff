use super::{Vector3, TOLERANCE};

/// Spherical coordinates around the +Y axis.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuth measured
/// from +Z towards +X. This matches the orbit convention used by [`Camera`].
///
/// [`Camera`]: crate::render::Camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f64,
    /// Polar angle from +Y in radians.
    pub phi: f64,
    /// Azimuth from +Z in radians.
    pub theta: f64,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Spherical {
    /// Creates spherical coordinates.
    #[must_use]
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    /// Computes spherical coordinates of a cartesian offset.
    ///
    /// A zero vector maps to radius 0 with both angles 0.
    #[must_use]
    pub fn from_vector(v: &Vector3) -> Self {
        let radius = v.norm();
        if radius < TOLERANCE {
            return Self::new(0.0, 0.0, 0.0);
        }
        let theta = v.x.atan2(v.z);
        let phi = (v.y / radius).clamp(-1.0, 1.0).acos();
        Self { radius, phi, theta }
    }

    /// Converts to a cartesian vector.
    #[must_use]
    pub fn to_vector(&self) -> Vector3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keeps `phi` strictly inside `(0, pi)` so the Y axis is never reached.
    #[must_use]
    pub fn make_safe(mut self) -> Self {
        const EPS: f64 = 1e-6;
        self.phi = self.phi.clamp(EPS, std::f64::consts::PI - EPS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn equator_at_zero_azimuth_points_along_z() {
        let v = Spherical::new(5.0, FRAC_PI_2, 0.0).to_vector();
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn pole_points_along_y() {
        let v = Spherical::new(2.0, 0.0, 1.3).to_vector();
        assert_relative_eq!(v, Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn from_vector_inverts_to_vector() {
        let s = Spherical::new(3.0, 1.1, -0.7);
        let back = Spherical::from_vector(&s.to_vector());
        assert_relative_eq!(back.radius, 3.0, epsilon = 1e-12);
        assert_relative_eq!(back.phi, 1.1, epsilon = 1e-12);
        assert_relative_eq!(back.theta, -0.7, epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_is_origin() {
        let s = Spherical::from_vector(&Vector3::zeros());
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn make_safe_moves_off_the_pole() {
        let s = Spherical::new(1.0, 0.0, 0.0).make_safe();
        assert!(s.phi > 0.0);
    }
}
