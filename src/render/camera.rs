use crate::math::{Point3, Spherical, Vector3};

/// Camera distance at which [`Camera::zoom_factor`] is 1.
pub const REFERENCE_DISTANCE: f64 = 5.0;

/// Closest the camera may get to its target.
pub const MIN_DISTANCE: f64 = 0.5;

/// Farthest the camera may get from its target.
pub const MAX_DISTANCE: f64 = 100.0;

/// A perspective camera orbiting a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Viewport width divided by height.
    pub aspect: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
    /// Eye position.
    pub position: Point3,
    /// Point the camera looks at.
    pub target: Point3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

impl Camera {
    /// Creates a camera at `(0, 0, REFERENCE_DISTANCE)` looking at the origin.
    #[must_use]
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Point3::new(0.0, 0.0, REFERENCE_DISTANCE),
            target: Point3::origin(),
        }
    }

    /// Points the camera at `target`.
    pub fn look_at(&mut self, target: Point3) {
        self.target = target;
    }

    /// Updates the aspect ratio from a viewport size. Zero heights are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = f64::from(width) / f64::from(height);
        }
    }

    /// Distance from the eye to the target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }

    /// Screen-space magnification relative to [`REFERENCE_DISTANCE`].
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        REFERENCE_DISTANCE / self.distance().max(MIN_DISTANCE)
    }

    /// Orbits the eye around the target.
    ///
    /// `delta_theta` turns around the world Y axis, `delta_phi` tilts towards
    /// or away from it. The polar angle never reaches the poles.
    pub fn orbit(&mut self, delta_theta: f64, delta_phi: f64) {
        let mut spherical = Spherical::from_vector(&self.offset());
        spherical.theta += delta_theta;
        spherical.phi += delta_phi;
        self.position = self.target + spherical.make_safe().to_vector();
    }

    /// Scales the eye distance by `factor`, clamped to
    /// `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub fn zoom(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let mut spherical = Spherical::from_vector(&self.offset());
        spherical.radius = (spherical.radius * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + spherical.to_vector();
    }

    fn offset(&self) -> Vector3 {
        let offset = self.position - self.target;
        if offset.norm() < MIN_DISTANCE {
            Vector3::new(0.0, 0.0, REFERENCE_DISTANCE)
        } else {
            offset
        }
    }
}
