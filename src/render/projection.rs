use crate::math::{Point2, Point3, Vector3};

/// Depth coefficient of the perspective divide.
pub const PERSPECTIVE_K: f64 = 0.1;

/// Lower bound of `1 + z * k`, so points behind the eye do not blow up.
const MIN_DEPTH_SCALE: f64 = 1e-3;

/// Fraction of the smaller surface dimension mapped to one world unit.
const VIEW_SCALE_DIVISOR: f64 = 8.0;

/// Rotates a point about Y by `rotation.y`, then about X by `rotation.x`.
///
/// The order is fixed; swapping it changes the output for any rotation that
/// is non-zero on both axes. `rotation.z` is not applied.
#[must_use]
pub fn rotate_y_then_x(point: &Point3, rotation: &Vector3) -> Point3 {
    let (sin_y, cos_y) = rotation.y.sin_cos();
    let (sin_x, cos_x) = rotation.x.sin_cos();

    let x = point.x * cos_y - point.z * sin_y;
    let z = point.x * sin_y + point.z * cos_y;

    let y = point.y * cos_x - z * sin_x;
    let z = point.y * sin_x + z * cos_x;

    Point3::new(x, y, z)
}

/// Maps rotated 3D points onto a 2D surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Surface center in pixels.
    pub center: Point2,
    /// Pixels per world unit at depth zero.
    pub view_scale: f64,
}

impl ViewTransform {
    /// Builds the transform for a surface of the given size.
    ///
    /// `view_scale = min(width, height) / 8 * zoom`.
    #[must_use]
    pub fn for_surface(width: u32, height: u32, zoom: f64) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            center: Point2::new(w / 2.0, h / 2.0),
            view_scale: w.min(h) / VIEW_SCALE_DIVISOR * zoom,
        }
    }

    /// Perspective factor `1 / (1 + z * k)`.
    #[must_use]
    pub fn depth_scale(z: f64) -> f64 {
        1.0 / (1.0 + z * PERSPECTIVE_K).max(MIN_DEPTH_SCALE)
    }

    /// Projects a point that is already rotated into view space.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let s = self.view_scale * Self::depth_scale(point.z);
        Point2::new(self.center.x + point.x * s, self.center.y + point.y * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_rotation_is_identity() {
        let p = Point3::new(1.0, -2.0, 3.0);
        assert_eq!(rotate_y_then_x(&p, &Vector3::zeros()), p);
    }

    #[test]
    fn quarter_turn_about_y() {
        let p = rotate_y_then_x(&Point3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, FRAC_PI_2, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn y_is_applied_before_x() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let rotation = Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0);
        let rotated = rotate_y_then_x(&p, &rotation);
        // Y first carries +X to +Z, X then carries +Z to -Y.
        assert_relative_eq!(rotated, Point3::new(0.0, -1.0, 0.0), epsilon = 1e-12);

        // X first would leave +X alone and Y would carry it to +Z.
        let x_only = rotate_y_then_x(&p, &Vector3::new(FRAC_PI_2, 0.0, 0.0));
        let x_then_y = rotate_y_then_x(&x_only, &Vector3::new(0.0, FRAC_PI_2, 0.0));
        assert_relative_eq!(x_then_y, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn screen_position_after_y_quarter_turn() {
        let view = ViewTransform::for_surface(800, 800, 1.0);
        let rotated = rotate_y_then_x(
            &Point3::new(1.0, 1.0, 0.0),
            &Vector3::new(0.0, FRAC_PI_2, 0.0),
        );
        // (1, 1, 0) -> (0, 1, 1); scale 100 * 1 / 1.1.
        let screen = view.project(&rotated);
        assert_relative_eq!(screen.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(screen.y, 400.0 + 100.0 / 1.1, epsilon = 1e-9);
    }

    #[test]
    fn view_scale_uses_smaller_side() {
        let view = ViewTransform::for_surface(1600, 800, 1.0);
        assert_relative_eq!(view.view_scale, 100.0);
        assert_eq!(view.center, Point2::new(800.0, 400.0));
        let zoomed = ViewTransform::for_surface(1600, 800, 2.0);
        assert_relative_eq!(zoomed.view_scale, 200.0);
    }

    #[test]
    fn perspective_shrinks_far_points() {
        assert_relative_eq!(ViewTransform::depth_scale(0.0), 1.0);
        assert!(ViewTransform::depth_scale(2.0) < 1.0);
        assert!(ViewTransform::depth_scale(-2.0) > 1.0);
    }

    #[test]
    fn perspective_is_bounded_behind_the_eye() {
        let s = ViewTransform::depth_scale(-50.0);
        assert!(s.is_finite());
        assert_relative_eq!(s, 1.0 / MIN_DEPTH_SCALE);
    }
}
