use crate::math::{Vector3, TOLERANCE};

/// Reference "up" direction used to orient cross-sections.
pub const UP: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// Reference used when the tangent is parallel to [`UP`].
pub const SECONDARY_UP: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// An orthonormal frame at a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Unit direction along the curve.
    pub tangent: Vector3,
    /// Unit direction perpendicular to the tangent.
    pub normal: Vector3,
    /// `tangent x normal`.
    pub binormal: Vector3,
}

impl Frame {
    /// Builds a frame from a unit tangent against a fixed reference axis.
    ///
    /// `normal = normalize(UP x tangent)`, switching to [`SECONDARY_UP`] when
    /// the tangent is parallel to `UP`. Unlike a Frenet frame this does not
    /// flip at inflection points.
    #[must_use]
    pub fn from_tangent(tangent: Vector3) -> Self {
        let normal = UP
            .cross(&tangent)
            .try_normalize(TOLERANCE)
            .or_else(|| SECONDARY_UP.cross(&tangent).try_normalize(TOLERANCE))
            .unwrap_or_else(Vector3::x);
        let binormal = tangent.cross(&normal);
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Unit direction in the normal/binormal plane at `angle` from the normal.
    #[must_use]
    pub fn radial(&self, angle: f64) -> Vector3 {
        self.normal * angle.cos() + self.binormal * angle.sin()
    }
}
