mod trefoil;

pub use trefoil::{CurveSample, TrefoilKnot};

use crate::math::{Point3, Vector3};

use super::frame::Frame;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns the parameter at `i / count` of the way through the domain.
    ///
    /// With `i` in `0..count` this samples the half-open range
    /// `[t_min, t_max)` evenly, which is what closed curves need to avoid a
    /// duplicated seam sample.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform(&self, i: usize, count: usize) -> f64 {
        if count == 0 {
            return self.t_min;
        }
        self.t_min + (self.t_max - self.t_min) * (i as f64 / count as f64)
    }
}

/// Trait for parametric curves in 3D space.
///
/// Evaluation is total: implementations resolve degenerate points with
/// fallbacks rather than returning errors.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Computes the unit tangent vector at parameter `t`.
    fn tangent(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Computes the local frame at parameter `t`.
    fn frame(&self, t: f64) -> Frame {
        Frame::from_tangent(self.tangent(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn uniform_is_half_open() {
        let d = CurveDomain::new(0.0, TAU);
        assert!(d.uniform(0, 4).abs() < f64::EPSILON);
        assert!((d.uniform(2, 4) - TAU / 2.0).abs() < 1e-12);
        assert!(d.uniform(3, 4) < TAU);
    }

    #[test]
    fn uniform_with_zero_count_is_start() {
        let d = CurveDomain::new(1.0, 2.0);
        assert!((d.uniform(5, 0) - 1.0).abs() < f64::EPSILON);
    }
}
