use crate::geometry::frame::Frame;
use crate::geometry::params::{ShapeParameters, MIN_RADIUS};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Parameter offset used to step off a degenerate tangent.
const TANGENT_OFFSET: f64 = 1e-4;

/// A trefoil knot with a modulated tube radius.
///
/// With `m = magnitude`, `f = frequency`, `A = param_a`, `B = param_b`:
///
/// ```text
/// x = m * (sin(f t) + A sin(3 f t))
/// y = m * (cos(f t) - A cos(3 f t))
/// z = m * B * sin(2 f t)
/// ```
///
/// The domain is `[0, 2*pi)`. The curve only closes exactly for integer
/// frequencies, but it is always treated as closed when tessellated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrefoilKnot {
    params: ShapeParameters,
}

/// A point on the knot together with its frame and tube radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Curve parameter in `[0, 2*pi)`.
    pub t: f64,
    /// Position on the centerline.
    pub position: Point3,
    /// Local frame orienting the cross-section.
    pub frame: Frame,
    /// Modulated cross-section radius, never below [`MIN_RADIUS`].
    pub radius: f64,
}

impl TrefoilKnot {
    /// Creates a knot from shape parameters, clamping them into range.
    #[must_use]
    pub fn new(params: &ShapeParameters) -> Self {
        Self {
            params: params.sanitized(),
        }
    }

    /// Returns the sanitized parameters the knot evaluates with.
    #[must_use]
    pub fn params(&self) -> &ShapeParameters {
        &self.params
    }

    /// Analytic first derivative of the position with respect to `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        let ShapeParameters {
            magnitude: m,
            frequency: f,
            param_a: a,
            param_b: b,
            ..
        } = self.params;
        let ft = f * t;
        Vector3::new(
            m * f * (ft.cos() + 3.0 * a * (3.0 * ft).cos()),
            m * f * (-ft.sin() + 3.0 * a * (3.0 * ft).sin()),
            m * b * 2.0 * f * (2.0 * ft).cos(),
        )
    }

    /// Cross-section radius at `t`.
    ///
    /// `base + variation * base * sin(variation_frequency * t)`, floored at
    /// [`MIN_RADIUS`] so the tube never collapses or turns inside out.
    #[must_use]
    pub fn radius(&self, t: f64) -> f64 {
        let base = self.params.base_radius;
        let modulation = self.params.radius_variation
            * base
            * (self.params.variation_frequency * t).sin();
        (base + modulation).max(MIN_RADIUS)
    }

    /// Evaluates position, frame and radius at `t` in one go.
    #[must_use]
    pub fn sample(&self, t: f64) -> CurveSample {
        CurveSample {
            t,
            position: self.evaluate(t),
            frame: self.frame(t),
            radius: self.radius(t),
        }
    }
}

impl Curve for TrefoilKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let ShapeParameters {
            magnitude: m,
            frequency: f,
            param_a: a,
            param_b: b,
            ..
        } = self.params;
        let ft = f * t;
        Point3::new(
            m * (ft.sin() + a * (3.0 * ft).sin()),
            m * (ft.cos() - a * (3.0 * ft).cos()),
            m * b * (2.0 * ft).sin(),
        )
    }

    fn tangent(&self, t: f64) -> Vector3 {
        [t, t + TANGENT_OFFSET, t - TANGENT_OFFSET]
            .into_iter()
            .find_map(|t| self.derivative(t).try_normalize(TOLERANCE))
            .unwrap_or_else(Vector3::x)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn param_sets() -> Vec<ShapeParameters> {
        let d = ShapeParameters::default();
        vec![
            d,
            ShapeParameters {
                magnitude: 0.5,
                frequency: 2.0,
                param_a: 0.0,
                param_b: 2.5,
                ..d
            },
            ShapeParameters {
                magnitude: 5.0,
                frequency: 3.0,
                param_a: 2.5,
                param_b: 0.0,
                ..d
            },
            ShapeParameters {
                frequency: 1.7,
                param_a: 1.0 / 3.0,
                ..d
            },
        ]
    }

    #[test]
    fn default_fixture_at_zero() {
        let knot = TrefoilKnot::new(&ShapeParameters::default());
        let p = knot.evaluate(0.0);
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn default_fixture_at_half_pi() {
        let knot = TrefoilKnot::new(&ShapeParameters::default());
        let p = knot.evaluate(FRAC_PI_2);
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn tangent_is_unit_everywhere() {
        for params in param_sets() {
            let knot = TrefoilKnot::new(&params);
            for i in 0..720 {
                let t = knot.domain().uniform(i, 720);
                assert_relative_eq!(knot.tangent(t).norm(), 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn tangent_follows_finite_difference() {
        let knot = TrefoilKnot::new(&ShapeParameters::default());
        let h = 1e-6;
        for t in [0.1, 1.0, 2.5, 4.0] {
            let fd = (knot.evaluate(t + h) - knot.evaluate(t - h)).normalize();
            assert_relative_eq!(knot.tangent(t), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn closed_for_integer_frequencies() {
        for params in param_sets().into_iter().take(3) {
            let knot = TrefoilKnot::new(&params);
            assert_relative_eq!(knot.evaluate(0.0), knot.evaluate(TAU), epsilon = 1e-9);
            assert_relative_eq!(knot.tangent(0.0), knot.tangent(TAU), epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_magnitude_tangent_falls_back() {
        let knot = TrefoilKnot::new(&ShapeParameters {
            magnitude: 0.0,
            ..ShapeParameters::default()
        });
        assert_relative_eq!(knot.tangent(1.0), Vector3::x());
        let frame = knot.frame(1.0);
        assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn radius_follows_modulation() {
        let knot = TrefoilKnot::new(&ShapeParameters {
            base_radius: 0.2,
            radius_variation: 0.5,
            variation_frequency: 1.0,
            ..ShapeParameters::default()
        });
        assert_relative_eq!(knot.radius(0.0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(knot.radius(FRAC_PI_2), 0.3, epsilon = 1e-12);
        assert_relative_eq!(knot.radius(3.0 * FRAC_PI_2), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn radius_stays_positive_across_declared_ranges() {
        for base in [0.05, 0.1, 0.5] {
            for variation in [0.0, 1.0, 5.0, 10.0] {
                for vf in [1.0, 3.0, 10.0] {
                    let knot = TrefoilKnot::new(&ShapeParameters {
                        base_radius: base,
                        radius_variation: variation,
                        variation_frequency: vf,
                        ..ShapeParameters::default()
                    });
                    for i in 0..500 {
                        let t = knot.domain().uniform(i, 500);
                        assert!(knot.radius(t) >= MIN_RADIUS);
                    }
                }
            }
        }
    }

    #[test]
    fn sample_bundles_consistent_values() {
        let knot = TrefoilKnot::new(&ShapeParameters::default());
        let s = knot.sample(0.7);
        assert_eq!(s.position, knot.evaluate(0.7));
        assert_eq!(s.frame.tangent, knot.tangent(0.7));
        assert!((s.radius - knot.radius(0.7)).abs() < f64::EPSILON);
    }

    #[test]
    fn new_sanitizes_params() {
        let knot = TrefoilKnot::new(&ShapeParameters {
            segment_count: 1,
            ..ShapeParameters::default()
        });
        assert_eq!(knot.params().segment_count, 3);
    }
}
