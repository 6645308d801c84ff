use crate::geometry::{Curve, CurveSample, TrefoilKnot};

use super::Polyline;

/// Samples a knot at evenly spaced parameters over its domain.
#[derive(Debug, Clone, Copy)]
pub struct SampleCurve<'a> {
    knot: &'a TrefoilKnot,
    count: usize,
}

impl<'a> SampleCurve<'a> {
    /// Creates a sampling operation producing `count` samples.
    #[must_use]
    pub fn new(knot: &'a TrefoilKnot, count: usize) -> Self {
        Self { knot, count }
    }

    /// Returns `count` samples over the half-open domain `[t_min, t_max)`.
    ///
    /// The result is always a freshly allocated, ordered sequence.
    #[must_use]
    pub fn execute(&self) -> Vec<CurveSample> {
        let domain = self.knot.domain();
        (0..self.count)
            .map(|i| self.knot.sample(domain.uniform(i, self.count)))
            .collect()
    }

    /// Returns the centerline as a polyline of `count + 1` points.
    ///
    /// The last point is evaluated at `t_max`, closing the loop for curves
    /// whose ends meet.
    #[must_use]
    pub fn centerline(&self) -> Polyline {
        let domain = self.knot.domain();
        let points = (0..=self.count)
            .map(|i| self.knot.evaluate(domain.uniform(i, self.count)))
            .collect();
        Polyline { points }
    }
}
