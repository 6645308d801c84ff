use crate::error::ParameterError;

/// Smallest tessellation density accepted by the mesh builder.
pub const MIN_SEGMENTS: u32 = 3;

/// Largest tessellation density accepted by the mesh builder.
pub const MAX_SEGMENTS: u32 = 2048;

/// Floor for the modulated cross-section radius.
pub const MIN_RADIUS: f64 = 1e-3;

/// Shape parameters of the trefoil knot and its tube.
///
/// All fields are public so UI layers can write them directly. Consumers in
/// this crate always go through [`ShapeParameters::sanitized`] before using
/// them, so out-of-range values are corrected, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParameters {
    /// Overall amplitude of the curve.
    pub magnitude: f64,
    /// Angular speed multiplier applied to `t`.
    pub frequency: f64,
    /// Lobe coefficient of the third harmonic in the XY plane.
    pub param_a: f64,
    /// Height coefficient of the Z oscillation.
    pub param_b: f64,
    /// Cross-section radius before modulation.
    pub base_radius: f64,
    /// Relative amplitude of the radius modulation.
    pub radius_variation: f64,
    /// Number of radius oscillations per revolution.
    pub variation_frequency: f64,
    /// Number of rings along the curve.
    pub segment_count: u32,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            magnitude: 2.0,
            frequency: 1.0,
            param_a: 0.5,
            param_b: 0.5,
            base_radius: 0.15,
            radius_variation: 1.0,
            variation_frequency: 3.0,
            segment_count: 200,
        }
    }
}

impl ShapeParameters {
    /// Returns a copy with every field forced into its safe range.
    ///
    /// Non-finite values fall back to the default for that field, the two
    /// radius fields are clamped non-negative and `segment_count` is clamped
    /// to `[MIN_SEGMENTS, MAX_SEGMENTS]`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        let sanitized = Self {
            magnitude: finite_or(self.magnitude, defaults.magnitude),
            frequency: finite_or(self.frequency, defaults.frequency),
            param_a: finite_or(self.param_a, defaults.param_a),
            param_b: finite_or(self.param_b, defaults.param_b),
            base_radius: finite_or(self.base_radius, defaults.base_radius).max(0.0),
            radius_variation: finite_or(self.radius_variation, defaults.radius_variation)
                .max(0.0),
            variation_frequency: finite_or(
                self.variation_frequency,
                defaults.variation_frequency,
            ),
            segment_count: self.segment_count.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
        };

        if sanitized != *self {
            tracing::debug!(?self, ?sanitized, "clamped shape parameters");
        }
        sanitized
    }

    /// Checks every field against its declared range without correcting it.
    ///
    /// # Errors
    ///
    /// Returns the first field that is non-finite or outside the range
    /// reported by [`ParamField::range`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        for field in ParamField::ALL {
            let value = field.get(self);
            if !value.is_finite() {
                return Err(ParameterError::NotFinite {
                    parameter: field.name(),
                });
            }
            let range = field.range();
            if value < range.min || value > range.max {
                return Err(ParameterError::OutOfRange {
                    parameter: field.name(),
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Interpolates all fields towards `other`; the segment count is rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        let segments = mix(f64::from(self.segment_count), f64::from(other.segment_count));
        Self {
            magnitude: mix(self.magnitude, other.magnitude),
            frequency: mix(self.frequency, other.frequency),
            param_a: mix(self.param_a, other.param_a),
            param_b: mix(self.param_b, other.param_b),
            base_radius: mix(self.base_radius, other.base_radius),
            radius_variation: mix(self.radius_variation, other.radius_variation),
            variation_frequency: mix(self.variation_frequency, other.variation_frequency),
            segment_count: segments.round().max(0.0) as u32,
        }
    }
}

/// Inclusive numeric range of a parameter, with its UI step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
}

impl ParamRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamps a value into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Identifies one field of [`ShapeParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Magnitude,
    Frequency,
    ParamA,
    ParamB,
    BaseRadius,
    RadiusVariation,
    VariationFrequency,
    SegmentCount,
}

impl ParamField {
    /// Every field, in control-panel order.
    pub const ALL: [Self; 8] = [
        Self::Magnitude,
        Self::Frequency,
        Self::ParamA,
        Self::ParamB,
        Self::BaseRadius,
        Self::RadiusVariation,
        Self::VariationFrequency,
        Self::SegmentCount,
    ];

    /// Stable identifier used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Magnitude => "magnitude",
            Self::Frequency => "frequency",
            Self::ParamA => "param_a",
            Self::ParamB => "param_b",
            Self::BaseRadius => "base_radius",
            Self::RadiusVariation => "radius_variation",
            Self::VariationFrequency => "variation_frequency",
            Self::SegmentCount => "segment_count",
        }
    }

    /// Looks a field up by its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Interactive range of the field.
    #[must_use]
    pub fn range(self) -> ParamRange {
        match self {
            Self::Magnitude => ParamRange::new(0.5, 5.0, 0.1),
            Self::Frequency => ParamRange::new(0.5, 3.0, 0.1),
            Self::ParamA | Self::ParamB => ParamRange::new(0.0, 2.5, 0.1),
            Self::BaseRadius => ParamRange::new(0.05, 0.5, 0.01),
            Self::RadiusVariation => ParamRange::new(0.0, 10.0, 0.1),
            Self::VariationFrequency => ParamRange::new(1.0, 10.0, 0.5),
            Self::SegmentCount => ParamRange::new(50.0, 400.0, 10.0),
        }
    }

    /// Reads the field as a float.
    #[must_use]
    pub fn get(self, params: &ShapeParameters) -> f64 {
        match self {
            Self::Magnitude => params.magnitude,
            Self::Frequency => params.frequency,
            Self::ParamA => params.param_a,
            Self::ParamB => params.param_b,
            Self::BaseRadius => params.base_radius,
            Self::RadiusVariation => params.radius_variation,
            Self::VariationFrequency => params.variation_frequency,
            Self::SegmentCount => f64::from(params.segment_count),
        }
    }

    /// Writes the field; the segment count is rounded to the nearest integer.
    ///
    /// Non-finite values are ignored. Range clamping is left to the caller.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set(self, params: &mut ShapeParameters, value: f64) {
        if !value.is_finite() {
            return;
        }
        match self {
            Self::Magnitude => params.magnitude = value,
            Self::Frequency => params.frequency = value,
            Self::ParamA => params.param_a = value,
            Self::ParamB => params.param_b = value,
            Self::BaseRadius => params.base_radius = value,
            Self::RadiusVariation => params.radius_variation = value,
            Self::VariationFrequency => params.variation_frequency = value,
            Self::SegmentCount => {
                params.segment_count = value.round().clamp(0.0, f64::from(u32::MAX)) as u32;
            }
        }
    }
}
