use crate::error::{RenderError, Result};
use crate::math::{Color, Point2, TOLERANCE};

/// A color stop on a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis in `[0, 1]`.
    pub offset: f64,
    pub color: Color,
}

/// A linear gradient between two points in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: Point2,
    end: Point2,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Creates a gradient with no stops.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Adds a color stop, keeping stops sorted by offset.
    #[must_use]
    pub fn with_stop(mut self, offset: f64, color: Color) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
        self
    }

    /// Start point of the gradient axis.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// End point of the gradient axis.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Color stops sorted by offset.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `point`, projected onto the gradient axis and clamped.
    #[must_use]
    pub fn color_at(&self, point: &Point2) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        let axis = self.end - self.start;
        let len_sq = axis.norm_squared();
        if len_sq < TOLERANCE {
            return first.color;
        }
        let t = ((point - self.start).dot(&axis) / len_sq).clamp(0.0, 1.0);
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span < TOLERANCE {
                    return b.color;
                }
                return a.color.lerp(&b.color, (t - a.offset) / span);
            }
        }
        last.color
    }
}

/// How a stroke is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl Paint {
    /// Color of the paint at `point`.
    #[must_use]
    pub fn color_at(&self, point: &Point2) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::Linear(gradient) => gradient.color_at(point),
        }
    }
}

/// A blurred halo drawn beneath a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
}

/// Style parameters for stroking a polyline. Caps and joins are round.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    paint: Paint,
    shadow: Option<Shadow>,
}

impl StrokeStyle {
    /// Creates a new white stroke style without shadow.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive and finite.
    pub fn new(width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(RenderError::InvalidStroke(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        Ok(Self {
            width,
            paint: Paint::Solid(Color::WHITE),
            shadow: None,
        })
    }

    /// Replaces the paint.
    #[must_use]
    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    /// Sets or clears the shadow.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Option<Shadow>) -> Self {
        self.shadow = shadow;
        self
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns half the stroke width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    /// Returns the paint.
    #[must_use]
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Returns the shadow, if any.
    #[must_use]
    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }
}
