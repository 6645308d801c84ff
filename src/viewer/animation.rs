use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::geometry::ShapeParameters;

/// Shared flag that stops a running animation.
///
/// Clones observe the same flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Eased interpolation between two parameter sets, advanced one frame at a time.
#[derive(Debug, Clone)]
pub struct ParameterTween {
    from: ShapeParameters,
    to: ShapeParameters,
    duration: Duration,
    elapsed: Duration,
    token: CancellationToken,
}

impl ParameterTween {
    #[must_use]
    pub fn new(from: ShapeParameters, to: ShapeParameters, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            token: CancellationToken::new(),
        }
    }

    /// A handle that cancels this tween.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Linear progress in `[0, 1]`. A zero duration is complete at once.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Parameters at the current eased progress.
    #[must_use]
    pub fn value(&self) -> ShapeParameters {
        self.from.lerp(&self.to, ease_in_out_cubic(self.progress()))
    }

    /// Advances by `dt` and returns the new value, or `None` if cancelled.
    pub fn step(&mut self, dt: Duration) -> Option<ShapeParameters> {
        if self.token.is_cancelled() {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        Some(self.value())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
