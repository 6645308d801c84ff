use std::time::{Duration, Instant};

use crate::geometry::ShapeParameters;

/// Quiet period after the last parameter change before the mesh is rebuilt.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Coalesces bursts of parameter changes into a single rebuild.
///
/// Every request restarts the quiet period and replaces the pending
/// parameters, so a burst yields one rebuild with the last values.
#[derive(Debug, Clone)]
pub struct RebuildDebouncer {
    delay: Duration,
    pending: Option<(ShapeParameters, Instant)>,
}

impl Default for RebuildDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl RebuildDebouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a rebuild for `params`, superseding any pending one.
    pub fn request(&mut self, params: ShapeParameters, now: Instant) {
        self.pending = Some((params, now + self.delay));
    }

    /// Returns the pending parameters once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ShapeParameters> {
        match self.pending {
            Some((params, due)) if now >= due => {
                self.pending = None;
                Some(params)
            }
            _ => None,
        }
    }

    /// Drops the pending rebuild, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a rebuild is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
