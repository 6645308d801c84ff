use std::fmt;

use crate::geometry::{ParamField, ShapeParameters};

/// Callback invoked with the new parameters after every change.
pub type ChangeListener = Box<dyn FnMut(&ShapeParameters)>;

/// Where shape parameters come from, e.g. a slider panel.
pub trait ParameterSource {
    /// The current parameters.
    fn params(&self) -> ShapeParameters;

    /// Replaces all parameters and notifies listeners.
    fn set_params(&mut self, params: ShapeParameters);

    /// Registers a listener for parameter changes.
    fn on_change(&mut self, listener: ChangeListener);
}

/// In-memory [`ParameterSource`] with slider-style field edits.
#[derive(Default)]
pub struct ParameterStore {
    params: ShapeParameters,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("params", &self.params)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ParameterStore {
    /// Creates a store holding the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `params`.
    #[must_use]
    pub fn with_params(params: ShapeParameters) -> Self {
        Self {
            params,
            listeners: Vec::new(),
        }
    }

    /// Sets one field as a slider would: clamped to the field's range, with
    /// the segment count rounded. Non-finite values are ignored.
    pub fn set_field(&mut self, field: ParamField, value: f64) {
        if !value.is_finite() {
            tracing::debug!(field = field.name(), "ignoring non-finite slider value");
            return;
        }
        field.set(&mut self.params, field.range().clamp(value));
        self.notify();
    }

    /// Restores the default parameters and notifies listeners.
    pub fn reset_to_defaults(&mut self) {
        self.params = ShapeParameters::default();
        self.notify();
    }

    fn notify(&mut self) {
        let params = self.params;
        for listener in &mut self.listeners {
            listener(&params);
        }
    }
}

impl ParameterSource for ParameterStore {
    fn params(&self) -> ShapeParameters {
        self.params
    }

    fn set_params(&mut self, params: ShapeParameters) {
        self.params = params;
        self.notify();
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
