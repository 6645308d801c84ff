use thiserror::Error;

/// Top-level error type for the trefoil crate.
#[derive(Debug, Error)]
pub enum TrefoilError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors reported by strict shape-parameter validation.
///
/// The mesh and curve code never returns these; it clamps instead. They exist
/// for callers that want to reject bad input rather than have it corrected.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("parameter {parameter} is not finite")]
    NotFinite { parameter: &'static str },
}

/// Errors related to the scene graph.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene object not found: {0}")]
    ObjectNotFound(String),
}

/// Errors related to the fallback renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid stroke style: {0}")]
    InvalidStroke(String),
}

/// Convenience type alias for results using [`TrefoilError`].
pub type Result<T> = std::result::Result<T, TrefoilError>;
