mod camera;
mod projection;
mod raster;
mod renderer;
mod stroke_style;
mod surface;

pub use camera::{Camera, MAX_DISTANCE, MIN_DISTANCE, REFERENCE_DISTANCE};
pub use projection::{rotate_y_then_x, ViewTransform, PERSPECTIVE_K};
pub use raster::RasterSurface;
pub use renderer::{project_centerline, ProjectionRenderer, CENTERLINE_SAMPLES};
pub use stroke_style::{GradientStop, LinearGradient, Paint, Shadow, StrokeStyle};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
