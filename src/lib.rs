pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;
pub mod tessellation;
pub mod viewer;

pub use error::{Result, TrefoilError};
pub use render::ProjectionRenderer;
pub use tessellation::rebuild_mesh;
