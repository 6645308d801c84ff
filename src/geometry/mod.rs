pub mod curve;
pub mod frame;
pub mod params;

pub use curve::{Curve, CurveDomain, CurveSample, TrefoilKnot};
pub use frame::Frame;
pub use params::{ParamField, ParamRange, ShapeParameters};
