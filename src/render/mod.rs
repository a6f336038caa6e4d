//! Rendering of the temperature spiral
//!
//! - `polar.rs`: month angles and the unit-disk projection
//! - `frames.rs`: cumulative per-year frames
//! - `spiral.rs`: plotters drawing and GIF encoding

pub mod frames;
pub mod polar;
pub mod spiral;

pub use frames::{year_frames, YearFrame};
pub use polar::{month_angle, PolarProjection, MONTH_LABELS};
pub use spiral::SpiralRenderer;
