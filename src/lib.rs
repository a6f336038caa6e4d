//! Climate Spiral Library
//!
//! Reshapes seasonal mean temperatures into a monthly series and renders it
//! as an animated polar plot.
//!
//! Module organization:
//! - `climate`: Loading, season expansion, normalization, palettes
//! - `render`: Polar projection, yearly frames, GIF rendering
//! - `config` / `properties`: Settings with defaults from spiral.json
//! - `pipeline`: End-to-end run shared by the binaries

pub mod climate;
pub mod config;
pub mod memprof;
pub mod pipeline;
pub mod properties;
pub mod render;
