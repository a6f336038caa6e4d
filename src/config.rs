//! Spiral configuration from properties
//!
//! All default values come from spiral.json via `PropertyReader`; this module
//! only converts them into typed settings and validates ranges.

use crate::properties::PropertyReader;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SpiralConfig {
    /// Seasonal CSV to read
    pub input_path: PathBuf,

    /// Animated GIF to write
    pub output_path: PathBuf,

    /// First title line; the second line carries year and latest temperature
    pub title: String,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Animation speed of the saved GIF
    pub fps: u32,

    /// Palette name for temperature colors
    pub palette: String,

    /// Point radius in pixels
    pub point_size: u32,

    pub point_alpha: f64,
    pub line_alpha: f64,
    pub grid_alpha: f64,

    /// Radius at the plot center (normalized radius starts at 1.0)
    pub radial_min: f64,

    /// Outer radius = max normalized value + headroom
    pub radial_headroom: f64,

    /// Label the points of the current frame year
    pub annotate_latest: bool,

    /// Suffix for temperature labels, e.g. "°C"
    pub temperature_unit: String,

    /// Number of colorbar tick labels
    pub colorbar_ticks: usize,
}

impl SpiralConfig {
    /// Create config from properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        let input_path = PathBuf::from(props.get_string("input.path"));
        let output_path = PathBuf::from(props.get_string("output.path"));
        let title = props.get_string("plot.title");

        let width = props.get_u32_in_range("plot.width", 100, 10_000);
        let height = props.get_u32_in_range("plot.height", 100, 10_000);
        let fps = props.get_u32_in_range("animation.fps", 1, 100);

        // Palette: validated enum
        let palette = props.get_enum("palette");

        let point_size = props.get_u32_in_range("point.size", 1, 50);
        let point_alpha = props.get_f64_in_range("point.alpha", 0.0, 1.0);
        let line_alpha = props.get_f64_in_range("line.alpha", 0.0, 1.0);
        let grid_alpha = props.get_f64_in_range("grid.alpha", 0.0, 1.0);

        let radial_min = props.get_f64_in_range("radial.min", 0.0, 1.0);
        let radial_headroom = props.get_f64_in_range("radial.headroom", 0.1, 10.0);

        let annotate_latest = props.get_bool("annotate.latest");
        let temperature_unit = props.get_string("temperature.unit");
        let colorbar_ticks = props.get_u32_in_range("colorbar.ticks", 2, 20) as usize;

        Self {
            input_path,
            output_path,
            title,
            width,
            height,
            fps,
            palette,
            point_size,
            point_alpha,
            line_alpha,
            grid_alpha,
            radial_min,
            radial_headroom,
            annotate_latest,
            temperature_unit,
            colorbar_ticks,
        }
    }

    /// GIF frame delay in milliseconds
    pub fn frame_delay_ms(&self) -> u32 {
        (1000 / self.fps.max(1)).max(1)
    }

    /// Outer radial limit for a series whose largest normalized value is `max_norm`
    pub fn radial_max(&self, max_norm: f64) -> f64 {
        max_norm + self.radial_headroom
    }

    /// Format a temperature for labels, one decimal
    pub fn format_temperature(&self, temperature: f64) -> String {
        format!("{:.1}{}", temperature, self.temperature_unit)
    }
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpiralConfig::default();
        assert_eq!(config.input_path, PathBuf::from("annual_seasonal_mean.csv"));
        assert_eq!(config.output_path, PathBuf::from("india_climate_spiral.gif"));
        assert_eq!((config.width, config.height), (1300, 1000));
        assert_eq!(config.fps, 15);
        assert_eq!(config.palette, "coolwarm");
        assert_eq!(config.radial_min, 0.8);
        assert_eq!(config.radial_headroom, 1.5);
        assert!(config.annotate_latest);
        assert_eq!(config.colorbar_ticks, 6);
    }

    #[test]
    fn test_frame_delay() {
        let mut config = SpiralConfig::default();
        assert_eq!(config.frame_delay_ms(), 66);
        config.fps = 20;
        assert_eq!(config.frame_delay_ms(), 50);
    }

    #[test]
    fn test_radial_max() {
        let config = SpiralConfig::default();
        assert_eq!(config.radial_max(1.0), 2.5);
    }

    #[test]
    fn test_format_temperature() {
        let config = SpiralConfig::default();
        assert_eq!(config.format_temperature(27.349), "27.3°C");
    }

    #[test]
    fn test_out_of_range_dimension() {
        let props = PropertyReader::from_json_str(r#"{"plot.width": 50, "plot.height": "800"}"#)
            .unwrap();
        let config = SpiralConfig::from_properties(&props);
        assert_eq!(config.width, 1300);
        assert_eq!(config.height, 800);
    }
}
