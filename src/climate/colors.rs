//! Temperature to RGB mapping for points and the colorbar
//!
//! Colors are driven by the actual temperature, normalized over the global
//! temperature range of the series, so every frame shares one scale.

use super::error::{ClimateError, Result};
use super::expand::TemperatureRange;
use super::palettes::{palette_registry, PaletteDefinition};

/// A single color stop along the scale
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Temperature at this stop
    pub value: f64,
    pub color: [u8; 3],
}

/// Continuous color scale over a temperature range
#[derive(Debug, Clone)]
pub struct ColorScale {
    range: TemperatureRange,
    palette: &'static PaletteDefinition,
}

impl ColorScale {
    /// Build a scale from a registry palette name
    ///
    /// # Errors
    /// `UnknownPalette` if the name is not registered.
    pub fn new(range: TemperatureRange, palette_name: &str) -> Result<Self> {
        let palette = palette_registry()
            .get(palette_name)
            .ok_or_else(|| ClimateError::UnknownPalette(palette_name.to_string()))?;
        Ok(Self { range, palette })
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn palette_name(&self) -> &str {
        &self.palette.name
    }

    /// RGB color for a temperature (clamped to the range ends)
    pub fn color_for(&self, temperature: f64) -> [u8; 3] {
        self.palette.interpolate(self.range.normalize(temperature))
    }

    /// `n` evenly spaced tick values from min to max
    ///
    /// A degenerate range yields the single constant value.
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        if self.range.is_degenerate() || n < 2 {
            return vec![self.range.min];
        }
        let step = self.range.span() / (n - 1) as f64;
        (0..n).map(|i| self.range.min + step * i as f64).collect()
    }

    /// Ascending stops sampling the scale, used to paint the colorbar
    pub fn gradient(&self, steps: usize) -> Vec<ColorStop> {
        let steps = steps.max(2);
        let span = self.range.span();
        (0..steps)
            .map(|i| {
                let value = self.range.min + span * i as f64 / (steps - 1) as f64;
                ColorStop {
                    value,
                    color: self.color_for(value),
                }
            })
            .collect()
    }
}
