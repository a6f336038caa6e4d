//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name.
//!
//! Palette types:
//! - `sequential`: Gradient from low to high values
//! - `diverging`: Gradient with a neutral midpoint (e.g., for warm/cold deviations)

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Default sequential palette name
pub const DEFAULT_SEQUENTIAL_PALETTE: &str = "Viridis";

/// Default diverging palette name (temperature plots)
pub const DEFAULT_DIVERGING_PALETTE: &str = "coolwarm";

/// Fallback for unparsable colors
const GRAY: [u8; 3] = [128, 128, 128];

/// Palette type as defined in palettes.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Sequential,
    Diverging,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return GRAY;
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or(GRAY)
    }

    /// Get the number of colors in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 returns the last color.
    /// Values in between are linearly interpolated.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return GRAY;
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        // Map t to position in the color array
        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let low = self.get_color(idx_low);
        let high = self.get_color(idx_high);

        let mix = |a: u8, b: u8| (a as f64 * (1.0 - frac) + b as f64 * frac).round() as u8;
        [mix(low[0], high[0]), mix(low[1], high[1]), mix(low[2], high[2])]
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    sequential_names: Vec<String>,
    diverging_names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();

        for def in definitions {
            let name = def.name.clone();
            match def.palette_type {
                PaletteType::Sequential => registry.sequential_names.push(name.clone()),
                PaletteType::Diverging => registry.diverging_names.push(name.clone()),
            }
            registry.palettes.insert(name.to_lowercase(), def);
        }

        tracing::debug!(
            total = registry.palettes.len(),
            sequential = registry.sequential_names.len(),
            diverging = registry.diverging_names.len(),
            "Loaded palettes"
        );

        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    pub fn default_sequential(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_SEQUENTIAL_PALETTE)
    }

    pub fn default_diverging(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_DIVERGING_PALETTE)
    }

    pub fn sequential_palettes(&self) -> &[String] {
        &self.sequential_names
    }

    pub fn diverging_palettes(&self) -> &[String] {
        &self.diverging_names
    }
}

/// Global palette registry, initialized lazily on first access
static PALETTE_REGISTRY: OnceLock<PaletteRegistry> = OnceLock::new();

/// Get the global palette registry
pub fn palette_registry() -> &'static PaletteRegistry {
    PALETTE_REGISTRY.get_or_init(|| {
        PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
            tracing::error!("Failed to load palettes.json: {}", e);
            PaletteRegistry::default()
        })
    })
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        tracing::warn!("Invalid hex color '{}'", hex);
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#3B4CC0"), Some([59, 76, 192]));
        assert_eq!(parse_hex_color("B40426"), Some([180, 4, 38]));
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = palette_registry();

        let coolwarm = registry.get("coolwarm").unwrap();
        assert_eq!(coolwarm.palette_type, PaletteType::Diverging);
        assert!(!coolwarm.is_empty());

        assert!(registry.default_sequential().is_some());
        assert!(registry.default_diverging().is_some());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = palette_registry();
        assert!(registry.get("CoolWarm").is_some());
        assert!(registry.get("viridis").is_some());
        assert!(registry.get("no-such-palette").is_none());
    }

    #[test]
    fn test_palette_types() {
        let registry = palette_registry();
        assert!(registry
            .diverging_palettes()
            .contains(&"coolwarm".to_string()));
        assert!(registry.diverging_palettes().contains(&"RdBu".to_string()));
        assert!(registry
            .sequential_palettes()
            .contains(&"Viridis".to_string()));
    }

    #[test]
    fn test_interpolate_endpoints() {
        let palette = palette_registry().get("coolwarm").unwrap();
        assert_eq!(palette.interpolate(0.0), [59, 76, 192]);
        assert_eq!(palette.interpolate(1.0), [180, 4, 38]);
        // Clamped outside [0, 1]
        assert_eq!(palette.interpolate(-3.0), [59, 76, 192]);
        assert_eq!(palette.interpolate(7.0), [180, 4, 38]);
    }

    #[test]
    fn test_interpolate_between_stops() {
        let palette = PaletteDefinition {
            name: "two".to_string(),
            palette_type: PaletteType::Sequential,
            colors: vec!["#000000".to_string(), "#C86400".to_string()],
        };
        assert_eq!(palette.interpolate(0.5), [100, 50, 0]);
    }

    #[test]
    fn test_color_wrapping() {
        let palette = palette_registry().get("Viridis").unwrap();
        let len = palette.len();
        assert_eq!(palette.get_color(0), palette.get_color(len));
    }
}
