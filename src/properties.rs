//! Property definitions with defaults from spiral.json
//!
//! spiral.json is embedded at compile time and holds every property with its
//! default value, so defaults are defined in ONE place. User overrides come
//! from an optional JSON object (`{"name": value}`) and from CLI flags.

use crate::climate::{ClimateError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// spiral.json embedded at compile time
const SPIRAL_JSON: &str = include_str!("../spiral.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "BooleanProperty")]
    Boolean,
}

/// Property definition from spiral.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(default, rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    properties: Vec<PropertyDef>,
}

/// Registry of all properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse property manifest: {}", e))?;

        let properties = manifest
            .properties
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }

    /// Canonical spelling of an enumerated value
    fn canonical_enum_value(&self, name: &str, value: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .and_then(|values| values.iter().find(|v| v.eq_ignore_ascii_case(value)))
            .map(String::as_str)
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(SPIRAL_JSON).unwrap_or_else(|e| {
            tracing::error!("{}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed property reader: user value if set, otherwise the spiral.json default
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Create from user-set values; empty strings count as unset
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values = user_values
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        Self { user_values }
    }

    /// Reader with no overrides
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Parse overrides from a JSON object of scalar values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ClimateError::Config(format!("expected a JSON object: {}", e)))?;

        let mut values = HashMap::new();
        for (name, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => continue,
                other => {
                    return Err(ClimateError::Config(format!(
                        "property '{}' must be a scalar, got {}",
                        name, other
                    )))
                }
            };

            if registry().get_property(&name).is_none() {
                tracing::warn!("Ignoring unknown property '{}'", name);
                continue;
            }
            values.insert(name, text);
        }

        Ok(Self::new(values))
    }

    /// Read overrides from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ClimateError::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Set a single override (CLI flags take precedence over the file)
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.user_values.remove(name);
        } else {
            self.user_values.insert(name.to_string(), value);
        }
    }

    /// Get string property (user value or default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property with validation
    ///
    /// Returns the user-set value if valid, otherwise the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return reg
                    .canonical_enum_value(name, value)
                    .unwrap_or(value)
                    .to_string();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    /// Get f64 property, default on parse failure
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = default_parsed::<f64>(name).unwrap_or(0.0);
        let value = self.get_string(name);

        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            return value;
        }
        let default = default_parsed::<f64>(name).unwrap_or(min);
        tracing::warn!(
            "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
            value,
            name,
            min,
            max,
            default
        );
        default
    }

    /// Get u32 property with range validation
    pub fn get_u32_in_range(&self, name: &str, min: u32, max: u32) -> u32 {
        let default = default_parsed::<u32>(name).unwrap_or(min);
        let value = self.get_string(name);

        match value.trim().parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                tracing::warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v,
                    name,
                    min,
                    max,
                    default
                );
                default
            }
            Err(_) => {
                tracing::warn!(
                    "Invalid integer value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get boolean property ("true"/"false", case-insensitive)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = default_parsed::<bool>(name).unwrap_or(false);
        let value = self.get_string(name);

        match value.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            other => {
                tracing::warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other,
                    name,
                    default
                );
                default
            }
        }
    }
}

fn default_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    registry().get_default(name)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let reg = registry();
        assert!(reg.get_property("input.path").is_some());
        assert!(reg.get_property("palette").is_some());
        assert_eq!(
            reg.get_property("annotate.latest").map(|p| p.kind),
            Some(PropertyKind::Boolean)
        );
    }

    #[test]
    fn test_registry_defaults() {
        let reg = registry();
        assert_eq!(reg.get_default("input.path"), Some("annual_seasonal_mean.csv"));
        assert_eq!(reg.get_default("output.path"), Some("india_climate_spiral.gif"));
        assert_eq!(reg.get_default("palette"), Some("coolwarm"));
        assert_eq!(reg.get_default("animation.fps"), Some("15"));
    }

    #[test]
    fn test_enum_validation() {
        let reg = registry();
        assert!(reg.is_valid_enum_value("palette", "coolwarm"));
        assert!(reg.is_valid_enum_value("palette", "viridis"));
        assert!(!reg.is_valid_enum_value("palette", "sepia"));
        // Non-enumerated properties accept anything
        assert!(reg.is_valid_enum_value("plot.title", "anything"));
    }

    #[test]
    fn test_reader_defaults() {
        let reader = PropertyReader::defaults();
        assert_eq!(reader.get_enum("palette"), "coolwarm");
        assert_eq!(reader.get_f64("radial.min"), 0.8);
        assert_eq!(reader.get_u32_in_range("animation.fps", 1, 100), 15);
        assert!(reader.get_bool("annotate.latest"));
    }

    #[test]
    fn test_reader_overrides() {
        let reader = PropertyReader::from_json_str(
            r#"{"palette": "viridis", "animation.fps": 24, "annotate.latest": false, "plot.title": "Delhi"}"#,
        )
        .unwrap();

        assert_eq!(reader.get_enum("palette"), "Viridis");
        assert_eq!(reader.get_u32_in_range("animation.fps", 1, 100), 24);
        assert!(!reader.get_bool("annotate.latest"));
        assert_eq!(reader.get_string("plot.title"), "Delhi");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let reader = PropertyReader::from_json_str(
            r#"{"palette": "sepia", "animation.fps": 0, "point.alpha": "opaque", "annotate.latest": "maybe"}"#,
        )
        .unwrap();

        assert_eq!(reader.get_enum("palette"), "coolwarm");
        assert_eq!(reader.get_u32_in_range("animation.fps", 1, 100), 15);
        assert_eq!(reader.get_f64("point.alpha"), 0.7);
        assert!(reader.get_bool("annotate.latest"));
    }

    #[test]
    fn test_out_of_range_f64() {
        let reader = PropertyReader::from_json_str(r#"{"point.alpha": 3.5}"#).unwrap();
        assert_eq!(reader.get_f64_in_range("point.alpha", 0.0, 1.0), 0.7);
    }

    #[test]
    fn test_unknown_and_null_properties_ignored() {
        let reader =
            PropertyReader::from_json_str(r#"{"no.such.thing": 1, "plot.title": null}"#).unwrap();
        assert_eq!(reader.get_string("plot.title"), "Temperature Variation in India");
    }

    #[test]
    fn test_non_scalar_rejected() {
        let result = PropertyReader::from_json_str(r#"{"plot.title": ["a", "b"]}"#);
        assert!(matches!(result, Err(ClimateError::Config(_))));

        let result = PropertyReader::from_json_str("[1, 2]");
        assert!(matches!(result, Err(ClimateError::Config(_))));
    }

    #[test]
    fn test_set_overrides() {
        let mut reader = PropertyReader::from_json_str(r#"{"input.path": "a.csv"}"#).unwrap();
        reader.set("input.path", "b.csv");
        assert_eq!(reader.get_string("input.path"), "b.csv");

        reader.set("input.path", "");
        assert_eq!(reader.get_string("input.path"), "annual_seasonal_mean.csv");
    }
}
