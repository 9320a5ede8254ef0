// src/config.rs

use crate::errors::ReportError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Report-wide configuration: chart palette, regional mappings, and the
/// handful of fixed report parameters. Passed explicitly into calculators
/// and renderers; nothing here is process-global.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Status label -> hex color used for chart traces.
    pub status_colors: BTreeMap<String, String>,
    /// Postal-code prefixes that map to the peninsula bin when an address
    /// has no geocode row.
    pub peninsula_prefixes: Vec<String>,
    /// Bin label for the postal-prefix fallback.
    pub peninsula_bin: String,
    /// Location bin excluded from the report entirely.
    pub excluded_bin: String,
    /// Assessment year paired against realized sale prices.
    pub assessment_year: i32,
    /// Street-name substrings for the valuation street-match view.
    pub watch_streets: Vec<String>,
    /// Row cap for each valuation table view.
    pub valuation_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let mut status_colors = BTreeMap::new();
        status_colors.insert("For Sale".to_string(), "#2563eb".to_string());
        status_colors.insert("Sold".to_string(), "#16a34a".to_string());
        status_colors.insert("Pending".to_string(), "#f59e0b".to_string());
        status_colors.insert("Withdrawn".to_string(), "#9ca3af".to_string());
        status_colors.insert("Cancelled".to_string(), "#6b7280".to_string());
        status_colors.insert("Expired".to_string(), "#dc2626".to_string());

        ReportConfig {
            status_colors,
            // B3H/B3J/B3K/B3L cover the peninsula postal zones.
            peninsula_prefixes: vec![
                "B3H".to_string(),
                "B3J".to_string(),
                "B3K".to_string(),
                "B3L".to_string(),
            ],
            peninsula_bin: "Halifax Peninsula".to_string(),
            excluded_bin: "Rest of Province".to_string(),
            assessment_year: 2025,
            watch_streets: Vec::new(),
            valuation_rows: 15,
        }
    }
}

impl ReportConfig {
    /// Loads config from a TOML file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ReportError::ConfigError(format!("Failed to read config file: {e}")))?;
        toml::from_str(&raw)
            .map_err(|e| ReportError::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Chart color for a status label, with a neutral fallback.
    pub fn color_for(&self, status: &str) -> &str {
        self.status_colors
            .get(status)
            .map(String::as_str)
            .unwrap_or("#64748b")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_status() {
        let cfg = ReportConfig::default();
        for status in ["For Sale", "Sold", "Pending", "Withdrawn", "Cancelled", "Expired"] {
            assert!(cfg.status_colors.contains_key(status), "missing color for {status}");
        }
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: ReportConfig = toml::from_str("assessment_year = 2024").unwrap();
        assert_eq!(cfg.assessment_year, 2024);
        assert_eq!(cfg.excluded_bin, "Rest of Province");
        assert_eq!(cfg.valuation_rows, 15);
    }
}
