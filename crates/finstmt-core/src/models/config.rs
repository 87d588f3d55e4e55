//! Configuration for the extraction pipeline.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinstmtError, Result};

/// Main configuration for the finstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Company/report identification configuration.
    pub identify: IdentifyConfig,

    /// Statement page location configuration.
    pub locator: LocatorConfig,

    /// Section extraction configuration.
    pub extraction: ExtractionConfig,

    /// Validation configuration.
    pub validation: ValidationConfig,
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FinstmtError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| FinstmtError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Identification scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyConfig {
    /// Pages scanned from the front of the document.
    pub scan_pages: usize,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self { scan_pages: 10 }
    }
}

/// Statement locator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Minimum page index considered (skips front matter and contents
    /// pages that quote statement titles).
    pub min_page_index: usize,

    /// Currency/unit markers that must co-occur with a statement title.
    pub currency_markers: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            min_page_index: 0,
            currency_markers: vec!["rupees".to_string()],
        }
    }
}

/// Which extraction strategy the pipeline runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySelection {
    /// Table-grid first, line-pattern fallback.
    #[default]
    Auto,
    /// Line-pattern extraction only.
    LinePattern,
    /// Table-grid extraction only.
    TableGrid,
}

/// Section extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Strategy selection.
    pub strategy: StrategySelection,

    /// Minimum label length for line-pattern items (rejects truncated or
    /// garbage labels).
    pub min_line_label_chars: usize,

    /// Minimum label length for table-grid rows.
    pub min_grid_label_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategySelection::Auto,
            min_line_label_chars: 5,
            min_grid_label_chars: 3,
        }
    }
}

/// Validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Relative tolerance for accounting-identity checks (1% default).
    pub tolerance: Decimal,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.identify.scan_pages, 10);
        assert_eq!(config.locator.currency_markers, vec!["rupees".to_string()]);
        assert_eq!(config.extraction.strategy, StrategySelection::Auto);
        assert_eq!(config.validation.tolerance, Decimal::new(1, 2));
    }

    #[test]
    fn test_partial_config_json() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{"extraction": {"strategy": "line_pattern"}, "locator": {"min_page_index": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.extraction.strategy, StrategySelection::LinePattern);
        assert_eq!(config.locator.min_page_index, 5);
        // Unspecified fields keep their defaults.
        assert_eq!(config.extraction.min_line_label_chars, 5);
        assert_eq!(config.identify.scan_pages, 10);
    }
}
