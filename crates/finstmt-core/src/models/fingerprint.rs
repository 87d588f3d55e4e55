//! Document identification metadata.

use serde::{Deserialize, Serialize};

/// Kind of financial report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Full-year annual report.
    Annual,
    /// Condensed interim / quarterly report.
    Quarterly,
    /// Could not be inferred.
    #[default]
    Unknown,
}

/// Fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

/// Minimal identifying metadata recovered for a document.
///
/// Produced once per document; immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    /// Ticker symbol of the recognized entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_symbol: Option<String>,

    /// Full legal name of the recognized entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Annual or quarterly report.
    pub report_kind: ReportKind,

    /// Fiscal quarter, for interim reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<Quarter>,

    /// Fiscal period label (e.g., "2023-2024").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_period: Option<String>,
}

impl DocumentFingerprint {
    /// Terminal fallback when no entity is recognized.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Whether any entity was recognized.
    pub fn is_known(&self) -> bool {
        self.entity_symbol.is_some()
    }
}
