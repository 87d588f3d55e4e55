//! Validation report types.

use serde::{Deserialize, Serialize};

/// Validation outcome for one statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementValidation {
    /// Whether the statement passed its validity threshold.
    pub is_valid: bool,

    /// Fraction of independent checks passed (0.0 - 1.0).
    pub confidence: f32,

    /// Concrete problems found, in check order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// Combined validation report across all three statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub balance_sheet: StatementValidation,
    pub income_statement: StatementValidation,
    pub cash_flow: StatementValidation,

    /// All issues, prefixed with the owning statement (BS/IS/CF).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_issues: Vec<String>,

    /// Mean of the three per-statement confidences.
    pub overall_confidence: f32,

    /// Whether the overall confidence clears the acceptance threshold.
    pub overall_valid: bool,
}
