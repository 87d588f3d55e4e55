//! Section extractors: two interchangeable strategies producing the same
//! output shape.
//!
//! No single strategy is reliable across all document styles, so both
//! implement one [`SectionExtractor`] contract and share the number
//! normalizer and category keyword tables.

pub mod categories;
pub mod grid;
pub mod lines;
pub mod numbers;
pub mod patterns;

pub use grid::TableGridExtractor;
pub use lines::LinePatternExtractor;
pub use numbers::normalize;

use crate::document::Page;
use crate::models::statement::{ExtractedStatement, StatementKind};

/// A section extraction strategy.
///
/// Strategies are substitutable: a caller can pick either, or run several
/// and prefer whichever yields a non-error result.
pub trait SectionExtractor {
    /// Strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Extract one statement kind from its located pages.
    ///
    /// A statement with zero populated sections is reported with
    /// `extraction_error` set, never as a silently-empty success.
    fn extract(&self, kind: StatementKind, pages: &[&Page]) -> ExtractedStatement;
}

/// Error message for a kind whose pages were not located.
pub(crate) fn pages_not_found(kind: StatementKind) -> String {
    format!("{} pages not found", kind.display_name())
}

/// Error message for a kind whose pages yielded no line items.
pub(crate) fn nothing_extracted(kind: StatementKind) -> String {
    format!("no line items extracted from {} pages", kind.display_name())
}

/// Uppercase-only labels are section banners, not data rows.
pub(crate) fn is_all_uppercase(label: &str) -> bool {
    label.chars().any(|c| c.is_alphabetic()) && !label.chars().any(|c| c.is_lowercase())
}
