//! Statement data extracted from a document.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::locate::StatementPages;
use crate::models::fingerprint::DocumentFingerprint;

/// Kind of financial statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    /// All statement kinds, in reporting order.
    pub const ALL: [StatementKind; 3] = [
        StatementKind::BalanceSheet,
        StatementKind::IncomeStatement,
        StatementKind::CashFlow,
    ];

    /// Section names this kind of statement is bucketed into.
    pub fn section_names(&self) -> &'static [&'static str] {
        match self {
            StatementKind::BalanceSheet => &["assets", "liabilities", "equity"],
            StatementKind::IncomeStatement => &["line_items"],
            StatementKind::CashFlow => &[
                "operating_activities",
                "investing_activities",
                "financing_activities",
            ],
        }
    }

    /// Human-readable name used in error and issue strings.
    pub fn display_name(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "balance sheet",
            StatementKind::IncomeStatement => "income statement",
            StatementKind::CashFlow => "cash flow statement",
        }
    }

    /// Located pages worth scanning for this kind; statements rarely span
    /// more.
    pub fn max_extraction_pages(&self) -> usize {
        match self {
            StatementKind::BalanceSheet => 3,
            StatementKind::IncomeStatement | StatementKind::CashFlow => 2,
        }
    }
}

/// Which year column of a line item to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearColumn {
    Current,
    Previous,
}

/// A single extracted line item: a label and up to two year columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Label as it appeared, trimmed.
    pub name: String,

    /// Most recent year's value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Decimal>,

    /// Comparative (previous year) value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<Decimal>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, current: Option<Decimal>, previous: Option<Decimal>) -> Self {
        Self {
            name: name.into(),
            current_value: current,
            previous_value: previous,
        }
    }

    pub fn value(&self, column: YearColumn) -> Option<Decimal> {
        match column {
            YearColumn::Current => self.current_value,
            YearColumn::Previous => self.previous_value,
        }
    }
}

/// Line items of one statement bucket, keyed by label.
///
/// Labels are not guaranteed unique across extraction attempts; a label
/// recurring within a page overwrites the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementSection(BTreeMap<String, LineItem>);

impl StatementSection {
    pub fn insert(&mut self, item: LineItem) {
        self.0.insert(item.name.clone(), item);
    }

    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.0.values()
    }

    /// First value resolved by the keyword fragments. Fragments are tried
    /// in order: every item name is matched against one fragment before
    /// the next is considered, so more specific fragments go first.
    pub fn value_matching(&self, keywords: &[&str], column: YearColumn) -> Option<Decimal> {
        keywords.iter().find_map(|keyword| {
            self.0.iter().find_map(|(name, item)| {
                if name.to_lowercase().contains(keyword) {
                    item.value(column)
                } else {
                    None
                }
            })
        })
    }

    /// Whether any item name contains the fragment.
    pub fn has_fragment(&self, fragment: &str) -> bool {
        self.0.keys().any(|name| name.to_lowercase().contains(fragment))
    }
}

/// One statement kind's extraction output for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedStatement {
    pub kind: StatementKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_year: Option<i32>,

    /// Section name -> bucket of line items.
    pub sections: BTreeMap<String, StatementSection>,

    /// Set when nothing usable could be extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
}

impl ExtractedStatement {
    /// Empty statement with this kind's named sections in place.
    pub fn empty(kind: StatementKind) -> Self {
        let sections = kind
            .section_names()
            .iter()
            .map(|name| (name.to_string(), StatementSection::default()))
            .collect();
        Self {
            kind,
            current_year: None,
            previous_year: None,
            sections,
            extraction_error: None,
        }
    }

    /// Empty statement flagged with an extraction error.
    pub fn with_error(kind: StatementKind, message: impl Into<String>) -> Self {
        let mut statement = Self::empty(kind);
        statement.extraction_error = Some(message.into());
        statement
    }

    pub fn section(&self, name: &str) -> Option<&StatementSection> {
        self.sections.get(name)
    }

    /// Record an item under a section, creating the section if needed.
    pub fn insert_into(&mut self, section: &str, item: LineItem) {
        self.sections.entry(section.to_string()).or_default().insert(item);
    }

    /// Whether every section is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(|s| s.is_empty())
    }

    /// Total line items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.values().map(|s| s.len()).sum()
    }
}

/// Extraction bookkeeping handed onward with the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Pages in the source document.
    pub page_count: usize,

    /// Pages attributed to each statement kind.
    pub statement_pages: StatementPages,
}

/// Aggregate result for one document: the unit handed to persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub fingerprint: DocumentFingerprint,
    pub balance_sheet: ExtractedStatement,
    pub income_statement: ExtractedStatement,
    pub cash_flow: ExtractedStatement,
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// The extracted statement for one kind.
    pub fn statement(&self, kind: StatementKind) -> &ExtractedStatement {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_empty_statement_has_named_sections() {
        let statement = ExtractedStatement::empty(StatementKind::BalanceSheet);
        assert!(statement.section("assets").is_some());
        assert!(statement.section("liabilities").is_some());
        assert!(statement.section("equity").is_some());
        assert!(statement.is_empty());
        assert!(statement.extraction_error.is_none());
    }

    #[test]
    fn test_duplicate_label_last_write_wins() {
        let mut section = StatementSection::default();
        section.insert(LineItem::new("Cash and bank balances", dec("100"), dec("90")));
        section.insert(LineItem::new("Cash and bank balances", dec("200"), dec("180")));
        assert_eq!(section.len(), 1);
        assert_eq!(
            section.get("Cash and bank balances").unwrap().current_value,
            dec("200")
        );
        assert_eq!(section.items().count(), 1);
    }

    #[test]
    fn test_value_matching_prefers_earlier_keyword() {
        let mut section = StatementSection::default();
        section.insert(LineItem::new("Cost of sales", dec("-600"), None));
        section.insert(LineItem::new("Revenue from contracts", dec("1000"), None));
        // "revenue" is tried before "sales", so the alphabetically earlier
        // "Cost of sales" does not shadow the revenue item.
        assert_eq!(
            section.value_matching(&["revenue", "sales"], YearColumn::Current),
            dec("1000")
        );
    }

    #[test]
    fn test_value_matching_skips_null_values() {
        let mut section = StatementSection::default();
        section.insert(LineItem::new("Total assets", None, dec("450")));
        assert_eq!(section.value_matching(&["total asset"], YearColumn::Current), None);
        assert_eq!(
            section.value_matching(&["total asset"], YearColumn::Previous),
            dec("450")
        );
    }
}
