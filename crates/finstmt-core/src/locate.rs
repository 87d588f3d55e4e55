//! Statement page location.
//!
//! Classifies every page into zero or more statement kinds from lexical
//! signals: a statement title phrase (or its characteristic keyword set)
//! co-occurring with a currency/unit marker. A best-effort signal; later
//! stages tolerate zero matches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::models::config::LocatorConfig;
use crate::models::statement::StatementKind;

/// Page indices attributed to each statement kind, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementPages {
    pub balance_sheet: Vec<usize>,
    pub income_statement: Vec<usize>,
    pub cash_flow: Vec<usize>,
}

impl StatementPages {
    /// Located pages for one statement kind.
    pub fn for_kind(&self, kind: StatementKind) -> &[usize] {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    fn push(&mut self, kind: StatementKind, page: usize) {
        match kind {
            StatementKind::BalanceSheet => self.balance_sheet.push(page),
            StatementKind::IncomeStatement => self.income_statement.push(page),
            StatementKind::CashFlow => self.cash_flow.push(page),
        }
    }
}

/// Locates statement pages from lexical signals.
#[derive(Debug, Clone, Default)]
pub struct StatementLocator {
    config: LocatorConfig,
}

impl StatementLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Classify every page of the document.
    pub fn locate(&self, document: &Document) -> StatementPages {
        let mut pages = StatementPages::default();

        for (index, page) in document.pages.iter().enumerate() {
            if index < self.config.min_page_index {
                continue;
            }
            let Some(text) = page.text.as_deref() else { continue };
            let text_lower = text.to_lowercase();

            // Front matter and contents pages quote statement titles but
            // carry no currency/unit marker.
            if !self.has_currency_marker(&text_lower) {
                continue;
            }

            for kind in StatementKind::ALL {
                if page_matches(kind, &text_lower) {
                    pages.push(kind, index);
                }
            }
        }

        debug!(
            "Located {} balance sheet, {} income statement, {} cash flow pages",
            pages.balance_sheet.len(),
            pages.income_statement.len(),
            pages.cash_flow.len()
        );
        pages
    }

    fn has_currency_marker(&self, text_lower: &str) -> bool {
        self.config
            .currency_markers
            .iter()
            .any(|marker| text_lower.contains(marker.as_str()))
    }
}

/// Title phrase or characteristic keyword set for one statement kind.
fn page_matches(kind: StatementKind, text_lower: &str) -> bool {
    let t = text_lower;
    match kind {
        StatementKind::BalanceSheet => {
            t.contains("statement of financial position")
                || t.contains("balance sheet")
                || (t.contains("assets") && t.contains("liabilities") && t.contains("equity"))
        }
        StatementKind::IncomeStatement => {
            t.contains("statement of profit or loss")
                || t.contains("statement of profit and loss")
                || t.contains("income statement")
                || (t.contains("revenue") && t.contains("cost of sales"))
        }
        StatementKind::CashFlow => {
            t.contains("statement of cash flow")
                || t.contains("cash flows from operating activities")
        }
    }
}
