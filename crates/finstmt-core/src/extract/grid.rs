//! Table-grid extraction (strategy B): operates on detected cell grids.
//!
//! Each page's largest table by row count is treated as the primary
//! financial table (statements render as one dominant grid per page;
//! smaller grids are typically footnotes). The header row yields the year
//! pair; every following row is label-plus-numeric-cells.

use rust_decimal::Decimal;
use tracing::debug;

use crate::document::{Page, TableGrid};
use crate::models::config::ExtractionConfig;
use crate::models::statement::{ExtractedStatement, LineItem, StatementKind};

use super::categories::{self, Activity};
use super::numbers::normalize;
use super::patterns::YEAR;
use super::{is_all_uppercase, nothing_extracted, pages_not_found, SectionExtractor};

/// Extracts statements from each page's dominant table grid.
#[derive(Debug, Clone)]
pub struct TableGridExtractor {
    min_label_chars: usize,
}

impl TableGridExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            min_label_chars: config.min_grid_label_chars,
        }
    }

    /// Label and surviving numeric cells of a data row.
    fn read_row<'a>(&self, row: &'a [Option<String>]) -> Option<(&'a str, Vec<Decimal>)> {
        if row.len() < 2 {
            return None;
        }
        let label = row.first()?.as_deref()?.trim();
        if label.is_empty() {
            return None;
        }
        // The note-reference column and blank cells drop out here; the
        // first two survivors become (current, previous).
        let values: Vec<Decimal> = row[1..]
            .iter()
            .flatten()
            .filter_map(|cell| normalize(cell))
            .collect();
        Some((label, values))
    }

    fn read_balance_row(&self, row: &[Option<String>], statement: &mut ExtractedStatement) {
        let Some((label, values)) = self.read_row(row) else { return };
        if label.len() < self.min_label_chars || values.len() < 2 {
            return;
        }
        let Some(bucket) = categories::categorize_balance_item(label) else { return };
        statement.insert_into(
            bucket.section_name(),
            LineItem::new(label, Some(values[0]), Some(values[1])),
        );
    }

    fn read_income_row(&self, row: &[Option<String>], statement: &mut ExtractedStatement) {
        let Some((label, values)) = self.read_row(row) else { return };
        if label.len() < self.min_label_chars || values.len() < 2 {
            return;
        }
        // Long all-uppercase labels are section banners, not data.
        if label.len() > 20 && is_all_uppercase(label) {
            return;
        }
        statement.insert_into(
            "line_items",
            LineItem::new(label, Some(values[0]), Some(values[1])),
        );
    }

    fn read_cash_flow_row(
        &self,
        row: &[Option<String>],
        activity: &mut Activity,
        statement: &mut ExtractedStatement,
    ) {
        let Some((label, values)) = self.read_row(row) else { return };

        // A row whose label is a section transition is a marker only.
        if let Some(next) = categories::activity_marker(&label.to_lowercase()) {
            *activity = next;
            return;
        }

        if label.len() < self.min_label_chars || values.len() < 2 {
            return;
        }
        statement.insert_into(
            activity.section_name(),
            LineItem::new(label, Some(values[0]), Some(values[1])),
        );
    }
}

impl Default for TableGridExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl SectionExtractor for TableGridExtractor {
    fn name(&self) -> &'static str {
        "table-grid"
    }

    fn extract(&self, kind: StatementKind, pages: &[&Page]) -> ExtractedStatement {
        if pages.is_empty() {
            return ExtractedStatement::with_error(kind, pages_not_found(kind));
        }

        let mut statement = ExtractedStatement::empty(kind);
        // Cash-flow sections continue across page boundaries.
        let mut activity = Activity::Operating;

        for page in pages {
            let Some(table) = primary_table(page) else { continue };
            let required_rows = if kind == StatementKind::CashFlow { 1 } else { 3 };
            if table.len() < required_rows {
                continue;
            }

            if statement.current_year.is_none() {
                if let Some((current, previous)) = header_years(&table[0]) {
                    statement.current_year = Some(current);
                    statement.previous_year = Some(previous);
                }
            }

            for row in &table[1..] {
                match kind {
                    StatementKind::BalanceSheet => self.read_balance_row(row, &mut statement),
                    StatementKind::IncomeStatement => self.read_income_row(row, &mut statement),
                    StatementKind::CashFlow => {
                        self.read_cash_flow_row(row, &mut activity, &mut statement)
                    }
                }
            }
        }

        if statement.is_empty() {
            statement.extraction_error = Some(nothing_extracted(kind));
        } else {
            debug!(
                "Table-grid extraction found {} items for {}",
                statement.item_count(),
                kind.display_name()
            );
        }
        statement
    }
}

/// Largest grid by row count on the page.
fn primary_table(page: &Page) -> Option<&TableGrid> {
    page.tables.iter().max_by_key(|table| table.len())
}

/// Distinct years in the header row, sorted descending: the most recent is
/// the current year, the next the previous year.
fn header_years(row: &[Option<String>]) -> Option<(i32, i32)> {
    let mut years: Vec<i32> = Vec::new();
    for cell in row.iter().flatten() {
        for found in YEAR.find_iter(cell) {
            let Ok(year) = found.as_str().parse::<i32>() else { continue };
            if !years.contains(&year) {
                years.push(year);
            }
        }
    }
    years.sort_unstable_by(|a, b| b.cmp(a));
    match years.as_slice() {
        [current, previous, ..] => Some((*current, *previous)),
        _ => None,
    }
}
