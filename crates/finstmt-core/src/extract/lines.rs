//! Line-pattern extraction (strategy A): operates on raw page text.
//!
//! Splits the located pages into lines, reads the year pair from the first
//! ten lines, and matches every remaining line against a label-plus-two-
//! numbers pattern. Balance-sheet bucketing follows digit-free header
//! lines; cash-flow bucketing follows transition keywords on any line.

use tracing::debug;

use crate::document::Page;
use crate::models::config::ExtractionConfig;
use crate::models::statement::{ExtractedStatement, LineItem, StatementKind};

use super::categories::{self, Activity, BalanceBucket};
use super::numbers::normalize;
use super::patterns::{LINE_ITEM, TOTAL_LINE, YEAR};
use super::{is_all_uppercase, nothing_extracted, pages_not_found, SectionExtractor};

/// Extracts statements by matching a line-item pattern per text line.
#[derive(Debug, Clone)]
pub struct LinePatternExtractor {
    min_label_chars: usize,
}

impl LinePatternExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            min_label_chars: config.min_line_label_chars,
        }
    }

    /// Label and two normalized values, when the line matches the item
    /// pattern and the label survives the filters.
    fn match_line_item(&self, line: &str) -> Option<LineItem> {
        let caps = LINE_ITEM.captures(line)?;
        let label = caps[1].trim().to_string();
        if label.len() < self.min_label_chars || is_all_uppercase(&label) {
            return None;
        }
        let current = normalize(&caps[2]);
        let previous = normalize(&caps[3]);
        if current.is_none() && previous.is_none() {
            return None;
        }
        Some(LineItem::new(label, current, previous))
    }

    fn parse_balance_sheet(&self, text: &str, statement: &mut ExtractedStatement) {
        let mut current_bucket: Option<BalanceBucket> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            let line_lower = line.to_lowercase();

            // Digit-free keyword lines are section headers, not data rows;
            // the bucket they open stays current until the next header.
            if !line.chars().any(|c| c.is_ascii_digit()) {
                if let Some(bucket) = categories::balance_header_bucket(&line_lower) {
                    current_bucket = Some(bucket);
                }
                continue;
            }

            let Some(bucket) = current_bucket else { continue };
            if let Some(item) = self.match_line_item(line) {
                statement.insert_into(bucket.section_name(), item);
            }
        }

        // Second pass: summary rows filed by their own wording, regardless
        // of where the header machine stood when they appeared.
        for caps in TOTAL_LINE.captures_iter(text) {
            let label = caps[1].trim().to_string();
            let Some(bucket) = categories::total_bucket(&label.to_lowercase()) else {
                continue;
            };
            let item = LineItem::new(label, normalize(&caps[2]), normalize(&caps[3]));
            statement.insert_into(bucket.section_name(), item);
        }
    }

    fn parse_income_statement(&self, text: &str, statement: &mut ExtractedStatement) {
        for raw_line in text.lines() {
            if let Some(item) = self.match_line_item(raw_line.trim()) {
                statement.insert_into("line_items", item);
            }
        }
    }

    fn parse_cash_flow(&self, text: &str, statement: &mut ExtractedStatement) {
        let mut activity = Activity::Operating;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            let line_lower = line.to_lowercase();

            // Transition keywords switch the bucket on any line, data rows
            // included; the line then stays eligible as an item.
            if let Some(next) = categories::activity_transition(&line_lower) {
                activity = next;
            }

            if let Some(item) = self.match_line_item(line) {
                statement.insert_into(activity.section_name(), item);
            }
        }
    }
}

impl Default for LinePatternExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl SectionExtractor for LinePatternExtractor {
    fn name(&self) -> &'static str {
        "line-pattern"
    }

    fn extract(&self, kind: StatementKind, pages: &[&Page]) -> ExtractedStatement {
        if pages.is_empty() {
            return ExtractedStatement::with_error(kind, pages_not_found(kind));
        }

        let text: String = pages
            .iter()
            .filter_map(|page| page.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return ExtractedStatement::with_error(kind, nothing_extracted(kind));
        }

        let mut statement = ExtractedStatement::empty(kind);
        let (current_year, previous_year) = header_years(&text);
        statement.current_year = current_year;
        statement.previous_year = previous_year;

        match kind {
            StatementKind::BalanceSheet => self.parse_balance_sheet(&text, &mut statement),
            StatementKind::IncomeStatement => self.parse_income_statement(&text, &mut statement),
            StatementKind::CashFlow => self.parse_cash_flow(&text, &mut statement),
        }

        if statement.is_empty() {
            statement.extraction_error = Some(nothing_extracted(kind));
        } else {
            debug!(
                "Line-pattern extraction found {} items for {}",
                statement.item_count(),
                kind.display_name()
            );
        }
        statement
    }
}

/// First two distinct four-digit years within the first ten lines, in
/// order of appearance; both or neither.
fn header_years(text: &str) -> (Option<i32>, Option<i32>) {
    let mut years: Vec<i32> = Vec::new();
    for line in text.lines().take(10) {
        for found in YEAR.find_iter(line) {
            let Ok(year) = found.as_str().parse::<i32>() else { continue };
            if !years.contains(&year) {
                years.push(year);
            }
            if years.len() == 2 {
                return (Some(years[0]), Some(years[1]));
            }
        }
    }
    (None, None)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    fn extract(kind: StatementKind, text: &str) -> ExtractedStatement {
        let page = Page::from_text(text);
        LinePatternExtractor::default().extract(kind, &[&page])
    }

    const BALANCE_SHEET_TEXT: &str = "\
Statement of Financial Position
As at June 30 (Rupees in thousand) 2024 2023
ASSETS
Property and equipment 300 280
Cash and bank balances 200 170
Total Assets 500 450
LIABILITIES
Trade and other payables 200 180
Total Liabilities 200 180
EQUITY
Share capital 100 100
Retained earnings 200 170
Total Equity 300 270";

    #[test]
    fn test_balance_sheet_buckets_follow_headers() {
        let statement = extract(StatementKind::BalanceSheet, BALANCE_SHEET_TEXT);
        assert!(statement.extraction_error.is_none());
        assert_eq!(statement.current_year, Some(2024));
        assert_eq!(statement.previous_year, Some(2023));

        let assets = statement.section("assets").unwrap();
        assert_eq!(
            assets.get("Cash and bank balances").unwrap().current_value,
            dec("200")
        );
        assert_eq!(assets.get("Total Assets").unwrap().previous_value, dec("450"));

        let equity = statement.section("equity").unwrap();
        assert!(equity.get("Share capital").is_some());
        assert!(equity.get("Retained earnings").is_some());

        let liabilities = statement.section("liabilities").unwrap();
        assert!(liabilities.get("Trade and other payables").is_some());
    }

    #[test]
    fn test_items_before_first_header_are_dropped() {
        let text = "\
Report header 2024 2023
Stray numbers row 100 90
ASSETS
Cash and bank balances 200 170";
        let statement = extract(StatementKind::BalanceSheet, text);
        let assets = statement.section("assets").unwrap();
        assert_eq!(assets.len(), 1);
        assert!(assets.get("Stray numbers row").is_none());
    }

    #[test]
    fn test_totals_pass_files_by_wording() {
        // The header machine is still in EQUITY when the liabilities total
        // appears; the totals pass files it correctly anyway.
        let text = "\
Heading 2024 2023
EQUITY
Share capital 100 100
Total Liabilities 200 180";
        let statement = extract(StatementKind::BalanceSheet, text);
        let liabilities = statement.section("liabilities").unwrap();
        assert_eq!(
            liabilities.get("Total Liabilities").unwrap().current_value,
            dec("200")
        );
    }

    #[test]
    fn test_short_and_uppercase_labels_rejected() {
        let text = "\
Heading 2024 2023
ASSETS
Ab 100 90
EBITDA 500 450
Cash and bank balances 200 170";
        let statement = extract(StatementKind::BalanceSheet, text);
        let assets = statement.section("assets").unwrap();
        assert_eq!(assets.len(), 1);
        assert!(assets.get("Cash and bank balances").is_some());
    }

    #[test]
    fn test_income_statement_single_bucket() {
        let text = "\
Statement of Profit or Loss
(Rupees in thousand) 2024 2023
Revenue from contracts 1,000 900
Cost of sales (600) (540)
Gross profit 400 360";
        let statement = extract(StatementKind::IncomeStatement, text);
        let items = statement.section("line_items").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items.get("Cost of sales").unwrap().current_value, dec("-600"));
        assert_eq!(items.get("Gross profit").unwrap().previous_value, dec("360"));
    }

    #[test]
    fn test_cash_flow_defaults_to_operating_and_switches() {
        let text = "\
Statement of Cash Flows
(Rupees in thousand) 2024 2023
Cash generated from operations 500 450
Taxes paid (50) (40)
Cash flows from investing activities
Purchase of equipment (200) (150)
Net cash used in financing activities
Dividends paid (100) (90)";
        let statement = extract(StatementKind::CashFlow, text);
        assert!(statement.section("operating_activities").unwrap().get("Taxes paid").is_some());
        assert!(statement
            .section("investing_activities")
            .unwrap()
            .get("Purchase of equipment")
            .is_some());
        assert!(statement
            .section("financing_activities")
            .unwrap()
            .get("Dividends paid")
            .is_some());
    }

    #[test]
    fn test_no_pages_sets_error() {
        let statement = LinePatternExtractor::default().extract(StatementKind::BalanceSheet, &[]);
        assert_eq!(
            statement.extraction_error.as_deref(),
            Some("balance sheet pages not found")
        );
        assert!(statement.is_empty());
    }

    #[test]
    fn test_nothing_extracted_sets_error() {
        let page = Page::from_text("Narrative page without any statement rows");
        let statement =
            LinePatternExtractor::default().extract(StatementKind::IncomeStatement, &[&page]);
        assert_eq!(
            statement.extraction_error.as_deref(),
            Some("no line items extracted from income statement pages")
        );
    }

    #[test]
    fn test_header_years_first_two_distinct() {
        let (current, previous) = header_years("Quarter ended 2024 compared with 2024 and 2023");
        assert_eq!(current, Some(2024));
        assert_eq!(previous, Some(2023));

        let (current, previous) = header_years("only 2024 here");
        assert_eq!(current, None);
        assert_eq!(previous, None);
    }
}
