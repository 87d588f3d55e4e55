//! Accounting-identity validation and confidence scoring.
//!
//! Each statement is scored as the fraction of independent checks passed.
//! The validator never fails: a statement with nothing extracted simply
//! scores near-zero confidence and lists concrete issues.

use rust_decimal::Decimal;

use crate::models::config::ValidationConfig;
use crate::models::statement::{ExtractedStatement, ExtractionResult, YearColumn};
use crate::models::validation::{StatementValidation, ValidationReport};

const TOTAL_ASSETS_KEYWORDS: &[&str] = &["total asset"];
const TOTAL_LIABILITIES_KEYWORDS: &[&str] = &["total liabilit"];
const TOTAL_EQUITY_KEYWORDS: &[&str] = &["total equity", "equity"];

const REVENUE_KEYWORDS: &[&str] = &["revenue", "sales"];
const COST_OF_SALES_KEYWORDS: &[&str] = &["cost of sales"];
const GROSS_PROFIT_KEYWORDS: &[&str] = &["gross profit"];
const NET_PROFIT_KEYWORDS: &[&str] = &["profit after", "profit for the year", "net income"];

/// Concepts every balance sheet must cover somewhere in its buckets.
const REQUIRED_BALANCE_CONCEPTS: &[&str] = &["property", "cash", "equity", "share capital"];
/// Concepts every income statement must cover.
const REQUIRED_INCOME_CONCEPTS: &[&str] = &["revenue", "profit", "expense"];

const BALANCE_VALIDITY_THRESHOLD: f32 = 0.70;
const INCOME_VALIDITY_THRESHOLD: f32 = 0.60;
const OVERALL_VALIDITY_THRESHOLD: f32 = 0.60;

/// Cross-checks extracted statements against accounting identities and
/// required-field coverage.
#[derive(Debug, Clone)]
pub struct StatementValidator {
    tolerance: Decimal,
}

impl StatementValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            tolerance: config.tolerance,
        }
    }

    /// Validate all three statements and combine the report.
    pub fn validate(&self, extraction: &ExtractionResult) -> ValidationReport {
        let balance_sheet = self.validate_balance_sheet(&extraction.balance_sheet);
        let income_statement = self.validate_income_statement(&extraction.income_statement);
        let cash_flow = self.validate_cash_flow(&extraction.cash_flow);

        let mut all_issues = Vec::new();
        all_issues.extend(balance_sheet.issues.iter().map(|i| format!("BS: {i}")));
        all_issues.extend(income_statement.issues.iter().map(|i| format!("IS: {i}")));
        all_issues.extend(cash_flow.issues.iter().map(|i| format!("CF: {i}")));

        let overall_confidence =
            (balance_sheet.confidence + income_statement.confidence + cash_flow.confidence) / 3.0;

        ValidationReport {
            balance_sheet,
            income_statement,
            cash_flow,
            all_issues,
            overall_confidence,
            overall_valid: overall_confidence >= OVERALL_VALIDITY_THRESHOLD,
        }
    }

    /// Balance-sheet checks: the accounting identity per year column, when
    /// all three totals resolve, plus required-concept coverage.
    pub fn validate_balance_sheet(&self, statement: &ExtractedStatement) -> StatementValidation {
        let mut issues = Vec::new();
        let mut passed = 0u32;
        let mut total = 0u32;

        let assets = statement.section("assets");
        let liabilities = statement.section("liabilities");
        let equity = statement.section("equity");

        for (column, label) in [
            (YearColumn::Current, "Current year"),
            (YearColumn::Previous, "Previous year"),
        ] {
            let total_assets = assets.and_then(|s| s.value_matching(TOTAL_ASSETS_KEYWORDS, column));
            let total_liabilities =
                liabilities.and_then(|s| s.value_matching(TOTAL_LIABILITIES_KEYWORDS, column));
            let total_equity = equity.and_then(|s| s.value_matching(TOTAL_EQUITY_KEYWORDS, column));

            let (Some(reported), Some(liab), Some(eq)) =
                (total_assets, total_liabilities, total_equity)
            else {
                continue;
            };
            total += 1;
            let calculated = liab + eq;
            if self.is_close(reported, calculated) {
                passed += 1;
            } else {
                let diff = (reported - calculated).abs();
                issues.push(format!(
                    "{label}: Assets ({reported}) != Liabilities + Equity ({calculated}), diff: {diff}"
                ));
            }
        }

        total += REQUIRED_BALANCE_CONCEPTS.len() as u32;
        for concept in REQUIRED_BALANCE_CONCEPTS {
            let covered = [assets, liabilities, equity]
                .iter()
                .flatten()
                .any(|section| section.has_fragment(concept));
            if covered {
                passed += 1;
            } else {
                issues.push(format!("Missing required field: {concept}"));
            }
        }

        finish(passed, total, issues, BALANCE_VALIDITY_THRESHOLD)
    }

    /// Income-statement checks: the gross-profit identity, required
    /// concepts, revenue sign, and net-profit presence.
    pub fn validate_income_statement(&self, statement: &ExtractedStatement) -> StatementValidation {
        let mut issues = Vec::new();
        let mut passed = 0u32;
        let mut total = 0u32;

        let items = statement.section("line_items");

        let revenue = items.and_then(|s| s.value_matching(REVENUE_KEYWORDS, YearColumn::Current));
        let cost_of_sales =
            items.and_then(|s| s.value_matching(COST_OF_SALES_KEYWORDS, YearColumn::Current));
        let gross_profit =
            items.and_then(|s| s.value_matching(GROSS_PROFIT_KEYWORDS, YearColumn::Current));
        let net_profit =
            items.and_then(|s| s.value_matching(NET_PROFIT_KEYWORDS, YearColumn::Current));

        // Cost of sales carries its extracted (negative) sign.
        if let (Some(rev), Some(cost), Some(gross)) = (revenue, cost_of_sales, gross_profit) {
            total += 1;
            let calculated = rev + cost;
            if self.is_close(calculated, gross) {
                passed += 1;
            } else {
                let diff = (calculated - gross).abs();
                issues.push(format!(
                    "Gross profit mismatch: Revenue ({rev}) + Cost of sales ({cost}) = {calculated}, but reported {gross}, diff: {diff}"
                ));
            }
        }

        total += REQUIRED_INCOME_CONCEPTS.len() as u32;
        for concept in REQUIRED_INCOME_CONCEPTS {
            if items.is_some_and(|s| s.has_fragment(concept)) {
                passed += 1;
            } else {
                issues.push(format!("Missing required field: {concept}"));
            }
        }

        if let Some(rev) = revenue {
            total += 1;
            if rev > Decimal::ZERO {
                passed += 1;
            } else {
                issues.push(format!("Revenue should be positive, got: {rev}"));
            }
        }

        // Presence check only: a resolvable net-profit concept earns a
        // unit, a missing one is reported without weighing the score.
        if net_profit.is_some() {
            total += 1;
            passed += 1;
        } else {
            issues.push("Net profit not found".to_string());
        }

        finish(passed, total, issues, INCOME_VALIDITY_THRESHOLD)
    }

    /// Cash-flow checks: three equal-weight non-empty-bucket checks; valid
    /// when at least two of three pass.
    pub fn validate_cash_flow(&self, statement: &ExtractedStatement) -> StatementValidation {
        let mut issues = Vec::new();
        let mut passed = 0u32;

        for (section, label) in [
            ("operating_activities", "Operating"),
            ("investing_activities", "Investing"),
            ("financing_activities", "Financing"),
        ] {
            if statement.section(section).is_some_and(|s| !s.is_empty()) {
                passed += 1;
            } else {
                issues.push(format!("{label} activities section empty"));
            }
        }

        StatementValidation {
            is_valid: passed >= 2,
            confidence: passed as f32 / 3.0,
            issues,
        }
    }

    /// Tolerance rule: both zero compare equal; exactly one zero compares
    /// absolutely (< 1000 units of the declared scale); otherwise the
    /// relative difference against the larger magnitude must stay within
    /// the configured tolerance.
    fn is_close(&self, a: Decimal, b: Decimal) -> bool {
        if a.is_zero() && b.is_zero() {
            return true;
        }
        if a.is_zero() || b.is_zero() {
            return (a - b).abs() < Decimal::ONE_THOUSAND;
        }
        let relative = (a - b).abs() / a.abs().max(b.abs());
        relative <= self.tolerance
    }
}

impl Default for StatementValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

/// Confidence = passed/total; valid iff the threshold is met.
fn finish(passed: u32, total: u32, issues: Vec<String>, threshold: f32) -> StatementValidation {
    let confidence = if total > 0 {
        passed as f32 / total as f32
    } else {
        0.0
    };
    StatementValidation {
        is_valid: confidence >= threshold,
        confidence,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::models::statement::{LineItem, StatementKind};

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    fn validator() -> StatementValidator {
        StatementValidator::default()
    }

    fn balance_sheet(rows: &[(&str, &str, &str, &str)]) -> ExtractedStatement {
        let mut statement = ExtractedStatement::empty(StatementKind::BalanceSheet);
        for (section, name, current, previous) in rows {
            statement.insert_into(section, LineItem::new(*name, dec(current), dec(previous)));
        }
        statement
    }

    fn full_balance_sheet() -> ExtractedStatement {
        balance_sheet(&[
            ("assets", "Property, plant and equipment", "60", "55"),
            ("assets", "Cash and bank balances", "40", "35"),
            ("assets", "Total Assets", "100", "90"),
            ("liabilities", "Total Liabilities", "60", "54"),
            ("equity", "Share capital", "20", "20"),
            ("equity", "Total Equity", "40", "36"),
        ])
    }

    #[test]
    fn test_balance_identity_passes() {
        let report = validator().validate_balance_sheet(&full_balance_sheet());
        assert!(report.is_valid);
        assert!((report.confidence - 1.0).abs() < f32::EPSILON);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_balance_identity_failure_names_values_and_diff() {
        let mut statement = full_balance_sheet();
        statement.insert_into("equity", LineItem::new("Total Equity", dec("30"), dec("36")));
        let report = validator().validate_balance_sheet(&statement);
        // 5 of 6 checks pass (previous-year identity still holds).
        assert!((report.confidence - 5.0 / 6.0).abs() < 1e-6);
        let issue = &report.issues[0];
        assert!(issue.contains("100"), "issue should name reported assets: {issue}");
        assert!(issue.contains("90"), "issue should name the calculated sum: {issue}");
        assert!(issue.contains("diff: 10"), "issue should name the diff: {issue}");
    }

    #[test]
    fn test_missing_coverage_caps_confidence_despite_identity() {
        // Identity holds for both years, but property and share-capital
        // coverage is missing: 4 of 6 units stays below the 0.70 line.
        let statement = balance_sheet(&[
            ("assets", "Cash and bank balances", "100", "90"),
            ("assets", "Total Assets", "100", "90"),
            ("liabilities", "Total Liabilities", "60", "54"),
            ("equity", "Total Equity", "40", "36"),
        ]);
        let report = validator().validate_balance_sheet(&statement);
        assert!(!report.is_valid);
        assert!((report.confidence - 4.0 / 6.0).abs() < 1e-6);
        assert!(report.issues.iter().any(|i| i.contains("share capital")));
        assert!(report.issues.iter().any(|i| i.contains("property")));
    }

    #[test]
    fn test_tolerance_boundary() {
        let v = validator();
        // 0.9% difference is close under the default 1% tolerance.
        assert!(v.is_close(Decimal::from(100), Decimal::from_str("100.9").unwrap()));
        // 2% difference is not.
        assert!(!v.is_close(Decimal::from(100), Decimal::from(102)));
        // Zero against zero is equal; one zero compares absolutely.
        assert!(v.is_close(Decimal::ZERO, Decimal::ZERO));
        assert!(v.is_close(Decimal::ZERO, Decimal::from(999)));
        assert!(!v.is_close(Decimal::ZERO, Decimal::from(1000)));
    }

    #[test]
    fn test_income_statement_valid() {
        let mut statement = ExtractedStatement::empty(StatementKind::IncomeStatement);
        for (name, current) in [
            ("Revenue from contracts", "1000"),
            ("Cost of sales", "-600"),
            ("Gross profit", "400"),
            ("Administrative expenses", "-100"),
            ("Profit after taxation", "300"),
        ] {
            statement.insert_into("line_items", LineItem::new(name, dec(current), None));
        }
        let report = validator().validate_income_statement(&statement);
        assert!(report.is_valid);
        assert!((report.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_income_gross_profit_mismatch_reported() {
        let mut statement = ExtractedStatement::empty(StatementKind::IncomeStatement);
        for (name, current) in [
            ("Revenue from contracts", "1000"),
            ("Cost of sales", "-600"),
            ("Gross profit", "500"),
        ] {
            statement.insert_into("line_items", LineItem::new(name, dec(current), None));
        }
        let report = validator().validate_income_statement(&statement);
        assert!(report.issues.iter().any(|i| i.contains("Gross profit mismatch")));
    }

    #[test]
    fn test_negative_revenue_is_an_issue_not_a_failure() {
        let mut statement = ExtractedStatement::empty(StatementKind::IncomeStatement);
        statement.insert_into("line_items", LineItem::new("Revenue", dec("-10"), None));
        statement.insert_into("line_items", LineItem::new("Profit after taxation", dec("5"), None));
        statement.insert_into("line_items", LineItem::new("Operating expenses", dec("-3"), None));
        let report = validator().validate_income_statement(&statement);
        assert!(report.issues.iter().any(|i| i.contains("Revenue should be positive")));
        // 4 of 5 units still clears the 0.60 line.
        assert!(report.is_valid);
    }

    #[test]
    fn test_cash_flow_two_of_three_sections() {
        let mut statement = ExtractedStatement::empty(StatementKind::CashFlow);
        statement.insert_into(
            "operating_activities",
            LineItem::new("Cash generated from operations", dec("500"), dec("450")),
        );
        statement.insert_into(
            "investing_activities",
            LineItem::new("Purchase of equipment", dec("-200"), dec("-150")),
        );
        let report = validator().validate_cash_flow(&statement);
        assert!(report.is_valid);
        assert!((report.confidence - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(report.issues, vec!["Financing activities section empty".to_string()]);
    }

    #[test]
    fn test_empty_cash_flow_invalid() {
        let statement = ExtractedStatement::empty(StatementKind::CashFlow);
        let report = validator().validate_cash_flow(&statement);
        assert!(!report.is_valid);
        assert_eq!(report.confidence, 0.0);
        assert_eq!(report.issues.len(), 3);
    }
}
