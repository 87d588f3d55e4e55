//! Category keyword tables and section-tracking states.
//!
//! Categorization is a static, ordered table of (bucket, keyword-set)
//! pairs evaluated in table order, which makes the tie-break explicit: a
//! label matching both an asset and a liability keyword files under
//! assets, because the assets row is checked first.

/// Balance-sheet bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceBucket {
    Assets,
    Liabilities,
    Equity,
}

impl BalanceBucket {
    /// Section name this bucket maps to.
    pub fn section_name(&self) -> &'static str {
        match self {
            BalanceBucket::Assets => "assets",
            BalanceBucket::Liabilities => "liabilities",
            BalanceBucket::Equity => "equity",
        }
    }
}

/// Cash-flow activity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Operating,
    Investing,
    Financing,
}

impl Activity {
    pub fn section_name(&self) -> &'static str {
        match self {
            Activity::Operating => "operating_activities",
            Activity::Investing => "investing_activities",
            Activity::Financing => "financing_activities",
        }
    }
}

/// Ordered categorization table for balance-sheet rows.
pub const BALANCE_CATEGORIES: &[(BalanceBucket, &[&str])] = &[
    (
        BalanceBucket::Assets,
        &[
            "asset",
            "property",
            "equipment",
            "investment",
            "stock",
            "trade debt",
            "receivable",
            "cash",
            "bank",
            "inventory",
            "goodwill",
            "intangible",
            "deposit",
            "advance",
        ],
    ),
    (
        BalanceBucket::Liabilities,
        &[
            "liability",
            "liabilities",
            "payable",
            "loan",
            "borrowing",
            "debt",
            "provision",
            "tax payable",
            "accrued",
            "creditor",
        ],
    ),
    (
        BalanceBucket::Equity,
        &[
            "capital",
            "reserve",
            "equity",
            "shareholder",
            "retained",
            "surplus",
            "share premium",
        ],
    ),
];

/// File a row label under the first bucket whose keyword set matches.
pub fn categorize_balance_item(label: &str) -> Option<BalanceBucket> {
    let label_lower = label.to_lowercase();
    BALANCE_CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| label_lower.contains(k)))
        .map(|(bucket, _)| *bucket)
}

/// Bucket implied by a digit-free section header line.
pub fn balance_header_bucket(line_lower: &str) -> Option<BalanceBucket> {
    if line_lower.contains("asset") {
        Some(BalanceBucket::Assets)
    } else if line_lower.contains("liabilit") {
        Some(BalanceBucket::Liabilities)
    } else if line_lower.contains("equity")
        || line_lower.contains("capital and reserves")
        || line_lower.contains("share capital")
    {
        Some(BalanceBucket::Equity)
    } else {
        None
    }
}

/// Bucket implied by a "Total ..." summary row's own wording.
pub fn total_bucket(label_lower: &str) -> Option<BalanceBucket> {
    if label_lower.contains("asset") {
        Some(BalanceBucket::Assets)
    } else if label_lower.contains("liabilit") {
        Some(BalanceBucket::Liabilities)
    } else if label_lower.contains("equity") {
        Some(BalanceBucket::Equity)
    } else {
        None
    }
}

/// Activity switch implied by any cash-flow line (line-pattern strategy):
/// data rows carrying a transition keyword switch the bucket too.
pub fn activity_transition(text_lower: &str) -> Option<Activity> {
    if text_lower.contains("investing") {
        Some(Activity::Investing)
    } else if text_lower.contains("financing") {
        Some(Activity::Financing)
    } else if text_lower.contains("operating") {
        Some(Activity::Operating)
    } else {
        None
    }
}

/// Activity marker row in a grid ("cash flows from investing activities").
/// Marker rows are consumed, no value is recorded for them.
pub fn activity_marker(label_lower: &str) -> Option<Activity> {
    if label_lower.contains("investing activities") {
        Some(Activity::Investing)
    } else if label_lower.contains("financing activities") {
        Some(Activity::Financing)
    } else if label_lower.contains("operating activities") {
        Some(Activity::Operating)
    } else {
        None
    }
}
