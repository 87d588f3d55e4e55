//! Company and report identification from early-page text.
//!
//! Matching is keyword based: an entity is recognized by the presence of a
//! known name/ticker fragment in a page's text. Secondary signals (report
//! kind, quarter, fiscal period) are read from the combined text of the
//! scanned pages. No entity match falls back to an explicit unknown
//! fingerprint, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::models::config::IdentifyConfig;
use crate::models::fingerprint::{DocumentFingerprint, Quarter, ReportKind};

lazy_static! {
    /// Quarter patterns in priority order Q1 -> Q4; the first match wins.
    static ref QUARTER_PATTERNS: [(Quarter, Regex); 4] = [
        (Quarter::Q1, Regex::new(r"(?i)\bQ1\b|first quarter|1st quarter").unwrap()),
        (Quarter::Q2, Regex::new(r"(?i)\bQ2\b|second quarter|2nd quarter").unwrap()),
        (Quarter::Q3, Regex::new(r"(?i)\bQ3\b|third quarter|3rd quarter").unwrap()),
        (Quarter::Q4, Regex::new(r"(?i)\bQ4\b|fourth quarter|4th quarter").unwrap()),
    ];

    /// Fiscal period label, e.g. "2023-2024" or "2023 24".
    static ref FISCAL_PERIOD: Regex = Regex::new(r"20\d{2}[-\s]20?\d{2}").unwrap();
}

/// A known reporting entity, recognized by lowercase text fragments.
#[derive(Debug, Clone)]
pub struct EntityProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Full legal name.
    pub name: String,
    /// Name/ticker fragments that identify the entity in page text.
    pub fragments: Vec<String>,
}

impl EntityProfile {
    pub fn new(symbol: &str, name: &str, fragments: &[&str]) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            fragments: fragments.iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    fn matches(&self, text_lower: &str) -> bool {
        self.fragments.iter().any(|f| text_lower.contains(f.as_str()))
    }
}

/// Registry of entities the identifier can recognize.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<EntityProfile>,
}

impl EntityRegistry {
    pub fn new(entities: Vec<EntityProfile>) -> Self {
        Self { entities }
    }

    /// Add an entity profile.
    pub fn with_entity(mut self, entity: EntityProfile) -> Self {
        self.entities.push(entity);
        self
    }

    fn find(&self, text_lower: &str) -> Option<&EntityProfile> {
        self.entities.iter().find(|e| e.matches(text_lower))
    }
}

impl Default for EntityRegistry {
    /// PSX cement-sector issuers covered by the default deployment.
    fn default() -> Self {
        Self::new(vec![
            EntityProfile::new(
                "FCCL",
                "Fauji Cement Company Limited",
                &["fauji cement", "fccl"],
            ),
            EntityProfile::new(
                "MLCF",
                "Maple Leaf Cement Factory Limited",
                &["maple leaf cement", "mlcf"],
            ),
        ])
    }
}

/// Identifies the reporting entity and period metadata for a document.
#[derive(Debug, Clone, Default)]
pub struct CompanyIdentifier {
    registry: EntityRegistry,
    config: IdentifyConfig,
}

impl CompanyIdentifier {
    pub fn new(registry: EntityRegistry, config: IdentifyConfig) -> Self {
        Self { registry, config }
    }

    /// Scan the first pages for an entity fingerprint and period metadata.
    pub fn identify(&self, document: &Document) -> DocumentFingerprint {
        let mut combined = String::new();
        let mut entity: Option<&EntityProfile> = None;

        for page in document.pages.iter().take(self.config.scan_pages) {
            let Some(text) = page.text.as_deref() else { continue };
            let text_lower = text.to_lowercase();
            if entity.is_none() {
                entity = self.registry.find(&text_lower);
                if let Some(profile) = entity {
                    debug!("Matched entity {}", profile.symbol);
                }
            }
            combined.push_str(&text_lower);
            combined.push('\n');
        }

        let Some(profile) = entity else {
            debug!("No known entity fragment in scanned pages");
            return DocumentFingerprint::unknown();
        };

        DocumentFingerprint {
            entity_symbol: Some(profile.symbol.clone()),
            entity_name: Some(profile.name.clone()),
            report_kind: infer_report_kind(&combined),
            quarter: extract_quarter(&combined),
            fiscal_period: extract_fiscal_period(&combined),
        }
    }
}

fn infer_report_kind(text_lower: &str) -> ReportKind {
    if text_lower.contains("annual report") {
        ReportKind::Annual
    } else if text_lower.contains("condensed interim") {
        ReportKind::Quarterly
    } else {
        ReportKind::Unknown
    }
}

/// First matching quarter pattern in priority order Q1 -> Q4; only one
/// quarter is ever returned even if several appear.
fn extract_quarter(text: &str) -> Option<Quarter> {
    QUARTER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(quarter, _)| *quarter)
}

fn extract_fiscal_period(text: &str) -> Option<String> {
    FISCAL_PERIOD.find(text).map(|m| m.as_str().replace(' ', "-"))
}
