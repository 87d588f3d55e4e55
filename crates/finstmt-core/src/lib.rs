//! Core library for financial statement extraction from scanned/typeset
//! company reports.
//!
//! This crate provides:
//! - Source boundary types (per-page text and detected table grids)
//! - Company/report identification from early-page text
//! - Statement page location from lexical signals
//! - Two interchangeable section extraction strategies (line-pattern and
//!   table-grid) sharing a number normalizer and category keyword tables
//! - Accounting-identity validation with a confidence score

pub mod document;
pub mod error;
pub mod extract;
pub mod identify;
pub mod locate;
pub mod models;
pub mod pipeline;
pub mod validate;

pub use document::{Document, Page, TableGrid};
pub use error::{DocumentError, FinstmtError, Result};
pub use extract::{normalize, LinePatternExtractor, SectionExtractor, TableGridExtractor};
pub use identify::{CompanyIdentifier, EntityProfile, EntityRegistry};
pub use locate::{StatementLocator, StatementPages};
pub use models::config::{PipelineConfig, StrategySelection};
pub use models::fingerprint::{DocumentFingerprint, Quarter, ReportKind};
pub use models::statement::{
    ExtractedStatement, ExtractionMetadata, ExtractionResult, LineItem, StatementKind,
    StatementSection, YearColumn,
};
pub use models::validation::{StatementValidation, ValidationReport};
pub use pipeline::{ProcessedReport, StatementPipeline};
pub use validate::StatementValidator;
