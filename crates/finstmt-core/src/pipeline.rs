//! Whole-document extraction pipeline.
//!
//! Wires identifier -> locator -> one section extractor per statement kind
//! -> validator. An atomic, side-effect-free transform: decoded pages in,
//! extraction result plus confidence report out. The caller decides whether
//! to persist or discard results based on the report.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{Document, Page};
use crate::error::{DocumentError, Result};
use crate::extract::{
    pages_not_found, LinePatternExtractor, SectionExtractor, TableGridExtractor,
};
use crate::identify::{CompanyIdentifier, EntityRegistry};
use crate::locate::{StatementLocator, StatementPages};
use crate::models::config::{PipelineConfig, StrategySelection};
use crate::models::statement::{
    ExtractedStatement, ExtractionMetadata, ExtractionResult, StatementKind,
};
use crate::models::validation::ValidationReport;
use crate::validate::StatementValidator;

/// Extraction plus its validation report: the unit handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedReport {
    pub extraction: ExtractionResult,
    pub validation: ValidationReport,
}

/// The whole-document pipeline.
pub struct StatementPipeline {
    identifier: CompanyIdentifier,
    locator: StatementLocator,
    line_extractor: LinePatternExtractor,
    grid_extractor: TableGridExtractor,
    validator: StatementValidator,
    strategy: StrategySelection,
}

impl StatementPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_registry(config, EntityRegistry::default())
    }

    /// Pipeline recognizing a custom entity registry.
    pub fn with_registry(config: PipelineConfig, registry: EntityRegistry) -> Self {
        Self {
            identifier: CompanyIdentifier::new(registry, config.identify.clone()),
            locator: StatementLocator::new(config.locator.clone()),
            line_extractor: LinePatternExtractor::new(&config.extraction),
            grid_extractor: TableGridExtractor::new(&config.extraction),
            validator: StatementValidator::new(&config.validation),
            strategy: config.extraction.strategy,
        }
    }

    /// Process one document end to end.
    ///
    /// Heuristic misses surface as `extraction_error` flags and low
    /// confidence; only a document with no pages at all is an error.
    pub fn process(&self, document: &Document) -> Result<ProcessedReport> {
        if document.pages.is_empty() {
            return Err(DocumentError::NoPages.into());
        }

        info!("Processing document with {} pages", document.page_count());

        let fingerprint = self.identifier.identify(document);
        let statement_pages = self.locator.locate(document);

        let balance_sheet =
            self.extract_kind(document, &statement_pages, StatementKind::BalanceSheet);
        let income_statement =
            self.extract_kind(document, &statement_pages, StatementKind::IncomeStatement);
        let cash_flow = self.extract_kind(document, &statement_pages, StatementKind::CashFlow);

        let extraction = ExtractionResult {
            fingerprint,
            balance_sheet,
            income_statement,
            cash_flow,
            metadata: ExtractionMetadata {
                page_count: document.page_count(),
                statement_pages,
            },
        };

        let validation = self.validator.validate(&extraction);
        info!(
            "Document processed with confidence {:.2} (valid: {})",
            validation.overall_confidence, validation.overall_valid
        );

        Ok(ProcessedReport {
            extraction,
            validation,
        })
    }

    /// Strategies in preference order for the configured selection.
    fn strategies(&self) -> Vec<&dyn SectionExtractor> {
        match self.strategy {
            StrategySelection::LinePattern => vec![&self.line_extractor],
            StrategySelection::TableGrid => vec![&self.grid_extractor],
            StrategySelection::Auto => vec![&self.grid_extractor, &self.line_extractor],
        }
    }

    fn extract_kind(
        &self,
        document: &Document,
        located: &StatementPages,
        kind: StatementKind,
    ) -> ExtractedStatement {
        let pages: Vec<&Page> = located
            .for_kind(kind)
            .iter()
            .take(kind.max_extraction_pages())
            .filter_map(|&index| document.pages.get(index))
            .collect();

        let mut first_attempt: Option<ExtractedStatement> = None;
        for strategy in self.strategies() {
            let statement = strategy.extract(kind, &pages);
            match &statement.extraction_error {
                None => {
                    debug!(
                        "Extracted {} with {} strategy",
                        kind.display_name(),
                        strategy.name()
                    );
                    return statement;
                }
                Some(error) => {
                    debug!(
                        "{} strategy yielded nothing for {}: {}",
                        strategy.name(),
                        kind.display_name(),
                        error
                    );
                    first_attempt.get_or_insert(statement);
                }
            }
        }

        // Every strategy errored; report the primary attempt.
        first_attempt
            .unwrap_or_else(|| ExtractedStatement::with_error(kind, pages_not_found(kind)))
    }
}
