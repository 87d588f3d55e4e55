//! Source-adapter boundary types.
//!
//! The text/table source adapter (a collaborator outside this crate)
//! supplies, per page, raw extracted text and zero or more detected cell
//! grids. These types are the input contract of the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, Result};

/// A detected table: rows of nullable cell strings.
pub type TableGrid = Vec<Vec<Option<String>>>;

/// One page of a source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Extracted plain text, if the page had any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Detected tables on the page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableGrid>,
}

impl Page {
    /// Page carrying text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tables: Vec::new(),
        }
    }

    /// Attach a detected table grid.
    pub fn with_table(mut self, table: TableGrid) -> Self {
        self.tables.push(table);
        self
    }
}

/// A decoded source document: the unit of processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Pages in reading order.
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Decode a document from a JSON page dump.
    ///
    /// A dump that cannot be decoded at all is the one fatal failure in
    /// this crate; everything downstream degrades softly.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Document =
            serde_json::from_str(json).map_err(|e| DocumentError::Decode(e.to_string()))?;
        Ok(document)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
