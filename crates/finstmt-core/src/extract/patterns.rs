//! Shared regex patterns for statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Four-digit year of this century.
    pub static ref YEAR: Regex = Regex::new(r"20\d{2}").unwrap();

    /// Line item: label text followed by two numeric tokens (integer or
    /// parenthesized integer, optional thousands separators).
    /// Matches: "Property, plant and equipment 110,845,663 104,425,181".
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"^([A-Za-z][A-Za-z\s,&'\-]+?)\s+(\d{1,3}(?:,\d{3})*|\(\d{1,3}(?:,\d{3})*\))\s+(\d{1,3}(?:,\d{3})*|\(\d{1,3}(?:,\d{3})*\))(?:\s|$)"
    ).unwrap();

    /// Summary row: "Total ..." followed by two numeric tokens.
    pub static ref TOTAL_LINE: Regex = Regex::new(
        r"(Total\s+[A-Za-z\s]+|TOTAL\s+[A-Z\s]+)\s+(\d{1,3}(?:,\d{3})*)\s+(\d{1,3}(?:,\d{3})*)"
    ).unwrap();
}
