//! Formatting rules
//!
//! The canonical style produced by sqlpretty:
//! - Keywords: uppercase
//! - Indentation: 2 spaces (configurable width)
//! - Tokens: single-space separated, identifiers and literals verbatim
//! - Clauses: each major clause starts its own line, body indented one level

/// Convert a keyword to its canonical uppercase form
pub fn format_keyword(keyword: &str) -> String {
    keyword.to_uppercase()
}
