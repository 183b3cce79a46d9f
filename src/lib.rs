//! sqlpretty - canonical pretty-printing for PostgreSQL-flavored SQL
//!
//! Parses SQL text and renders it back in one deterministic style: keywords
//! uppercased, major clauses on their own indented lines, tokens separated
//! by single spaces. Output depends only on the parsed tree, never on the
//! whitespace or casing of the input.
//!
//! Node kinds the printer has no rule for are skipped and reported through
//! [`Rendered::unrecognized`] rather than failing the render; the fragment
//! they would have produced is simply missing from the output. Use
//! [`render_strict`] to turn the first such gap into an error instead.

pub mod ast;
pub mod error;
pub mod formatter;
pub mod parser;

pub use error::{Error, Result};
pub use formatter::{render_sql, Rendered};

/// Render SQL text canonically, tolerating unformattable node kinds
pub fn render(input: &str) -> Result<String> {
    Ok(render_sql(input)?.text)
}

/// Render SQL text, failing if any node kind has no formatting rule
pub fn render_strict(input: &str) -> Result<String> {
    let rendered = render_sql(input)?;
    if let Some(gap) = rendered.unrecognized.first() {
        return Err(Error::UnrecognizedNode {
            kind: gap.kind.to_string(),
        });
    }
    Ok(rendered.text)
}

/// Check if SQL text is already in canonical form
pub fn check(input: &str) -> Result<bool> {
    let rendered = render_sql(input)?;
    Ok(rendered.text == input)
}
