//! Output buffer with an indentation prefix
//!
//! Append-only text accumulator used by the printer. Tokens are emitted
//! verbatim (no escaping), normally with a single trailing space; line
//! breaks re-emit the running indentation prefix.

/// Default indentation width (2 spaces)
pub const INDENT_SIZE: usize = 2;

/// Emitter state
pub struct Emitter {
    output: String,
    unit: String,
    prefix: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::with_indent(INDENT_SIZE)
    }

    /// Emitter with a custom indentation width
    pub fn with_indent(width: usize) -> Self {
        Self {
            output: String::new(),
            unit: " ".repeat(width),
            prefix: String::new(),
        }
    }

    /// Append a token followed by a single space
    pub fn emit(&mut self, token: &str) {
        self.output.push_str(token);
        self.output.push(' ');
    }

    /// Append a token with no trailing space
    pub fn emit_bare(&mut self, token: &str) {
        self.output.push_str(token);
    }

    /// Append a newline plus the current indentation prefix
    pub fn break_line(&mut self) {
        self.output.push('\n');
        self.output.push_str(&self.prefix);
    }

    /// Grow the indentation prefix by one unit
    pub fn indent(&mut self) {
        self.prefix.push_str(&self.unit);
    }

    /// Collapse the indentation prefix entirely. This intentionally resets
    /// to column zero rather than popping a single level; clause rules pair
    /// every `indent` with a `dedent` at the same nesting depth, so the two
    /// behaviors only diverge on trees nested more than one level deep.
    pub fn dedent(&mut self) {
        self.prefix.clear();
    }

    /// Take the accumulated text
    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
