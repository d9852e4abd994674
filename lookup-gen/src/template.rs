//! Program Template
//!
//! The Lox skeleton of the benchmark with two substitution points:
//! `{{ var_def }}` for the declaration block and `{{ cnt }}` for the loop
//! bound.

use std::fmt;

use tracing::debug;

use crate::{GenError, GenResult};

/// Placeholder for the declaration block.
pub const VAR_DEF: &str = "{{ var_def }}";

/// Placeholder for the repetition count.
pub const CNT: &str = "{{ cnt }}";

const PRINT_VAL_COMMENTED: &str = "// print val;";
const PRINT_VAL: &str = "print val;";

const LOX_SKELETON: &str = r#"
fun get_adder() {
    var this_val = 0;
    // huge amount of var definitions
{{ var_def }}
    // end of var definition
    fun adder() {
        this_val = this_val + 1;
        return this_val;
    }
    return adder;
}

var cnt = {{ cnt }};
var adder = get_adder();
for (var i = 0; i < cnt; i = i + 1) {
    var val = 0;
    for (var j = 0; j < cnt; j = j + 1) {
        val = adder();
    }
    // print val;
}
"#;

/// A repetition count that is representable as a Lox integer literal.
///
/// Lox numbers are doubles, so only integers up to 2^53 survive the
/// round trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountLiteral(u64);

impl CountLiteral {
    /// Largest count that a Lox number represents exactly.
    pub const MAX: u64 = 1 << 53;

    pub fn new(count: u64) -> GenResult<Self> {
        if count > Self::MAX {
            return Err(GenError::Config(format!(
                "count {} exceeds the largest exact Lox integer ({})",
                count,
                Self::MAX
            )));
        }
        Ok(Self(count))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CountLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A program skeleton with declaration and count placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::lox()
    }
}

impl Template {
    /// Creates a template from arbitrary skeleton text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The built-in lookup benchmark skeleton.
    pub fn lox() -> Self {
        Self::new(LOX_SKELETON)
    }

    /// Returns the skeleton text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Enables the per-iteration `print val;` statement.
    pub fn with_print_val(self) -> GenResult<Self> {
        if !self.text.contains(PRINT_VAL_COMMENTED) {
            return Err(GenError::Template(format!(
                "no `{}` line to enable",
                PRINT_VAL_COMMENTED
            )));
        }
        Ok(Self::new(self.text.replace(PRINT_VAL_COMMENTED, PRINT_VAL)))
    }

    /// Verifies that both substitution points are present.
    pub fn check(&self) -> GenResult<()> {
        for placeholder in [VAR_DEF, CNT] {
            if !self.text.contains(placeholder) {
                return Err(GenError::Template(format!(
                    "missing placeholder `{}`",
                    placeholder
                )));
            }
        }
        Ok(())
    }

    /// Substitutes the declaration block and the count.
    ///
    /// The block is inserted verbatim apart from its final newline, since
    /// the placeholder sits on a line of its own.
    pub fn render(&self, declarations: &str, count: u64) -> GenResult<String> {
        self.check()?;
        let count = CountLiteral::new(count)?;

        let block = declarations.strip_suffix('\n').unwrap_or(declarations);
        let rendered = self
            .text
            .replace(CNT, &count.to_string())
            .replace(VAR_DEF, block);

        debug!("Rendered template ({} bytes, cnt = {})", rendered.len(), count);
        Ok(rendered)
    }
}
