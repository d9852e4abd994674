//! Identifier Generation
//!
//! Enumerates the identifier space `letters^letter_slots × 0..digits` in
//! odometer order: the leftmost slot varies slowest, the trailing digit
//! fastest. Every tuple is distinct, so no collision check is needed.

use std::fmt;

use tracing::debug;

use crate::{Config, GenError, GenResult};

/// A generated local variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the Lox declaration binding the identifier to its own name.
    pub fn declaration(&self) -> String {
        format!("var {0} = \"{0}\";", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Iterator over every identifier of a configuration.
#[derive(Debug, Clone)]
pub struct Identifiers<'a> {
    letters: &'a [char],
    digits: u32,
    slots: Vec<usize>,
    digit: u32,
    remaining: usize,
}

impl<'a> Identifiers<'a> {
    /// Creates the iterator. Fails if the configuration is invalid.
    pub fn new(config: &'a Config) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            letters: &config.letters,
            digits: config.digits,
            slots: vec![0; config.letter_slots],
            digit: 0,
            remaining: config.identifier_count()?,
        })
    }

    fn advance(&mut self) {
        self.digit += 1;
        if self.digit < self.digits {
            return;
        }
        self.digit = 0;
        for slot in self.slots.iter_mut().rev() {
            *slot += 1;
            if *slot < self.letters.len() {
                return;
            }
            *slot = 0;
        }
    }
}

impl Iterator for Identifiers<'_> {
    type Item = Identifier;

    fn next(&mut self) -> Option<Identifier> {
        if self.remaining == 0 {
            return None;
        }
        let mut name = String::with_capacity(self.slots.len() + 1);
        name.extend(self.slots.iter().map(|&i| self.letters[i]));
        // digits <= 10, so this is always a single decimal character
        name.push(char::from_digit(self.digit, 10).unwrap_or('0'));

        self.remaining -= 1;
        self.advance();
        Some(Identifier(name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Identifiers<'_> {}

/// Builds the indented declaration block, one statement per line.
pub fn declaration_block(config: &Config) -> GenResult<String> {
    let idents = Identifiers::new(config)?;
    let count = idents.len();

    // "    var xxx0 = \"xxx0\";\n"
    let line_len = config
        .letter_slots
        .checked_add(1)
        .and_then(|id_len| id_len.checked_mul(2))
        .and_then(|n| n.checked_add(15));
    let capacity = line_len
        .and_then(|len| len.checked_mul(count))
        .ok_or_else(|| GenError::Config("declaration block is too large".to_string()))?;
    let mut block = String::with_capacity(capacity);
    for ident in idents {
        block.push_str("    ");
        block.push_str(&ident.declaration());
        block.push('\n');
    }

    debug!("Built {} declarations ({} bytes)", count, block.len());
    Ok(block)
}
