//! Lox Lookup Benchmark Generator
//!
//! Writes a Lox program that stresses local variable resolution: a closure
//! declared next to tens of thousands of uniquely named locals, called
//! `cnt * cnt` times from two nested loops.
//!
//! # Pipeline
//!
//! 1. Validate the [`Config`]
//! 2. Enumerate identifiers ([`Identifiers`]) and build the declaration block
//! 3. Substitute the block and the count into the [`Template`]
//! 4. Write the rendered text to the output path in a single atomic step
//!
//! # Example
//!
//! ```rust,ignore
//! use lookup_gen::{render_program, Config};
//!
//! let config = Config { count: 3, ..Config::default() };
//! let program = render_program(&config)?;
//! assert!(program.contains("var cnt = 3;"));
//! ```

pub mod config;
pub mod ident;
pub mod render;
pub mod template;

pub use config::Config;
pub use ident::{declaration_block, Identifier, Identifiers};
pub use render::{generate, render_program, render_with_template, write_program, GenerateReport};
pub use template::{CountLiteral, Template};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating the benchmark program.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;
