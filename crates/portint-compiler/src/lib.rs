//! portint compiler: expression source to `Program`.
//!
//! Pipeline:
//! - `parser` - lexer, recursive-descent parser, untyped AST
//! - `analyze` - name resolution, literal typing, promotion, usage checks
//! - `lower` - stack instruction emission
//! - `diagnostics` - error collection and rendering

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod lower;
pub mod parser;

#[cfg(test)]
mod lib_tests;

use portint_core::Program;

pub use analyze::Checked;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Span};
pub use parser::ast::Root;

/// Errors that can occur during compilation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input nested too deeply.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("parsing failed with {} errors", .0.error_count())]
    ParseError(Diagnostics),

    #[error("type checking failed with {} errors", .0.error_count())]
    CheckError(Diagnostics),

    #[error(transparent)]
    TooManyLocals(#[from] portint_core::TooManyLocals),
}

impl Error {
    /// Diagnostics to render, if the failure has any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::ParseError(d) | Self::CheckError(d) => Some(d),
            Self::RecursionLimitExceeded | Self::TooManyLocals(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compilation entry point with configurable limits.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'s> {
    source: &'s str,
    recursion_limit: u32,
}

impl<'s> Compiler<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            recursion_limit: parser::DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(&self) -> Result<Root> {
        let result = parser::Parser::new(self.source)
            .with_recursion_limit(self.recursion_limit)
            .parse()?;
        if result.diagnostics.has_errors() {
            return Err(Error::ParseError(result.diagnostics));
        }
        Ok(result.root)
    }

    pub fn check(&self) -> Result<Checked> {
        let root = self.parse()?;
        let (checked, diagnostics) = analyze::Checker::new().check(&root);
        if diagnostics.has_errors() {
            return Err(Error::CheckError(diagnostics));
        }
        Ok(checked)
    }

    pub fn compile(&self) -> Result<Program> {
        let checked = self.check()?;
        Ok(lower::lower(&checked)?)
    }
}

/// Compile `source` with default limits.
pub fn compile(source: &str) -> Result<Program> {
    Compiler::new(source).compile()
}
