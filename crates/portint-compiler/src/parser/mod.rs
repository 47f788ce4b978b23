//! Lexer, parser state and grammar.
//!
//! Hand-written recursive descent over the token stream. Errors are
//! collected as diagnostics; a failing statement is skipped up to the next
//! `;` so later statements still get checked.

pub mod ast;
mod grammar;
pub mod lexer;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

use crate::Error;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics, Span};
use ast::Root;
use lexer::{Token, TokenKind, token_text};

/// Default nesting limit. Applies to parentheses, call arguments and the
/// height of operator chains.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Diagnostics,
    depth: u32,
    recursion_limit: u32,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    /// Lex `source`. Unrecognized input is reported once per run and
    /// removed from the token stream.
    pub fn new(source: &'src str) -> Self {
        let mut diagnostics = Diagnostics::new();
        let tokens = lexer::lex(source)
            .into_iter()
            .filter(|t| {
                if t.kind != TokenKind::Garbage {
                    return true;
                }
                diagnostics
                    .report(DiagnosticKind::UnexpectedCharacters, t.span)
                    .message(format!("`{}`", token_text(source, t)))
                    .emit();
                false
            })
            .collect();

        Self {
            source,
            tokens,
            pos: 0,
            diagnostics,
            depth: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            fatal_error: None,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        let root = self.parse_root();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
        })
    }

    pub(super) fn current(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + lookahead).map(|t| t.kind)
    }

    pub(super) fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| Span::empty(self.source.len() as u32), |t| t.span)
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.fatal_error.is_some()
    }

    /// Consume the current token. Callers check `eof()` or the kind first.
    pub(super) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.currently_is(kind).then(|| self.bump())
    }

    /// Consume `kind` or report what was found instead.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if let Some(token) = self.eat(kind) {
            return Some(token);
        }
        let detail = format!("{}, found {}", kind.describe(), self.found());
        self.error(DiagnosticKind::ExpectedToken).message(detail).emit();
        None
    }

    /// Human description of the current token for diagnostics.
    pub(super) fn found(&self) -> String {
        match self.current() {
            None => "end of input".to_owned(),
            Some(TokenKind::Ident | TokenKind::Int) => format!("`{}`", self.current_text()),
            Some(kind) => kind.describe().to_owned(),
        }
    }

    /// Start a diagnostic at the current token.
    pub(super) fn error(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        let span = self.current_span();
        self.diagnostics.report(kind, span)
    }

    pub(super) fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(kind, span)
    }

    /// Skip past the next `;`, or to the end of input.
    pub(super) fn recover(&mut self) {
        while !self.eof() {
            if self.bump().kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    /// Enter one nesting level. `false` once the limit is hit, which is fatal.
    pub(super) fn enter(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            self.fatal_error.get_or_insert(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit(&mut self) {
        self.depth -= 1;
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }
}
