//! Lexer for the expression language.
//!
//! Produces span-based tokens; text is sliced from the source only when
//! needed. Whitespace and `//` comments are dropped here, the grammar has no
//! use for them.
//!
//! Consecutive characters the lexer cannot match are coalesced into a single
//! `Garbage` token, so malformed input yields one diagnostic per run instead
//! of one per character.

use logos::Logos;

use crate::diagnostics::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("let")]
    KwLet,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token(".")]
    Dot,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("<")]
    Lt,

    #[token("<=")]
    Le,

    #[token(">")]
    Gt,

    #[token(">=")]
    Ge,

    #[token("==")]
    EqEq,

    #[token("!=")]
    NotEq,

    /// Decimal or hex digits with an optional type suffix: `1_000u16`, `0xffu8`.
    /// Accepts any trailing alphanumerics; the parser validates digits and suffix.
    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    Int,

    /// Names of locals, functions and types. Defined after keywords so they
    /// take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Trivia,

    /// Run of characters no other token accepts.
    Garbage,
}

impl TokenKind {
    /// Spelling used in "expected ..." diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::KwLet => "`let`",
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::Comma => "`,`",
            Self::Semicolon => "`;`",
            Self::Colon => "`:`",
            Self::Equals => "`=`",
            Self::Dot => "`.`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::Percent => "`%`",
            Self::Shl => "`<<`",
            Self::Shr => "`>>`",
            Self::Lt => "`<`",
            Self::Le => "`<=`",
            Self::Gt => "`>`",
            Self::Ge => "`>=`",
            Self::EqEq => "`==`",
            Self::NotEq => "`!=`",
            Self::Int => "integer literal",
            Self::Ident => "name",
            Self::Trivia => "whitespace",
            Self::Garbage => "unrecognized input",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenize `source`, coalescing lexer errors into `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut garbage: Option<Span> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(span) = garbage.take() {
                    tokens.push(Token::new(TokenKind::Garbage, span));
                }
                tokens.push(Token::new(kind, Span::from_range(lexer.span())));
            }
            Some(Err(())) => {
                let span = Span::from_range(lexer.span());
                garbage = Some(garbage.map_or(span, |g| g.cover(span)));
            }
            None => {
                if let Some(span) = garbage.take() {
                    tokens.push(Token::new(TokenKind::Garbage, span));
                }
                break;
            }
        }
    }

    tokens
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.range()]
}
