use std::fmt;

use super::Span;

/// Diagnostic kinds, syntax first, then name resolution, then typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexing and parsing
    UnexpectedCharacters,
    UnexpectedToken,
    ExpectedToken,
    ExpectedExpression,
    ExpectedIdentifier,
    ExpectedLiteral,
    UnclosedParen,
    MissingSemicolon,
    UnknownType,
    InvalidLiteral,
    UnsupportedNegation,

    // Name resolution
    UnknownName,
    UnknownFunction,
    ArgumentCount,

    // Typing and usage faults
    UntypedLiteral,
    LiteralOutOfRange,
    BoolAsInteger,
    TypeMismatch,
    SignedShift,
    SignedWrapTarget,
    NotWidening,
    LosslessConversion,
    WidthMismatch,
    TooManyLocals,
}

impl DiagnosticKind {
    /// Default hint for this kind, printed under the snippet.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UntypedLiteral => Some("add a suffix like `5u32` or write `u32(5)`"),
            Self::SignedShift => Some("reinterpret as the unsigned type of the same width first"),
            Self::SignedWrapTarget => Some("wrap to the unsigned type, then reinterpret"),
            Self::NotWidening => Some("use `narrow_to_*` or `sat_to_*` for lossy conversions"),
            Self::LosslessConversion => Some("use `widen_to_*` when no value can be lost"),
            Self::TypeMismatch => Some("convert explicitly with `widen_to_*` or `narrow_to_*`"),
            Self::UnsupportedNegation => Some("subtract from zero instead, e.g. `0i32 - x`"),
            Self::MissingSemicolon => Some("statements end with `;`"),
            _ => None,
        }
    }

    /// Message used when the caller supplies no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacters => "unexpected characters",
            Self::UnexpectedToken => "unexpected token",
            Self::ExpectedToken => "expected a different token",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedIdentifier => "expected a name",
            Self::ExpectedLiteral => "expected an integer literal",
            Self::UnclosedParen => "missing closing `)`",
            Self::MissingSemicolon => "expected `;`",
            Self::UnknownType => "unknown integer type",
            Self::InvalidLiteral => "invalid integer literal",
            Self::UnsupportedNegation => "only literals can be negated",

            Self::UnknownName => "undefined name",
            Self::UnknownFunction => "unknown function",
            Self::ArgumentCount => "wrong number of arguments",

            Self::UntypedLiteral => "cannot infer the type of this literal",
            Self::LiteralOutOfRange => "literal out of range",
            Self::BoolAsInteger => "comparison result used as an integer",
            Self::TypeMismatch => "mismatched types",
            Self::SignedShift => "shift of a signed operand",
            Self::SignedWrapTarget => "wrap conversion to a signed type",
            Self::NotWidening => "conversion is not widening",
            Self::LosslessConversion => "conversion cannot lose data",
            Self::WidthMismatch => "reinterpretation between different widths",
            Self::TooManyLocals => "too many `let` bindings",
        }
    }

    /// Template for caller-provided detail, `{}` is replaced by it.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownType => "`{}` is not an integer type".to_string(),
            Self::UnknownName => "`{}` is not defined".to_string(),
            Self::UnknownFunction => "`{}` is not a known function".to_string(),
            Self::LiteralOutOfRange => "literal does not fit in {}".to_string(),
            Self::ExpectedToken => "expected {}".to_string(),
            Self::SignedShift => "cannot shift signed type {}".to_string(),
            Self::SignedWrapTarget => "cannot wrap to signed type {}".to_string(),
            Self::NotWidening => "{} is not a widening conversion".to_string(),
            Self::LosslessConversion => "{} cannot lose data".to_string(),
            Self::WidthMismatch => "cannot reinterpret {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            message: kind.fallback_message().to_string(),
            hints: kind.default_hint().map(str::to_owned).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )?;
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
