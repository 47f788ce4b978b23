//! Grammar productions.
//!
//! ```text
//! root    := (let ';')* expr?
//! let     := 'let' NAME (':' TYPE)? '=' expr
//! expr    := shift (CMP shift)?
//! shift   := add (('<<' | '>>') add)*
//! add     := mul (('+' | '-') mul)*
//! mul     := postfix (('*' | '/' | '%') postfix)*
//! postfix := primary ('.' NAME '(' args ')')*
//! primary := INT | '-' INT | TYPE '(' '-'? INT ')' | NAME | NAME '(' args ')' | '(' expr ')'
//! ```

use portint_core::{BinOp, CmpOp, IntType, ShiftOp};

use super::Parser;
use super::ast::{Expr, ExprKind, Let, Name, Root};
use super::lexer::TokenKind;
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Span};

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) -> Root {
        let mut root = Root::default();

        while !self.should_stop() {
            if self.currently_is(TokenKind::KwLet) {
                match self.parse_let() {
                    Some(stmt) => root.stmts.push(stmt),
                    None => self.recover(),
                }
                continue;
            }

            let Some(expr) = self.parse_expr() else {
                self.recover();
                continue;
            };

            // A trailing `;` after the result expression is tolerated.
            if self.currently_is(TokenKind::Semicolon) && self.nth(1).is_none() {
                self.bump();
            }
            if self.eof() {
                root.tail = Some(expr);
                break;
            }

            let detail = format!("{} after the result expression", self.found());
            self.error(DiagnosticKind::UnexpectedToken)
                .message(detail)
                .hint("only `let` statements may precede the result expression")
                .emit();
            self.recover();
        }

        root
    }

    fn parse_let(&mut self) -> Option<Let> {
        let kw = self.bump();

        let name = self.parse_name()?;
        let ty = if self.eat(TokenKind::Colon).is_some() {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        self.expect(TokenKind::Equals)?;
        let value = self.parse_expr()?;

        if self.eat(TokenKind::Semicolon).is_none() {
            let detail = format!("`;`, found {}", self.found());
            self.report(DiagnosticKind::MissingSemicolon, Span::empty(value.span.end))
                .message(detail)
                .emit();
            return None;
        }

        let span = kw.span.cover(value.span);
        Some(Let {
            name,
            ty,
            value,
            span,
        })
    }

    fn parse_name(&mut self) -> Option<Name> {
        let Some(token) = self.eat(TokenKind::Ident) else {
            let detail = self.found();
            self.error(DiagnosticKind::ExpectedIdentifier).message(detail).emit();
            return None;
        };
        Some(Name {
            text: self.text(&token).to_owned(),
            span: token.span,
        })
    }

    fn parse_type_name(&mut self) -> Option<(IntType, Span)> {
        let name = self.parse_name()?;
        match IntType::from_name(&name.text) {
            Some(ty) => Some((ty, name.span)),
            None => {
                self.report(DiagnosticKind::UnknownType, name.span)
                    .message(name.text)
                    .emit();
                None
            }
        }
    }

    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        if !self.enter() {
            return None;
        }
        let expr = self.parse_comparison();
        self.exit();
        expr
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let lhs = self.parse_shift()?;
        let Some(op) = self.current().and_then(cmp_op) else {
            return Some(lhs);
        };
        self.bump();
        let rhs = self.parse_shift()?;
        self.limit_height(binary_node(lhs, rhs, |l, r| ExprKind::Compare(op, l, r)))
    }

    fn parse_shift(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        while let Some(op) = self.current().and_then(shift_op) {
            self.bump();
            let rhs = self.parse_additive()?;
            lhs = self.limit_height(binary_node(lhs, rhs, |l, r| ExprKind::Shift(op, l, r)))?;
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        while let Some(op) = self.current().and_then(additive_op) {
            self.bump();
            let rhs = self.parse_multiplicative()?;
            lhs = self.limit_height(binary_node(lhs, rhs, |l, r| ExprKind::Binary(op, l, r)))?;
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_postfix()?;
        while let Some(op) = self.current().and_then(multiplicative_op) {
            self.bump();
            let rhs = self.parse_postfix()?;
            lhs = self.limit_height(binary_node(lhs, rhs, |l, r| ExprKind::Binary(op, l, r)))?;
        }
        Some(lhs)
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        while self.eat(TokenKind::Dot).is_some() {
            let func = self.parse_name()?;
            self.expect(TokenKind::ParenOpen)?;
            let mut args = vec![expr];
            let close = self.parse_args(&mut args)?;
            let span = args[0].span.cover(close);
            expr = self.limit_height(Expr::new(ExprKind::Call { func, args }, span))?;
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current() {
            Some(TokenKind::Int) => {
                let token = self.bump();
                let (value, ty) = self.parse_int(self.text(&token), token.span)?;
                Some(Expr::new(ExprKind::Int { value, ty }, token.span))
            }
            Some(TokenKind::Minus) => self.parse_negative_literal(),
            Some(TokenKind::Ident) if self.nth(1) == Some(TokenKind::ParenOpen) => {
                self.parse_call()
            }
            Some(TokenKind::Ident) => {
                let name = self.parse_name()?;
                Some(Expr::new(ExprKind::Var(name.text), name.span))
            }
            Some(TokenKind::ParenOpen) => {
                let open = self.bump();
                let inner = self.parse_expr()?;
                let Some(close) = self.eat(TokenKind::ParenClose) else {
                    let detail = format!("found {}", self.found());
                    self.report(DiagnosticKind::UnclosedParen, open.span)
                        .message(detail)
                        .emit();
                    return None;
                };
                Some(Expr::new(inner.kind, open.span.cover(close.span)))
            }
            _ => {
                let detail = format!("found {}", self.found());
                self.error(DiagnosticKind::ExpectedExpression)
                    .message(detail)
                    .emit();
                None
            }
        }
    }

    /// `-5` or `-5i8`. Negating anything but a literal is not supported.
    fn parse_negative_literal(&mut self) -> Option<Expr> {
        let minus = self.bump();
        let Some(token) = self.eat(TokenKind::Int) else {
            self.report(DiagnosticKind::UnsupportedNegation, minus.span).emit();
            return None;
        };
        let (value, ty) = self.parse_int(self.text(&token), token.span)?;
        let span = minus.span.cover(token.span);
        Some(Expr::new(ExprKind::Int { value: -value, ty }, span))
    }

    /// `name(args)`, or a typed literal `u16(1000)` when `name` is a type.
    fn parse_call(&mut self) -> Option<Expr> {
        let func = self.parse_name()?;
        let open = self.bump();

        let Some(ty) = IntType::from_name(&func.text) else {
            let mut args = Vec::new();
            let close = self.parse_args(&mut args)?;
            let span = func.span.cover(close);
            return self.limit_height(Expr::new(ExprKind::Call { func, args }, span));
        };

        let negative = self.eat(TokenKind::Minus);
        let Some(token) = self.eat(TokenKind::Int) else {
            let detail = format!("found {}", self.found());
            self.error(DiagnosticKind::ExpectedLiteral)
                .message(detail)
                .hint(format!("convert expressions with `narrow_to_{ty}` or `widen_to_{ty}`"))
                .emit();
            return None;
        };
        let (value, suffix) = self.parse_int(self.text(&token), token.span)?;
        if suffix.is_some_and(|s| s != ty) {
            self.report(DiagnosticKind::InvalidLiteral, token.span)
                .message(format!("suffix conflicts with `{ty}(...)`"))
                .emit();
            return None;
        }

        let Some(close) = self.eat(TokenKind::ParenClose) else {
            let detail = format!("found {}", self.found());
            self.report(DiagnosticKind::UnclosedParen, open.span)
                .message(detail)
                .emit();
            return None;
        };

        let value = if negative.is_some() { -value } else { value };
        let span = func.span.cover(close.span);
        Some(Expr::new(ExprKind::Int { value, ty: Some(ty) }, span))
    }

    /// Comma-separated arguments after `(`, through `)`. Returns the span of `)`.
    fn parse_args(&mut self, args: &mut Vec<Expr>) -> Option<Span> {
        if let Some(close) = self.eat(TokenKind::ParenClose) {
            return Some(close.span);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            return self.expect(TokenKind::ParenClose).map(|t| t.span);
        }
    }

    /// Operator chains are built by loops, not recursion, so the height of
    /// each new node is checked against the same limit as nesting.
    fn limit_height(&mut self, expr: Expr) -> Option<Expr> {
        if expr.height() > self.recursion_limit {
            self.fatal_error.get_or_insert(Error::RecursionLimitExceeded);
            return None;
        }
        Some(expr)
    }

    /// Parse literal text into its magnitude and optional suffix type.
    fn parse_int(&mut self, text: &str, span: Span) -> Option<(i128, Option<IntType>)> {
        match parse_int_literal(text) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.report(DiagnosticKind::InvalidLiteral, span)
                    .message(format!("`{text}` {reason}"))
                    .emit();
                None
            }
        }
    }
}

/// Split `1_000u16` / `0xffu8` into value and suffix.
pub(crate) fn parse_int_literal(text: &str) -> Result<(i128, Option<IntType>), &'static str> {
    let (digits, ty) = IntType::ALL
        .into_iter()
        .find_map(|ty| {
            text.strip_suffix(ty.name())
                .filter(|d| !d.is_empty())
                .map(|d| (d, Some(ty)))
        })
        .unwrap_or((text, None));

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    let parsed = match digits.strip_prefix("0x") {
        Some(hex) => u128::from_str_radix(hex, 16),
        None => digits.parse::<u128>(),
    };
    let magnitude = parsed.map_err(|_| "is not a valid integer")?;
    let value = i128::try_from(magnitude).map_err(|_| "is too large")?;
    Ok((value, ty))
}

fn binary_node(lhs: Expr, rhs: Expr, kind: impl FnOnce(Box<Expr>, Box<Expr>) -> ExprKind) -> Expr {
    let span = lhs.span.cover(rhs.span);
    Expr::new(kind(Box::new(lhs), Box::new(rhs)), span)
}

fn cmp_op(kind: TokenKind) -> Option<CmpOp> {
    Some(match kind {
        TokenKind::Lt => CmpOp::Lt,
        TokenKind::Le => CmpOp::Le,
        TokenKind::Gt => CmpOp::Gt,
        TokenKind::Ge => CmpOp::Ge,
        TokenKind::EqEq => CmpOp::Eq,
        TokenKind::NotEq => CmpOp::Ne,
        _ => return None,
    })
}

fn shift_op(kind: TokenKind) -> Option<ShiftOp> {
    match kind {
        TokenKind::Shl => Some(ShiftOp::Shl),
        TokenKind::Shr => Some(ShiftOp::Shr),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::Percent => Some(BinOp::Rem),
        _ => None,
    }
}
