use indoc::indoc;

use super::Parser;
use super::grammar::parse_int_literal;
use crate::Error;
use crate::diagnostics::DiagnosticKind;
use portint_core::IntType;

fn parse_ok(source: &str) -> String {
    let result = Parser::new(source).parse().unwrap();
    assert!(
        result.diagnostics.is_empty(),
        "{}",
        result.diagnostics.render(source)
    );
    result.root.dump()
}

fn parse_err(source: &str) -> Vec<DiagnosticKind> {
    let result = Parser::new(source).parse().unwrap();
    result.diagnostics.iter().map(|d| d.kind()).collect()
}

#[test]
fn precedence() {
    insta::assert_snapshot!(parse_ok("a + b * c << 2 < d - 1"), @"(< (<< (+ a (* b c)) 2) (- d 1))");
}

#[test]
fn left_associative() {
    insta::assert_snapshot!(parse_ok("a - b - c"), @"(- (- a b) c)");
}

#[test]
fn let_statements_and_result() {
    let source = indoc! {"
        let a = 1000u16;
        let b: u32 = 2000;
        a.widen_to_u32() * b / 1024u32
    "};

    insta::assert_snapshot!(parse_ok(source), @r"
    let a = 1000u16
    let b: u32 = 2000
    (/ (* (widen_to_u32 a) b) 1024u32)
    ");
}

#[test]
fn typed_literals() {
    insta::assert_snapshot!(parse_ok("u16(1000) + i8(-5) + -3i8 + 0x10u8"), @"(+ (+ (+ 1000u16 -5i8) -3i8) 16u8)");
}

#[test]
fn calls_and_methods() {
    insta::assert_snapshot!(parse_ok("wrap_shl(x, 3).sat_to_u8()"), @"(sat_to_u8 (wrap_shl x 3))");
}

#[test]
fn parentheses_group() {
    insta::assert_snapshot!(parse_ok("(a + b) * c"), @"(* (+ a b) c)");
}

#[test]
fn trailing_semicolon_is_tolerated() {
    insta::assert_snapshot!(parse_ok("let x = 1u8; x;"), @r"
    let x = 1u8
    x
    ");
}

#[test]
fn bindings_only() {
    let result = Parser::new("let x = 1u8;").parse().unwrap();
    assert!(result.root.tail.is_none());
    assert_eq!(result.root.stmts.len(), 1);
}

#[test]
fn missing_semicolon() {
    assert_eq!(
        parse_err("let x = 1u8 x"),
        [DiagnosticKind::MissingSemicolon]
    );
}

#[test]
fn recovery_continues_after_bad_statement() {
    let source = indoc! {"
        let = 5;
        let y: u7 = 1;
        let z = (1u8 + ;
        z
    "};
    assert_eq!(
        parse_err(source),
        [
            DiagnosticKind::ExpectedIdentifier,
            DiagnosticKind::UnknownType,
            DiagnosticKind::ExpectedExpression,
        ]
    );
}

#[test]
fn expression_statements_are_rejected() {
    assert_eq!(
        parse_err("1u8; 2u8"),
        [DiagnosticKind::UnexpectedToken]
    );
}

#[test]
fn negating_a_name_is_unsupported() {
    assert_eq!(parse_err("-x"), [DiagnosticKind::UnsupportedNegation]);
}

#[test]
fn type_call_needs_literal() {
    assert_eq!(parse_err("u16(x)"), [DiagnosticKind::ExpectedLiteral]);
}

#[test]
fn conflicting_suffix() {
    assert_eq!(parse_err("u16(5u8)"), [DiagnosticKind::InvalidLiteral]);
}

#[test]
fn unclosed_paren() {
    assert_eq!(parse_err("(1u8 + 2u8"), [DiagnosticKind::UnclosedParen]);
}

#[test]
fn garbage_reported_once() {
    assert_eq!(
        parse_err("1u8 + @@ 2u8"),
        [DiagnosticKind::UnexpectedCharacters]
    );
}

#[test]
fn recursion_limit_is_fatal() {
    let source = format!("{}1u8{}", "(".repeat(64), ")".repeat(64));
    let err = Parser::new(&source)
        .with_recursion_limit(16)
        .parse()
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn long_operator_chain_is_fatal() {
    let source = format!("1u8{}", " + 1u8".repeat(20_000));
    let err = Parser::new(&source).parse().unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn chain_height_counts_parenthesized_operands() {
    let group = format!("(1u8{})", " * 1u8".repeat(10));
    let source = format!("{group}{}", format!(" + {group}").repeat(10));
    let err = Parser::new(&source)
        .with_recursion_limit(16)
        .parse()
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));

    let root = Parser::new(&source).parse().unwrap().root;
    assert_eq!(root.tail.unwrap().height(), 20);
}

#[test]
fn long_method_chain_is_fatal() {
    let source = format!("1u8{}", ".widen_to_u16()".repeat(32));
    let err = Parser::new(&source)
        .with_recursion_limit(16)
        .parse()
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn int_literal_forms() {
    assert_eq!(parse_int_literal("1_000"), Ok((1000, None)));
    assert_eq!(parse_int_literal("0xffu8"), Ok((255, Some(IntType::U8))));
    assert_eq!(parse_int_literal("42i64"), Ok((42, Some(IntType::I64))));
    assert!(parse_int_literal("12abc").is_err());
    assert!(parse_int_literal("0xu8").is_err());
    assert!(parse_int_literal(&"9".repeat(60)).is_err());
}
