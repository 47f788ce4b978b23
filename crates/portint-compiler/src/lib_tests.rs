use crate::{Compiler, DiagnosticKind, Error, compile};

#[test]
fn compile_error_counts() {
    let err = compile("let a = 5; b").unwrap_err();
    assert!(matches!(err, Error::CheckError(_)));
    assert_eq!(err.to_string(), "type checking failed with 2 errors");
    let kinds: Vec<_> = err.diagnostics().unwrap().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::UntypedLiteral, DiagnosticKind::UnknownName]);
}

#[test]
fn parse_errors_stop_before_checking() {
    let err = compile("let = 5u8; frob(1u8)").unwrap_err();
    let Error::ParseError(diagnostics) = &err else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn recursion_limit_has_no_diagnostics() {
    let source = format!("{}1u8{}", "(".repeat(10), ")".repeat(10));
    let err = Compiler::new(&source).recursion_limit(4).compile().unwrap_err();
    assert!(err.diagnostics().is_none());
    assert_eq!(err.to_string(), "recursion limit exceeded");
}

#[test]
fn long_sum_is_rejected_without_overflowing() {
    let source = format!("1u8{}", " + 1u8".repeat(20_000));
    let err = compile(&source).unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));

    let source = format!("let x = 0u32{};\nx", " + 1u32".repeat(200));
    let program = compile(&source).unwrap();
    assert!(!program.is_empty());
}

#[test]
fn rendered_errors_name_the_problem() {
    let source = "let s = 1i32;\ns << 2";
    let err = compile(source).unwrap_err();
    let out = err.diagnostics().unwrap().render(source);
    assert!(out.contains("error: cannot shift signed type i32"));
    assert!(out.contains("s << 2"));
}

#[test]
fn empty_source_is_empty_program() {
    let program = compile("").unwrap();
    assert!(program.is_empty());
    assert_eq!(program.result(), None);
}
