use portint_core::{Colors, MathMode};
use portint_vm::{Backend, EvalConfig, NativeWidth, VM};

use super::eval::format_execution;

fn eval(source: &str, config: EvalConfig) -> String {
    let program = portint_compiler::compile(source).unwrap();
    let execution = VM::new(&program, config).execute().unwrap();
    format_execution(&execution, Colors::OFF)
}

#[test]
fn clean_result() {
    insta::assert_snapshot!(eval("1000u32 * 2000u32 / 1024u32", EvalConfig::new()), @"result: 1953u32");
}

#[test]
fn sticky_error() {
    insta::assert_snapshot!(eval("1000u16 * 2000u16 >> 10", EvalConfig::new()), @r"
    result: 33u16
    error: overflow
    ");
}

#[test]
fn undefined_behavior_on_legacy() {
    let config = EvalConfig::new().backend(Backend::Legacy(NativeWidth::W16));
    insta::assert_snapshot!(eval("30000i16 * 2i16", config), @r"
    result: -5536i16
    undefined: signed integer overflow
    ");
}

#[test]
fn bindings_only() {
    insta::assert_snapshot!(eval("let x = 1u8;", EvalConfig::new()), @"result: -");
}

#[test]
fn unsafe_generated_code_is_unchecked() {
    let config = EvalConfig::new()
        .mode(MathMode::Unsafe)
        .backend(Backend::Generated(NativeWidth::W32));
    insta::assert_snapshot!(eval("200u8 + 100u8", config), @"result: 44u8");
}

#[test]
fn colored() {
    let program = portint_compiler::compile("255u8 + 1u8").unwrap();
    let execution = VM::new(&program, EvalConfig::new()).execute().unwrap();
    let out = format_execution(&execution, Colors::ON);
    assert!(out.contains("\x1b[32m0u8\x1b[0m"), "{out}");
    assert!(out.contains("\x1b[31moverflow\x1b[0m"), "{out}");
}
