use indoc::indoc;
use portint_core::{Colors, Program};

use super::{Backend, EvalConfig, NativeWidth, PrintTracer, VM, Verbosity};

fn trace_with(source: &str, config: EvalConfig, verbosity: Verbosity, colors: Colors) -> String {
    let program: Program = portint_compiler::compile(source).expect("compile failed");
    let mut tracer = PrintTracer::new(&program, verbosity, colors);
    VM::new(&program, config)
        .execute_with(&mut tracer)
        .expect("execution failed");
    tracer.render()
}

fn trace(source: &str, verbosity: Verbosity) -> String {
    trace_with(source, EvalConfig::new(), verbosity, Colors::OFF)
}

#[test]
fn default_trace_shows_values_and_errors() {
    insta::assert_snapshot!(trace("1000u16 * 2000u16 >> 10", Verbosity::Default), @r"
      0  push     1000u16
      1  push     2000u16
      2  mul
         ! overflow
         = 33920u16
      3  push     10u32
      4  shr
         = 33u16

    result: 33u16
    error: overflow
    ");
}

#[test]
fn verbose_trace_shows_operations() {
    insta::assert_snapshot!(trace("1000u16 * 2000u16 >> 10", Verbosity::Verbose), @r"
      0  push     1000u16
      1  push     2000u16
      2  mul
         ~ 1000u16 * 2000u16 in u16
         ! overflow
         = 33920u16
      3  push     10u32
      4  shr
         ~ 33920u16 >> 10u32
         = 33u16

    result: 33u16
    error: overflow
    ");
}

#[test]
fn very_verbose_trace_shows_locals() {
    let source = indoc! {"
        let a = 1000u16;
        narrow_to_u8(a)
    "};

    insta::assert_snapshot!(trace(source, Verbosity::VeryVerbose), @r"
      0  push     1000u16
      1  store    a
         = a <- 1000u16
      2  load     a
         = 1000u16
      3  narrow   u8
         ~ narrow_to_u8(1000u16)
         ! truncation data loss
         = 232u8

    result: 232u8
    error: truncation data loss
    ");
}

#[test]
fn legacy_trace_shows_c_working_types() {
    let config = EvalConfig::new().backend(Backend::Legacy(NativeWidth::W32));
    let out = trace_with(
        "1000u16 * 2000u16 / 1024u16",
        config,
        Verbosity::Verbose,
        Colors::OFF,
    );

    insta::assert_snapshot!(out, @r"
      0  push     1000u16
      1  push     2000u16
      2  mul
         ~ 1000u16 * 2000u16 in i32
         = 2000000i32
      3  push     1024u16
      4  div
         ~ 2000000i32 / 1024u16 in i32
         = 1953i32

    result: 1953u16
    ");
}

#[test]
fn legacy_trace_flags_undefined_behavior() {
    let config = EvalConfig::new().backend(Backend::Legacy(NativeWidth::W16));
    let out = trace_with("30000i16 * 2i16", config, Verbosity::Default, Colors::OFF);

    assert!(out.contains("? undefined: signed integer overflow"), "{out}");
    assert!(out.contains("result: -5536i16"), "{out}");
    assert!(!out.contains("error:"), "{out}");
}

#[test]
fn bindings_only_program_has_no_result() {
    let out = trace("let x = 1u8;", Verbosity::Default);
    assert!(out.ends_with("\nresult: -\n"), "{out}");
}

#[test]
fn colored_trace() {
    let out = trace_with(
        "1000u16 * 2000u16 >> 10",
        EvalConfig::new(),
        Verbosity::Default,
        Colors::ON,
    );

    assert!(out.contains("\x1b[31moverflow"), "{out}");
    assert!(out.contains("\x1b[34mmul"), "{out}");
    assert!(out.contains("\x1b[32m33u16"), "{out}");
}

#[test]
fn lines_match_render() {
    let program = portint_compiler::compile("1u8 + 2u8").expect("compile failed");
    let mut tracer = PrintTracer::new(&program, Verbosity::Default, Colors::OFF);
    VM::new(&program, EvalConfig::new())
        .execute_with(&mut tracer)
        .expect("execution failed");

    assert_eq!(tracer.lines().len(), 6);
    assert_eq!(tracer.render().lines().count(), 6);
    assert_eq!(tracer.lines()[3], "     = 3u8");
}
