//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Shared flags: eval/trace/dump/check accept each other's flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use portint_core::MathMode;
use portint_vm::{Backend, NativeWidth, Verbosity};

use super::*;
use crate::cli::commands::{
    check_command, dump_command, eval_command, trace_command, types_command,
};
use crate::commands::eval::EvalArgs;
use crate::commands::trace::TraceArgs;

#[test]
fn eval_defaults() {
    let m = eval_command()
        .try_get_matches_from(["eval", "calc.pint"])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.program_path, Some(PathBuf::from("calc.pint")));
    assert_eq!(params.expr, None);
    assert_eq!(params.mode, MathMode::Capture);
    assert_eq!(params.backend, Backend::Simulation);
    assert!(!params.json);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn eval_all_flags() {
    let m = eval_command()
        .try_get_matches_from([
            "eval",
            "-e",
            "200u8 + 100u8",
            "--mode",
            "unsafe",
            "--backend",
            "generated",
            "--native-width",
            "16",
            "--json",
            "--color",
            "never",
        ])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.program_path, None);
    assert_eq!(params.expr.as_deref(), Some("200u8 + 100u8"));
    assert_eq!(params.mode, MathMode::Unsafe);
    assert_eq!(params.backend, Backend::Generated(NativeWidth::W16));
    assert!(params.json);

    let args: EvalArgs = params.into();
    assert_eq!(args.config.get_mode(), MathMode::Unsafe);
    assert_eq!(
        args.config.get_backend(),
        Backend::Generated(NativeWidth::W16)
    );
    assert!(!args.color);
}

#[test]
fn legacy_defaults_to_32_bit_int() {
    let m = eval_command()
        .try_get_matches_from(["eval", "-e", "1u8", "--backend", "legacy"])
        .unwrap();
    let params = EvalParams::from_matches(&m);
    assert_eq!(params.backend, Backend::Legacy(NativeWidth::W32));
}

#[test]
fn native_width_ignored_by_simulation() {
    let m = eval_command()
        .try_get_matches_from(["eval", "-e", "1u8", "--native-width", "64"])
        .unwrap();
    let params = EvalParams::from_matches(&m);
    assert_eq!(params.backend, Backend::Simulation);
}

#[test]
fn rejects_unknown_values() {
    for flags in [
        ["--backend", "jit"],
        ["--native-width", "8"],
        ["--mode", "trap"],
    ] {
        let result = eval_command().try_get_matches_from(["eval", "-e", "1u8", flags[0], flags[1]]);
        assert!(result.is_err(), "{flags:?} should be rejected");
    }
}

#[test]
fn program_file_conflicts_with_expr() {
    let result = eval_command().try_get_matches_from(["eval", "calc.pint", "-e", "1u8"]);
    assert!(result.is_err());
}

#[test]
fn stdin_program() {
    let m = check_command()
        .try_get_matches_from(["check", "-"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.program_path, Some(PathBuf::from("-")));
}

#[test]
fn trace_verbosity() {
    for (flags, expected) in [
        (vec![], Verbosity::Default),
        (vec!["-v"], Verbosity::Verbose),
        (vec!["-vv"], Verbosity::VeryVerbose),
        (vec!["-v", "-v", "-v"], Verbosity::VeryVerbose),
    ] {
        let mut argv = vec!["trace", "-e", "1u8"];
        argv.extend(flags);
        let m = trace_command().try_get_matches_from(argv).unwrap();
        let args: TraceArgs = TraceParams::from_matches(&m).into();
        assert_eq!(args.verbosity, expected);
    }
}

#[test]
fn trace_accepts_eval_flags() {
    let result = trace_command().try_get_matches_from(["trace", "calc.pint", "--json"]);
    assert!(
        result.is_ok(),
        "trace should accept eval flags: {:?}",
        result.err()
    );
}

#[test]
fn eval_accepts_trace_flags() {
    let result = eval_command().try_get_matches_from(["eval", "calc.pint", "-vv"]);
    assert!(
        result.is_ok(),
        "eval should accept trace flags: {:?}",
        result.err()
    );
}

#[test]
fn dump_accepts_runtime_flags() {
    let result = dump_command().try_get_matches_from([
        "dump",
        "calc.pint",
        "--mode",
        "unsafe",
        "--backend",
        "legacy",
        "--native-width",
        "16",
        "--json",
        "-v",
    ]);
    assert!(
        result.is_ok(),
        "dump should accept runtime flags: {:?}",
        result.err()
    );

    let params = DumpParams::from_matches(&result.unwrap());
    assert_eq!(params.program_path, Some(PathBuf::from("calc.pint")));
}

#[test]
fn dump_help_hides_runtime_flags() {
    let help = dump_command().render_help().to_string();
    assert!(help.contains("--expr"));
    assert!(help.contains("--color"));
    assert!(!help.contains("--backend"));
    assert!(!help.contains("--native-width"));
    assert!(!help.contains("--json"));
}

#[test]
fn eval_help_hides_verbosity() {
    let help = eval_command().render_help().to_string();
    assert!(help.contains("--backend"));
    assert!(help.contains("--json"));
    assert!(!help.contains("Verbosity level"));
}

#[test]
fn types_json() {
    let m = types_command()
        .try_get_matches_from(["types", "--json"])
        .unwrap();
    assert!(TypesParams::from_matches(&m).json);
}

#[test]
fn subcommand_required() {
    assert!(build_cli().try_get_matches_from(["portint"]).is_err());
    let m = build_cli()
        .try_get_matches_from(["portint", "eval", "-e", "1u8"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("eval"));
}

#[test]
fn color_choices() {
    assert!(ColorChoice::Always.should_colorize());
    assert!(!ColorChoice::Never.should_colorize());
}
