//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so one definition serves every command that accepts the flag, visible
//! or hidden (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Program file (positional).
pub fn program_path_arg() -> Arg {
    Arg::new("program_path")
        .value_name("PROGRAM")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("expr")
        .help("Program file (use \"-\" for stdin)")
}

/// Inline program text (-e/--expr).
pub fn expr_arg() -> Arg {
    Arg::new("expr")
        .short('e')
        .long("expr")
        .value_name("TEXT")
        .help("Inline program text")
}

/// Math mode (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("capture")
        .value_parser(["capture", "unsafe"])
        .help("How failures are handled: record a sticky error, or fault")
}

/// Evaluator (--backend).
pub fn backend_arg() -> Arg {
    Arg::new("backend")
        .long("backend")
        .value_name("BACKEND")
        .default_value("sim")
        .value_parser(["sim", "generated", "legacy"])
        .help("Exact simulation, generated native code, or plain C semantics")
}

/// Target word size (--native-width).
pub fn native_width_arg() -> Arg {
    Arg::new("native_width")
        .long("native-width")
        .value_name("BITS")
        .default_value("32")
        .value_parser(["16", "32", "64"])
        .help("Word size of the generated or legacy target (`int` width for legacy)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Output JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output JSON")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for operations, -vv for locals too)")
}
