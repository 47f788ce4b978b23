//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! eval/trace/dump/check accept every runtime flag so a command line can
//! be switched between them by changing the subcommand alone; flags a
//! command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden evaluation args (for commands that don't run the program).
fn with_hidden_eval_args(cmd: Command) -> Command {
    cmd.arg(mode_arg().hide(true))
        .arg(backend_arg().hide(true))
        .arg(native_width_arg().hide(true))
}

/// Add hidden JSON output arg (for commands without JSON output).
fn with_hidden_json_arg(cmd: Command) -> Command {
    cmd.arg(json_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("portint")
        .about("Portable safe-integer arithmetic: checked simulation and C comparison")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(eval_command())
        .subcommand(trace_command())
        .subcommand(dump_command())
        .subcommand(check_command())
        .subcommand(types_command())
}

/// Compile and run a program, printing its result and sticky error.
pub fn eval_command() -> Command {
    let cmd = Command::new("eval")
        .about("Evaluate a program")
        .override_usage(
            "\
  portint eval <PROGRAM>
  portint eval -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  portint eval calc.pint
  portint eval -e '1000u16 * 2000u16 >> 10'
  portint eval -e '200u8 + 100u8' --mode unsafe
  portint eval -e '30000i16 * 2i16' --backend legacy --native-width 16
  portint eval -e 'narrow_to_u8(300u16)' --json"#,
        )
        .arg(program_path_arg())
        .arg(expr_arg())
        .arg(mode_arg())
        .arg(backend_arg())
        .arg(native_width_arg())
        .arg(json_arg())
        .arg(color_arg());

    with_hidden_trace_args(cmd)
}

/// Run a program and print each executed instruction.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace program execution")
        .override_usage(
            "\
  portint trace <PROGRAM> [-v|-vv]
  portint trace -e <TEXT> [-v|-vv]",
        )
        .after_help(
            r#"EXAMPLES:
  portint trace calc.pint
  portint trace -e '1000u16 * 2000u16 >> 10' -v
  portint trace calc.pint --backend legacy --native-width 16 -vv"#,
        )
        .arg(program_path_arg())
        .arg(expr_arg())
        .arg(mode_arg())
        .arg(backend_arg())
        .arg(native_width_arg())
        .arg(verbose_arg())
        .arg(color_arg());

    with_hidden_json_arg(cmd)
}

/// Show the lowered program.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the lowered program")
        .override_usage(
            "\
  portint dump <PROGRAM>
  portint dump -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  portint dump calc.pint
  portint dump -e 'sat_to_u8(300u16) < wrap_shl(1u8, 7)'"#,
        )
        .arg(program_path_arg())
        .arg(expr_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_json_arg(with_hidden_eval_args(cmd)))
}

/// Compile a program without running it.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check a program for errors")
        .override_usage(
            "\
  portint check <PROGRAM>
  portint check -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  portint check calc.pint
  cat calc.pint | portint check -"#,
        )
        .arg(program_path_arg())
        .arg(expr_arg())
        .arg(color_arg());

    with_hidden_trace_args(with_hidden_json_arg(with_hidden_eval_args(cmd)))
}

/// List the integer type catalog.
pub fn types_command() -> Command {
    Command::new("types")
        .about("List the supported integer types")
        .arg(json_arg())
}
