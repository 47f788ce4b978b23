//! Evaluate a program and print its outcome.

use std::fmt::Write;
use std::path::PathBuf;

use portint_core::Colors;
use portint_vm::{EvalConfig, Execution, VM};

use super::program_loader::compile_or_exit;

pub struct EvalArgs {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub config: EvalConfig,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: EvalArgs) {
    let program = compile_or_exit(args.program_path.as_deref(), args.expr.as_deref(), args.color);

    let execution = match VM::new(&program, args.config).execute() {
        Ok(execution) => execution,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string(&execution) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", format_execution(&execution, Colors::new(args.color)));
}

/// Result line, then the sticky error and undefined behaviour if present.
pub fn format_execution(execution: &Execution, c: Colors) -> String {
    let mut out = String::new();
    let result = execution
        .result
        .map_or_else(|| "-".to_owned(), |slot| slot.to_string());
    writeln!(out, "{}result:{} {}{result}{}", c.dim, c.reset, c.green, c.reset)
        .expect("String write never fails");
    if let Some(kind) = execution.error {
        writeln!(out, "{}error:{} {}{kind}{}", c.dim, c.reset, c.red, c.reset)
            .expect("String write never fails");
    }
    if let Some(ub) = execution.undefined {
        writeln!(out, "{}undefined:{} {}{ub}{}", c.dim, c.reset, c.red, c.reset)
            .expect("String write never fails");
    }
    out
}
