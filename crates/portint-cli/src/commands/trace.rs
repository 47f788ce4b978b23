//! Trace program execution for debugging.

use std::path::PathBuf;

use portint_core::Colors;
use portint_vm::{EvalConfig, PrintTracer, VM, Verbosity};

use super::program_loader::compile_or_exit;

pub struct TraceArgs {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub config: EvalConfig,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let program = compile_or_exit(args.program_path.as_deref(), args.expr.as_deref(), args.color);

    let mut tracer = PrintTracer::new(&program, args.verbosity, Colors::new(args.color));
    let result = VM::new(&program, args.config).execute_with(&mut tracer);

    // Lines up to the failing instruction are still useful.
    tracer.print();
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
