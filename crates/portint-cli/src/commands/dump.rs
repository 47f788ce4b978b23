use std::path::PathBuf;

use portint_core::Colors;

use super::program_loader::compile_or_exit;

pub struct DumpArgs {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let program = compile_or_exit(args.program_path.as_deref(), args.expr.as_deref(), args.color);
    print!("{}", program.dump(Colors::new(args.color)));
}
