use std::path::PathBuf;

use super::program_loader::compile_or_exit;

pub struct CheckArgs {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    compile_or_exit(args.program_path.as_deref(), args.expr.as_deref(), args.color);

    // Silent on success (like cargo check)
}
