use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use portint_core::Program;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("program is required: use a positional file, \"-\" for stdin, or -e/--expr")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("program cannot be empty")]
    Empty,
}

pub fn load_program_source(path: Option<&Path>, expr: Option<&str>) -> Result<String, LoadError> {
    let text = match (expr, path) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) if path.as_os_str() == "-" => load_stdin()?,
        (None, Some(path)) => fs::read_to_string(path).map_err(|source| LoadError::File {
            path: path.to_owned(),
            source,
        })?,
        (None, None) => return Err(LoadError::Missing),
    };

    if text.trim().is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(text)
}

fn load_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

/// Load and compile, or print the problem to stderr and exit with status 1.
pub fn compile_or_exit(path: Option<&Path>, expr: Option<&str>, color: bool) -> Program {
    let source = match load_program_source(path, expr) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match portint_compiler::compile(&source) {
        Ok(program) => program,
        Err(e) => {
            let file = source_name(path, expr);
            eprint!("{}", render_compile_error(&e, &source, file.as_deref(), color));
            std::process::exit(1);
        }
    }
}

/// Name shown in diagnostics: the file path, or none for stdin and `-e`.
pub fn source_name(path: Option<&Path>, expr: Option<&str>) -> Option<String> {
    match (expr, path) {
        (None, Some(path)) if path.as_os_str() != "-" => Some(path.display().to_string()),
        _ => None,
    }
}

pub fn render_compile_error(
    err: &portint_compiler::Error,
    source: &str,
    path: Option<&str>,
    color: bool,
) -> String {
    let Some(diagnostics) = err.diagnostics() else {
        return format!("error: {err}\n");
    };
    let mut printer = diagnostics.printer(source).colored(color);
    if let Some(path) = path {
        printer = printer.path(path);
    }
    printer.render()
}
