//! Tracing infrastructure for debugging program execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over its tracer. With `NoopTracer` every trait method
//! is an `#[inline(always)]` empty function, so tracing calls and their
//! arguments compile away and no tracing state lives in the VM itself.
//! `PrintTracer` collects formatted lines for the `trace` command.

use portint_core::{Colors, ErrorKind, Instr, LocalId, OpKind, Operation, Program};

use super::legacy::UndefinedBehavior;
use super::value::Slot;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Instructions, produced values, sticky errors and undefined behaviour.
    #[default]
    Default,
    /// Verbose (-v): also each operation with its operands and working type.
    Verbose,
    /// Very verbose (-vv): also values moved through locals.
    VeryVerbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_instruction` - before executing an instruction
/// - `trace_operation` - before the backend evaluates an operation
/// - `trace_error` - when the sticky error goes from unset to set
/// - `trace_undefined` - when the legacy backend hits undefined behaviour
/// - `trace_result` - after an operation pushes its value
/// - `trace_load` / `trace_store` - when a local is read or written
/// - `trace_finish` - once, after the last instruction
pub trait Tracer {
    fn trace_instruction(&mut self, ip: usize, instr: &Instr);

    fn trace_operation(&mut self, op: &Operation);

    fn trace_error(&mut self, kind: ErrorKind);

    fn trace_undefined(&mut self, ub: UndefinedBehavior);

    fn trace_result(&mut self, slot: Slot);

    fn trace_load(&mut self, local: LocalId, slot: Slot);

    fn trace_store(&mut self, local: LocalId, slot: Slot);

    fn trace_finish(&mut self, result: Option<Slot>, error: Option<ErrorKind>);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _ip: usize, _instr: &Instr) {}

    #[inline(always)]
    fn trace_operation(&mut self, _op: &Operation) {}

    #[inline(always)]
    fn trace_error(&mut self, _kind: ErrorKind) {}

    #[inline(always)]
    fn trace_undefined(&mut self, _ub: UndefinedBehavior) {}

    #[inline(always)]
    fn trace_result(&mut self, _slot: Slot) {}

    #[inline(always)]
    fn trace_load(&mut self, _local: LocalId, _slot: Slot) {}

    #[inline(always)]
    fn trace_store(&mut self, _local: LocalId, _slot: Slot) {}

    #[inline(always)]
    fn trace_finish(&mut self, _result: Option<Slot>, _error: Option<ErrorKind>) {}
}

/// Sub-lines start under the mnemonic column of instruction lines.
const SUBLINE_INDENT: usize = 5;

/// Tracer that collects an execution trace for display.
pub struct PrintTracer<'p> {
    /// Program being traced, for local names and operand text.
    program: &'p Program,
    verbosity: Verbosity,
    lines: Vec<String>,
    colors: Colors,
}

impl<'p> PrintTracer<'p> {
    pub fn new(program: &'p Program, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            program,
            verbosity,
            lines: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn local_name(&self, local: LocalId) -> String {
        self.program
            .local_name(local)
            .map_or_else(|| format!("#{local}"), str::to_owned)
    }

    fn add_subline(&mut self, symbol: &str, content: &str) {
        let line = format!("{:indent$}{symbol} {content}", "", indent = SUBLINE_INDENT);
        self.lines.push(line);
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_instruction(&mut self, ip: usize, instr: &Instr) {
        let c = self.colors;
        let mnemonic = format!("{:<8}", instr.mnemonic());
        let operand = self.program.operand_text(instr);
        let line = format!(
            "{}{ip:>3}{}  {}{mnemonic}{} {}{operand}{}",
            c.dim, c.reset, c.blue, c.reset, c.green, c.reset
        );
        self.lines.push(line.trim_end().to_owned());
    }

    fn trace_operation(&mut self, op: &Operation) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        let content = match op.kind {
            OpKind::Binary(_) | OpKind::Compare(_) => {
                format!("{op} {}in {}{}", c.dim, op.result_type, c.reset)
            }
            OpKind::Shift(_) | OpKind::Convert(_) => op.to_string(),
        };
        self.add_subline("~", &content);
    }

    fn trace_error(&mut self, kind: ErrorKind) {
        let c = self.colors;
        self.add_subline("!", &format!("{}{kind}{}", c.red, c.reset));
    }

    fn trace_undefined(&mut self, ub: UndefinedBehavior) {
        let c = self.colors;
        self.add_subline("?", &format!("{}undefined: {ub}{}", c.red, c.reset));
    }

    fn trace_result(&mut self, slot: Slot) {
        let c = self.colors;
        self.add_subline("=", &format!("{}{slot}{}", c.green, c.reset));
    }

    fn trace_load(&mut self, _local: LocalId, slot: Slot) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.add_subline("=", &format!("{}{slot}{}", c.green, c.reset));
    }

    fn trace_store(&mut self, local: LocalId, slot: Slot) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let name = self.local_name(local);
        self.add_subline("=", &format!("{name} <- {}{slot}{}", c.green, c.reset));
    }

    fn trace_finish(&mut self, result: Option<Slot>, error: Option<ErrorKind>) {
        let c = self.colors;
        let result = result.map_or_else(|| "-".to_owned(), |slot| slot.to_string());
        self.lines.push(String::new());
        self.lines.push(format!("{}result:{} {result}", c.dim, c.reset));
        if let Some(kind) = error {
            self.lines
                .push(format!("{}error:{} {}{kind}{}", c.dim, c.reset, c.red, c.reset));
        }
    }
}
