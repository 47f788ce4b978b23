//! Virtual machine for executing lowered programs.

use portint_core::{
    Backend as ContextBackend, ErrorContext, Instr, LocalId, MathMode, Operation, Output,
    Program, Ty, Value,
};

use super::error::RuntimeError;
use super::legacy::{self, LegacyC, UndefinedBehavior};
use super::native::{NativeMachine, NativeWidth};
use super::trace::{NoopTracer, Tracer};
use super::value::{Execution, Slot};

/// Which evaluator runs each operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Exact evaluation with host-wide integers.
    #[default]
    Simulation,
    /// Generated code on a target with the given word size.
    Generated(NativeWidth),
    /// Plain C with an `int` of the given width.
    Legacy(NativeWidth),
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Self::Simulation => "sim",
            Self::Generated(_) => "generated",
            Self::Legacy(_) => "legacy",
        }
    }

    pub fn native_width(self) -> Option<NativeWidth> {
        match self {
            Self::Simulation => None,
            Self::Generated(w) | Self::Legacy(w) => Some(w),
        }
    }

    fn context_backend(self) -> ContextBackend {
        match self {
            Self::Generated(_) => ContextBackend::Generated,
            Self::Simulation | Self::Legacy(_) => ContextBackend::Simulation,
        }
    }
}

/// Execution settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvalConfig {
    pub(crate) mode: MathMode,
    pub(crate) backend: Backend,
}

impl EvalConfig {
    /// Capture mode on the simulation backend.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: MathMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the word size of the generated or legacy backend. No effect on simulation.
    pub fn native_width(mut self, width: NativeWidth) -> Self {
        self.backend = match self.backend {
            Backend::Simulation => Backend::Simulation,
            Backend::Generated(_) => Backend::Generated(width),
            Backend::Legacy(_) => Backend::Legacy(width),
        };
        self
    }

    pub fn get_mode(&self) -> MathMode {
        self.mode
    }

    pub fn get_backend(&self) -> Backend {
        self.backend
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.mode).with_backend(self.backend.context_backend())
    }
}

/// Virtual machine state for one program run.
pub struct VM<'p> {
    program: &'p Program,
    config: EvalConfig,
    stack: Vec<Slot>,
    locals: Vec<Option<Slot>>,
    /// First undefined operation seen by the legacy backend.
    undefined: Option<UndefinedBehavior>,
}

impl<'p> VM<'p> {
    pub fn new(program: &'p Program, config: EvalConfig) -> Self {
        Self {
            program,
            config,
            stack: Vec::new(),
            locals: vec![None; program.locals().len()],
            undefined: None,
        }
    }

    /// Run the program to completion.
    ///
    /// Uses `NoopTracer`, which gets completely optimized away.
    pub fn execute(self) -> Result<Execution, RuntimeError> {
        self.execute_with(&mut NoopTracer)
    }

    /// Run the program with a tracer for debugging.
    ///
    /// The sticky error is read once at the end and reported in the
    /// `Execution`; on a runtime error it is disregarded.
    pub fn execute_with<T: Tracer>(mut self, tracer: &mut T) -> Result<Execution, RuntimeError> {
        let mut ctx = self.config.context();
        let result = match self.run(&mut ctx, tracer) {
            Ok(result) => result,
            Err(e) => {
                ctx.disregard_any_error();
                return Err(e);
            }
        };

        let error = ctx.error();
        ctx.finish().map_err(portint_core::Fault::from)?;
        tracer.trace_finish(result, error);
        Ok(Execution {
            result,
            error,
            undefined: self.undefined,
        })
    }

    fn run<T: Tracer>(
        &mut self,
        ctx: &mut ErrorContext,
        tracer: &mut T,
    ) -> Result<Option<Slot>, RuntimeError> {
        let program = self.program;
        for (ip, instr) in program.instrs().iter().enumerate() {
            tracer.trace_instruction(ip, instr);
            self.step(ip, *instr, ctx, tracer)?;
        }

        let Some(ty) = program.result() else {
            return Ok(None);
        };
        let end = program.len();
        let slot = self.pop(end)?;
        self.assign(end, ty, slot).map(Some)
    }

    fn step<T: Tracer>(
        &mut self,
        ip: usize,
        instr: Instr,
        ctx: &mut ErrorContext,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let op = match instr {
            Instr::Push(v) => {
                self.stack.push(Slot::Int(v));
                return Ok(());
            }
            Instr::Load(local) => {
                let slot = self
                    .locals
                    .get(local as usize)
                    .copied()
                    .flatten()
                    .ok_or(RuntimeError::UnboundLocal(local))?;
                tracer.trace_load(local, slot);
                self.stack.push(slot);
                return Ok(());
            }
            Instr::Store(local) => {
                let slot = self.pop(ip)?;
                let slot = self.store(ip, local, slot)?;
                tracer.trace_store(local, slot);
                return Ok(());
            }
            Instr::Binary(op) => {
                let (lhs, rhs) = self.pop_pair(ip)?;
                Operation::binary(op, lhs, rhs)
            }
            Instr::Shift(op) => {
                let (lhs, amount) = self.pop_pair(ip)?;
                Operation::shift(op, lhs, amount)
            }
            Instr::Compare(op) => {
                let (lhs, rhs) = self.pop_pair(ip)?;
                Operation::compare(op, lhs, rhs)
            }
            Instr::Convert(conv, to) => {
                let v = self.pop_int(ip)?;
                Operation::convert(conv, v, to)
            }
        };

        let before = ctx.peek();
        let out = self.eval(op, ctx, tracer)?;
        if let (None, Some(kind)) = (before, ctx.peek()) {
            tracer.trace_error(kind);
        }

        let slot = Slot::from(out);
        tracer.trace_result(slot);
        self.stack.push(slot);
        Ok(())
    }

    fn eval<T: Tracer>(
        &mut self,
        op: Operation,
        ctx: &mut ErrorContext,
        tracer: &mut T,
    ) -> Result<Output, RuntimeError> {
        let out = match self.config.backend {
            Backend::Simulation => {
                tracer.trace_operation(&op);
                op.eval(ctx)?
            }
            Backend::Generated(width) => {
                tracer.trace_operation(&op);
                NativeMachine::new(width).eval(&op, ctx)?
            }
            Backend::Legacy(int) => {
                let c = LegacyC::new(int);
                let op = c.retype(op);
                tracer.trace_operation(&op);
                let outcome = c.eval(&op);
                if let Some(ub) = outcome.undefined {
                    tracer.trace_undefined(ub);
                    self.undefined.get_or_insert(ub);
                }
                outcome.output
            }
        };
        Ok(out)
    }

    fn store(&mut self, ip: usize, local: LocalId, slot: Slot) -> Result<Slot, RuntimeError> {
        let ty = self
            .program
            .local(local)
            .map(|l| l.ty)
            .ok_or(RuntimeError::UnboundLocal(local))?;
        let slot = self.assign(ip, ty, slot)?;
        self.locals[local as usize] = Some(slot);
        Ok(slot)
    }

    /// Check `slot` against a declared type. The legacy backend converts
    /// integers instead, as a C assignment does.
    fn assign(&self, ip: usize, ty: Ty, slot: Slot) -> Result<Slot, RuntimeError> {
        match (ty, slot) {
            (Ty::Bool, Slot::Bool(_)) => Ok(slot),
            (Ty::Int(ty), Slot::Int(v)) if v.ty() == ty => Ok(slot),
            (Ty::Int(ty), Slot::Int(v)) if matches!(self.config.backend, Backend::Legacy(_)) => {
                Ok(Slot::Int(legacy::cast(v, ty)))
            }
            _ => Err(RuntimeError::TypeMismatch {
                ip,
                expected: ty,
                found: slot.ty(),
            }),
        }
    }

    fn pop(&mut self, ip: usize) -> Result<Slot, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow(ip))
    }

    fn pop_int(&mut self, ip: usize) -> Result<Value, RuntimeError> {
        self.pop(ip)?
            .as_int()
            .ok_or(RuntimeError::ExpectedInteger(ip))
    }

    /// Pop the right operand, then the left.
    fn pop_pair(&mut self, ip: usize) -> Result<(Value, Value), RuntimeError> {
        let rhs = self.pop_int(ip)?;
        let lhs = self.pop_int(ip)?;
        Ok((lhs, rhs))
    }
}
