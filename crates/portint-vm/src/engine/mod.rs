//! Execution engine: VM loop, backends and tracing.

mod error;
mod legacy;
mod native;
mod trace;
mod value;
mod vm;

#[cfg(test)]
mod native_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use legacy::{LegacyC, LegacyOutcome, UndefinedBehavior};
pub use native::{NativeMachine, NativeWidth};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::{Execution, Slot};
pub use vm::{Backend, EvalConfig, VM};
