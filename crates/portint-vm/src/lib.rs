//! Runtime VM for executing lowered portint programs.
//!
//! A `Program` runs on an operand stack against one `ErrorContext`. Every
//! arithmetic, shift, conversion and comparison instruction becomes an
//! `Operation` that the selected backend evaluates: the exact simulation
//! engine, a limb machine emulating generated code on a narrow native word,
//! or an emulation of the legacy C promotion rules.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    Backend, EvalConfig, Execution, LegacyC, LegacyOutcome, NativeMachine, NativeWidth,
    NoopTracer, PrintTracer, RuntimeError, Slot, Tracer, UndefinedBehavior, VM, Verbosity,
};
