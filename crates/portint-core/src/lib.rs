#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Portable safe-integer arithmetic.
//!
//! Explicit, platform-independent replacements for C's implicit integer
//! promotions and conversions:
//! - **Catalog** (`IntType`): signedness, width and bounds of `u8`..`i64`
//! - **Conversions** (`convert`): widen, narrow, saturate, wrap, reinterpret
//! - **Promotion** (`promote`): common working type for mixed operands
//! - **Evaluator** (`arith`): checked arithmetic and shifts
//! - **Error context** (`ErrorContext`): sticky first-error-wins reporting
//!
//! Two API layers share one engine: the dynamic `Value` API used by the VM,
//! and the statically typed `U8`..`I64` surface in [`fixed`].

pub mod arith;
mod colors;
mod context;
pub mod convert;
mod error;
pub mod fixed;
mod int_type;
mod invariants;
mod op;
pub mod program;
pub mod promote;
mod value;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod convert_tests;
#[cfg(test)]
mod int_type_tests;
#[cfg(test)]
mod program_tests;

pub use colors::Colors;
pub use context::{Backend, ErrorContext, MathMode};
pub use error::{ErrorKind, Fault, Misuse};
pub use fixed::{FixedInt, I8, I16, I32, I64, U8, U16, U32, U64};
pub use int_type::{BitWidth, IntType};
pub use op::{BinOp, CmpOp, Conversion, OpKind, Operation, Output, ShiftOp};
pub use program::{Instr, Local, LocalId, Program, TooManyLocals, Ty};
pub use value::Value;
