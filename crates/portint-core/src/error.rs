//! Error taxonomy for arithmetic, conversions and error-context discipline.

use crate::{IntType, OpKind};

/// Recoverable arithmetic conditions recorded in an [`ErrorContext`](crate::ErrorContext).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, thiserror::Error, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Result above the working type's maximum.
    #[error("overflow")]
    Overflow,
    /// Result below the working type's minimum.
    #[error("underflow")]
    Underflow,
    #[error("divide by zero")]
    DivideByZero,
    /// Narrowing lost data: the value does not fit the target type.
    #[error("truncation data loss")]
    TruncationDataLoss,
    /// Shift amount negative or not below the operand width.
    #[error("shift amount out of range")]
    ShiftOutOfRange,
}

/// Programming errors in the use of the arithmetic model.
///
/// Never recorded as sticky errors: the simulation treats every one of them
/// as a hard fault.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, thiserror::Error)]
pub enum Misuse {
    #[error("error context cleared before its error was read")]
    ClearedWithoutRead,
    #[error("error context left scope with an unread {0} error")]
    UnreadAtScopeExit(ErrorKind),
    #[error("wrap conversion to signed type {0} is not defined")]
    SignedWrapTarget(IntType),
    #[error("shift of signed operand type {0} is not allowed")]
    SignedShift(IntType),
    #[error("cannot widen {from} to {to}: not every value is representable")]
    NotWidening { from: IntType, to: IntType },
    #[error("cannot reinterpret {from} as {to}: widths differ")]
    WidthMismatch { from: IntType, to: IntType },
}

/// A hard fault raised by the simulation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Fault {
    /// First infraction under unsafe math mode.
    #[error("{kind} in `{op}` under unsafe math mode")]
    Unsafe { kind: ErrorKind, op: OpKind },
    #[error("error context misuse: {0}")]
    Misuse(#[from] Misuse),
}

impl Fault {
    pub fn misuse(&self) -> Option<Misuse> {
        match self {
            Self::Misuse(m) => Some(*m),
            Self::Unsafe { .. } => None,
        }
    }
}
