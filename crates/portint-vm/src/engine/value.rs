//! Operand stack slots and execution results.

use std::fmt;

use portint_core::{ErrorKind, Output, Ty, Value};

use super::legacy::UndefinedBehavior;

/// A value on the operand stack or in a local.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Slot {
    Int(Value),
    Bool(bool),
}

impl Slot {
    pub fn ty(self) -> Ty {
        match self {
            Self::Int(v) => Ty::Int(v.ty()),
            Self::Bool(_) => Ty::Bool,
        }
    }

    pub fn as_int(self) -> Option<Value> {
        match self {
            Self::Int(v) => Some(v),
            Self::Bool(_) => None,
        }
    }
}

impl From<Output> for Slot {
    fn from(out: Output) -> Self {
        match out {
            Output::Int(v) => Self::Int(v),
            Output::Bool(b) => Self::Bool(b),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Outcome of running a program to completion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize)]
pub struct Execution {
    /// Value of the result expression; `None` for a program of bindings only.
    pub result: Option<Slot>,
    /// Sticky error left in the context. Always `None` in unsafe mode.
    pub error: Option<ErrorKind>,
    /// First operation C leaves undefined, legacy backend only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undefined: Option<UndefinedBehavior>,
}
