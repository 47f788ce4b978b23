//! Errors that can occur during program execution.

use portint_core::{Fault, LocalId, Ty};

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// Unsafe-mode failure on the simulation backend, or misuse.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// Load of a slot that was never stored, or a slot the program does not declare.
    #[error("unbound local #{0}")]
    UnboundLocal(LocalId),

    #[error("operand stack underflow at instruction {0}")]
    StackUnderflow(usize),

    #[error("boolean operand where an integer is expected at instruction {0}")]
    ExpectedInteger(usize),

    #[error("type mismatch at instruction {ip}: expected {expected}, found {found}")]
    TypeMismatch { ip: usize, expected: Ty, found: Ty },
}
