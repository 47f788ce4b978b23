//! Sticky error context.
//!
//! A context is created per lexical scope in one of two math modes and passed
//! by `&mut` into every fallible operation. It remembers the first failure
//! only, and insists that a recorded failure is inspected before it is
//! cleared or before the context goes out of scope.
//!
//! ```text
//! Unset --op fails--> Set(kind) --has_error()--> Read --clear()--> Unset
//!                        |                                  ^
//!                        +--------disregard_any_error()-----+
//! ```

use crate::{ErrorKind, Fault, Misuse, OpKind};

/// Scope-level policy for arithmetic failures.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathMode {
    /// Failures are hard faults in simulation and unchecked in generated code.
    Unsafe,
    /// Failures set the sticky error and execution continues with a fallback value.
    #[default]
    Capture,
}

/// Which side of the simulation/generated-code pair the context belongs to.
///
/// Only matters in unsafe mode: simulation faults, generated code never checks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Backend {
    #[default]
    Simulation,
    Generated,
}

/// Scoped sticky error state.
#[derive(Debug)]
#[must_use = "an error context must be inspected before it leaves scope"]
pub struct ErrorContext {
    mode: MathMode,
    backend: Backend,
    sticky: Option<ErrorKind>,
    read_since_set: bool,
}

impl ErrorContext {
    pub fn new(mode: MathMode) -> Self {
        Self {
            mode,
            backend: Backend::Simulation,
            sticky: None,
            read_since_set: false,
        }
    }

    /// Enter unsafe math mode.
    pub fn unsafe_mode() -> Self {
        Self::new(MathMode::Unsafe)
    }

    /// Enter capture mode.
    pub fn capture() -> Self {
        Self::new(MathMode::Capture)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn mode(&self) -> MathMode {
        self.mode
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Whether a failure is recorded. Counts as reading the error.
    pub fn has_error(&mut self) -> bool {
        self.error().is_some()
    }

    /// The recorded failure, if any. Counts as reading the error.
    pub fn error(&mut self) -> Option<ErrorKind> {
        if self.sticky.is_some() {
            self.read_since_set = true;
        }
        self.sticky
    }

    /// Look at the sticky error without satisfying the read requirement.
    pub fn peek(&self) -> Option<ErrorKind> {
        self.sticky
    }

    /// Whether a recorded error is still waiting to be read.
    pub fn is_unread(&self) -> bool {
        self.sticky.is_some() && !self.read_since_set
    }

    /// Reset to unset. Requires the error to have been read first.
    pub fn try_clear(&mut self) -> Result<(), Misuse> {
        if self.is_unread() {
            return Err(Misuse::ClearedWithoutRead);
        }
        self.reset();
        Ok(())
    }

    /// Reset to unset, faulting if a recorded error was never read.
    #[track_caller]
    pub fn clear(&mut self) {
        if let Err(misuse) = self.try_clear() {
            Fault::from(misuse).raise();
        }
    }

    /// Drop any recorded error without reading it. Always legal.
    pub fn disregard_any_error(&mut self) {
        self.reset();
    }

    /// Acknowledge the pending error without branching on it.
    ///
    /// The error stays sticky so a later `has_error()` still sees it, but
    /// `clear()` and scope exit no longer fault.
    pub fn defer_check(&mut self) {
        if self.sticky.is_some() {
            self.read_since_set = true;
        }
    }

    /// Leave the scope explicitly, reporting an unread error as misuse.
    pub fn finish(mut self) -> Result<Option<ErrorKind>, Misuse> {
        let result = match self.sticky {
            Some(kind) if !self.read_since_set => Err(Misuse::UnreadAtScopeExit(kind)),
            sticky => Ok(sticky),
        };
        self.reset();
        result
    }

    /// Record a failure of `op`.
    ///
    /// Returns a fault only in unsafe mode on the simulation backend. In
    /// capture mode the first failure wins and later ones are discarded.
    pub fn report(&mut self, kind: ErrorKind, op: OpKind) -> Result<(), Fault> {
        match (self.mode, self.backend) {
            (MathMode::Unsafe, Backend::Simulation) => Err(Fault::Unsafe { kind, op }),
            (MathMode::Unsafe, Backend::Generated) => Ok(()),
            (MathMode::Capture, _) => {
                if self.sticky.is_none() {
                    self.sticky = Some(kind);
                    self.read_since_set = false;
                }
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.sticky = None;
        self.read_since_set = false;
    }
}

impl Drop for ErrorContext {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(kind) = self.sticky.filter(|_| !self.read_since_set) {
            Fault::from(Misuse::UnreadAtScopeExit(kind)).raise();
        }
    }
}
