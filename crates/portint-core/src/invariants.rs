//! Hard-fault raising, excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::Fault;

impl Fault {
    /// Stop the simulation. The panic location is the caller's, so the
    /// failing operation shows up in the message rather than engine internals.
    #[cold]
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{self}")
    }
}

#[track_caller]
pub(crate) fn expect_ok<T>(result: Result<T, Fault>) -> T {
    match result {
        Ok(v) => v,
        Err(fault) => fault.raise(),
    }
}
