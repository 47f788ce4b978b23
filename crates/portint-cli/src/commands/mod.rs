pub mod check;
pub mod dump;
pub mod eval;
pub mod program_loader;
pub mod trace;
pub mod types;

#[cfg(test)]
mod eval_tests;
#[cfg(test)]
mod types_tests;
