//! Semantic analysis: name resolution and static typing.

mod check;
pub mod typed;


pub use check::Checker;
pub use typed::{Checked, TypedExpr, TypedKind, TypedLet};
