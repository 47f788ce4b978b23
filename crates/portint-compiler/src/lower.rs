//! Lowering from the typed tree to a flat `Program`.
//!
//! Operands are emitted left to right, so instruction order matches the
//! evaluation order of the source and a sticky error always comes from the
//! leftmost failing operation.

use portint_core::{Instr, Program, TooManyLocals};

use crate::analyze::{Checked, TypedExpr, TypedKind};

pub fn lower(checked: &Checked) -> Result<Program, TooManyLocals> {
    let mut program = Program::new();
    // A checked tree without errors has exactly one let per slot, in slot order.
    for stmt in &checked.lets {
        let name = checked
            .locals
            .get(stmt.local as usize)
            .map_or("_", String::as_str);
        let local = program.add_local(name, stmt.value.ty)?;
        debug_assert_eq!(local, stmt.local);
    }
    for stmt in &checked.lets {
        emit(&mut program, &stmt.value);
        program.push(Instr::Store(stmt.local));
    }
    if let Some(tail) = &checked.tail {
        emit(&mut program, tail);
        program.set_result(Some(tail.ty));
    }
    Ok(program)
}

fn emit(program: &mut Program, expr: &TypedExpr) {
    match &expr.kind {
        TypedKind::Const(v) => {
            program.push(Instr::Push(*v));
        }
        TypedKind::Local(id) => {
            program.push(Instr::Load(*id));
        }
        TypedKind::Binary(op, lhs, rhs) => {
            emit(program, lhs);
            emit(program, rhs);
            program.push(Instr::Binary(*op));
        }
        TypedKind::Shift(op, lhs, amount) => {
            emit(program, lhs);
            emit(program, amount);
            program.push(Instr::Shift(*op));
        }
        TypedKind::Compare(op, lhs, rhs) => {
            emit(program, lhs);
            emit(program, rhs);
            program.push(Instr::Compare(*op));
        }
        TypedKind::Convert(conv, to, arg) => {
            emit(program, arg);
            program.push(Instr::Convert(*conv, *to));
        }
    }
}
