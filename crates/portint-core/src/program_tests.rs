use crate::{
    BinOp, CmpOp, Colors, Conversion, Instr, IntType, LocalId, Program, ShiftOp, TooManyLocals, Ty,
    Value,
};

fn scaling_program() -> Program {
    let mut p = Program::new();
    let x = p.add_local("x", Ty::Int(IntType::U16)).unwrap();
    p.push(Instr::Push(Value::new(IntType::U16, 1000).unwrap()));
    p.push(Instr::Store(x));
    p.push(Instr::Load(x));
    p.push(Instr::Convert(Conversion::Widen, IntType::U32));
    p.push(Instr::Push(Value::new(IntType::U32, 2000).unwrap()));
    p.push(Instr::Binary(BinOp::Mul));
    p.push(Instr::Push(Value::new(IntType::U8, 10).unwrap()));
    p.push(Instr::Shift(ShiftOp::Shr));
    p.set_result(Some(Ty::Int(IntType::U32)));
    p
}

#[test]
fn dump_listing() {
    let p = scaling_program();

    insta::assert_snapshot!(p.dump(Colors::OFF), @r"
    locals: x: u16
    result: u32

      0  push     1000u16
      1  store    x
      2  load     x
      3  widen    u32
      4  push     2000u32
      5  mul
      6  push     10u8
      7  shr
    ");
}

#[test]
fn dump_without_result() {
    let mut p = Program::new();
    p.push(Instr::Push(Value::new(IntType::I8, -1).unwrap()));
    p.push(Instr::Push(Value::new(IntType::I8, 1).unwrap()));
    p.push(Instr::Compare(CmpOp::Lt));

    insta::assert_snapshot!(p.dump(Colors::OFF), @r"
    result: -

      0  push     -1i8
      1  push     1i8
      2  lt
    ");
}

#[test]
fn colored_dump_has_escapes() {
    let p = scaling_program();
    let out = p.dump(Colors::ON);
    assert!(out.contains("\x1b[34mpush"));
    assert!(out.contains("\x1b[32m1000u16"));
}

#[test]
fn locals_allocate_fresh_slots() {
    let mut p = Program::new();
    let a = p.add_local("a", Ty::Int(IntType::I8)).unwrap();
    let b = p.add_local("a", Ty::Bool).unwrap();
    assert_ne!(a, b);
    assert_eq!(p.local_name(b), Some("a"));
    assert_eq!(p.local(b).map(|l| l.ty), Some(Ty::Bool));
    assert_eq!(p.local_name(7), None);
    assert_eq!(p.operand_text(&Instr::Load(7)), "#7");
}

#[test]
fn local_slots_are_bounded() {
    let mut p = Program::new();
    for _ in 0..=LocalId::MAX {
        p.add_local("x", Ty::Bool).unwrap();
    }
    assert_eq!(p.locals().len(), 65536);
    assert_eq!(p.add_local("x", Ty::Bool), Err(TooManyLocals));
    assert_eq!(p.locals().len(), 65536);
    assert_eq!(
        TooManyLocals.to_string(),
        "too many locals: a program holds at most 65536 slots"
    );
}

#[test]
fn accessors() {
    let p = scaling_program();
    assert_eq!(p.len(), 8);
    assert!(!p.is_empty());
    assert_eq!(p.result(), Some(Ty::Int(IntType::U32)));
    assert_eq!(p.locals().len(), 1);
    assert_eq!(p.locals()[0].name, "x");
    assert_eq!(p.instrs()[3].mnemonic(), "widen");
    assert_eq!(Ty::Bool.to_string(), "bool");
    assert_eq!(Ty::Bool.as_int(), None);
}
