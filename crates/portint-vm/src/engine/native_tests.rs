//! The limb machine must agree with the exact engine on every width,
//! including the fallback value and which error is reported.

use portint_core::{
    Backend, BinOp, CmpOp, Conversion, ErrorContext, ErrorKind, Fault, IntType, Operation,
    Output, ShiftOp, Value,
};

use super::{NativeMachine, NativeWidth};

type Outcome = (Result<Output, Fault>, Option<ErrorKind>);

fn simulate(op: &Operation) -> Outcome {
    let mut ctx = ErrorContext::capture();
    let out = op.eval(&mut ctx);
    (out, ctx.error())
}

fn generate(op: &Operation, width: NativeWidth) -> Outcome {
    let mut ctx = ErrorContext::capture().with_backend(Backend::Generated);
    let out = NativeMachine::new(width).eval(op, &mut ctx);
    (out, ctx.error())
}

fn assert_agrees(op: &Operation) {
    let expected = simulate(op);
    for width in NativeWidth::ALL {
        assert_eq!(generate(op, width), expected, "{op} on {width}");
    }
}

/// Boundary and small values of `ty`.
fn samples(ty: IntType) -> Vec<Value> {
    let mut candidates = [
        ty.min(),
        ty.min() + 1,
        -100,
        -2,
        -1,
        0,
        1,
        2,
        3,
        7,
        100,
        ty.max() / 2,
        ty.max() - 1,
        ty.max(),
    ];
    candidates.sort_unstable();
    let mut candidates = candidates.to_vec();
    candidates.dedup();
    candidates
        .into_iter()
        .filter_map(|v| Value::new(ty, v))
        .collect()
}

#[test]
fn binary_operations_agree() {
    let ops = [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Rem];
    for a in IntType::ALL {
        for b in IntType::ALL {
            for x in samples(a) {
                for y in samples(b) {
                    for op in ops {
                        assert_agrees(&Operation::binary(op, x, y));
                    }
                }
            }
        }
    }
}

#[test]
fn comparisons_agree() {
    for a in IntType::ALL {
        for b in IntType::ALL {
            for x in samples(a) {
                for y in samples(b) {
                    assert_agrees(&Operation::compare(CmpOp::Lt, x, y));
                    assert_agrees(&Operation::compare(CmpOp::Eq, x, y));
                }
            }
        }
    }
}

#[test]
fn conversions_agree() {
    for from in IntType::ALL {
        for to in IntType::ALL {
            for x in samples(from) {
                for conv in Conversion::ALL {
                    assert_agrees(&Operation::convert(conv, x, to));
                }
            }
        }
    }
}

#[test]
fn shifts_agree() {
    let amounts: Vec<_> = [IntType::U32, IntType::I8]
        .into_iter()
        .flat_map(samples)
        .chain([7, 8, 15, 16, 31, 32, 63, 64].map(|n| Value::new(IntType::U32, n).unwrap()))
        .collect();
    for ty in IntType::ALL {
        for x in samples(ty) {
            for &n in &amounts {
                for op in [ShiftOp::Shl, ShiftOp::Shr, ShiftOp::WrapShl] {
                    assert_agrees(&Operation::shift(op, x, n));
                }
            }
        }
    }
}

#[test]
fn u64_square_keeps_low_bits() {
    let max = Value::new(IntType::U64, u64::MAX as i128).unwrap();
    let (out, err) = generate(&Operation::binary(BinOp::Mul, max, max), NativeWidth::W16);
    assert_eq!(out, Ok(Output::Int(Value::new(IntType::U64, 1).unwrap())));
    assert_eq!(err, Some(ErrorKind::Overflow));
}

#[test]
fn u64_mixed_with_signed_is_exact() {
    let big = Value::new(IntType::U64, u64::MAX as i128 - 1).unwrap();
    let two = Value::new(IntType::I8, 2).unwrap();
    let (out, err) = generate(&Operation::binary(BinOp::Div, big, two), NativeWidth::W32);
    assert_eq!(out, Ok(Output::Int(Value::new(IntType::I64, i64::MAX as i128).unwrap())));
    assert_eq!(err, None);
}

#[test]
fn unsafe_mode_skips_checks() {
    let x = Value::new(IntType::U8, 200).unwrap();
    let op = Operation::binary(BinOp::Add, x, x);
    let mut ctx = ErrorContext::unsafe_mode().with_backend(Backend::Generated);
    let out = NativeMachine::new(NativeWidth::W16).eval(&op, &mut ctx);
    assert_eq!(out, Ok(Output::Int(Value::new(IntType::U8, 144).unwrap())));
    assert!(!ctx.has_error());
}

#[test]
fn width_catalog() {
    assert_eq!(NativeWidth::from_bits(16), Some(NativeWidth::W16));
    assert_eq!(NativeWidth::from_bits(8), None);
    assert_eq!(NativeWidth::default(), NativeWidth::W32);
    assert_eq!(NativeWidth::W64.to_string(), "64-bit");
    assert_eq!(NativeMachine::new(NativeWidth::W16).width(), NativeWidth::W16);
}
