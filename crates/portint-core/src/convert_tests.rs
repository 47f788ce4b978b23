use crate::convert::{narrow, reinterpret, saturate, widen, wrap};
use crate::{ErrorContext, ErrorKind, Fault, IntType, Misuse, Value};

fn v(ty: IntType, n: i128) -> Value {
    Value::new(ty, n).unwrap()
}

/// Representative values of a type: bounds, zero, one, and neighbours.
fn samples(ty: IntType) -> Vec<i128> {
    let mut out = vec![ty.min(), ty.min() + 1, 0, 1, ty.max() - 1, ty.max()];
    if ty.is_signed() {
        out.push(-1);
    }
    out
}

#[test]
fn widen_then_narrow_is_lossless() {
    let mut ctx = ErrorContext::capture();
    for from in IntType::ALL {
        for to in IntType::ALL.into_iter().filter(|to| to.can_represent(from)) {
            for n in samples(from) {
                let wide = widen(v(from, n), to).unwrap();
                assert_eq!(wide.get(), n);
                let back = narrow(wide, from, &mut ctx).unwrap();
                assert_eq!(back, v(from, n));
            }
        }
    }
    assert!(!ctx.has_error());
}

#[test]
fn widen_rejects_lossy_target() {
    let err = widen(v(IntType::U16, 1), IntType::I16).unwrap_err();
    assert_eq!(
        err,
        Misuse::NotWidening {
            from: IntType::U16,
            to: IntType::I16
        }
    );
}

#[test]
fn narrow_out_of_range_captures_and_wraps() {
    for from in IntType::ALL {
        for to in IntType::ALL {
            for n in samples(from).into_iter().filter(|n| !to.contains(*n)) {
                let mut ctx = ErrorContext::capture();
                let out = narrow(v(from, n), to, &mut ctx).unwrap();
                assert_eq!(ctx.error(), Some(ErrorKind::TruncationDataLoss));
                assert_eq!(out, Value::wrapping(to, n));
                if !to.is_signed() {
                    assert_eq!(out, wrap(v(from, n), to).unwrap());
                }
            }
        }
    }
}

#[test]
fn narrow_in_range_is_exact() {
    let mut ctx = ErrorContext::capture();
    let out = narrow(v(IntType::I64, -128), IntType::I8, &mut ctx).unwrap();
    assert_eq!(out.get(), -128);
    assert!(!ctx.has_error());
}

#[test]
fn narrow_unsafe_faults() {
    let mut ctx = ErrorContext::unsafe_mode();
    let err = narrow(v(IntType::U16, 300), IntType::U8, &mut ctx).unwrap_err();
    assert!(matches!(
        err,
        Fault::Unsafe {
            kind: ErrorKind::TruncationDataLoss,
            ..
        }
    ));
}

#[test]
fn saturate_clamps() {
    assert_eq!(saturate(v(IntType::U16, 300), IntType::U8).get(), 255);
    assert_eq!(saturate(v(IntType::I16, -300), IntType::I8).get(), -128);
    assert_eq!(saturate(v(IntType::I16, -1), IntType::U64).get(), 0);
    assert_eq!(saturate(v(IntType::U64, u64::MAX as i128), IntType::I64).get(), i64::MAX as i128);
    assert_eq!(saturate(v(IntType::I32, 42), IntType::U8).get(), 42);
}

#[test]
fn saturate_is_idempotent() {
    for from in IntType::ALL {
        for to in IntType::ALL {
            for n in samples(from) {
                let once = saturate(v(from, n), to);
                assert_eq!(saturate(once, to), once);
            }
        }
    }
}

#[test]
fn wrap_is_modular() {
    assert_eq!(wrap(v(IntType::U32, 70_000), IntType::U16).unwrap().get(), 4_464);
    assert_eq!(wrap(v(IntType::I8, -1), IntType::U32).unwrap().get(), u32::MAX as i128);
}

#[test]
fn wrap_rejects_signed_target() {
    let err = wrap(v(IntType::U32, 1), IntType::I16).unwrap_err();
    assert_eq!(err, Misuse::SignedWrapTarget(IntType::I16));
}

#[test]
fn reinterpret_keeps_bits() {
    let out = reinterpret(v(IntType::I16, -1), IntType::U16).unwrap();
    assert_eq!(out.get(), 65_535);

    let back = reinterpret(out, IntType::I16).unwrap();
    assert_eq!(back.get(), -1);

    let err = reinterpret(v(IntType::I16, 1), IntType::U32).unwrap_err();
    assert!(matches!(err, Misuse::WidthMismatch { .. }));
}

#[test]
fn value_methods_delegate() {
    let mut ctx = ErrorContext::capture();
    let x = v(IntType::U8, 200);
    assert_eq!(x.widen_to(IntType::I16).unwrap().get(), 200);
    assert_eq!(x.narrow_to(IntType::I8, &mut ctx).unwrap().get(), -56);
    assert_eq!(x.sat_to(IntType::I8).get(), 127);
    assert_eq!(x.reinterpret_as(IntType::I8).unwrap().get(), -56);
    ctx.disregard_any_error();
}
