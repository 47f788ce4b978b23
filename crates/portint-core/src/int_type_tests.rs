use crate::{BitWidth, IntType, Value};

#[test]
fn descriptor_is_total_for_catalog_widths() {
    for bits in [8, 16, 32, 64] {
        let u = IntType::descriptor(false, bits).unwrap();
        let i = IntType::descriptor(true, bits).unwrap();
        assert_eq!(u.bits(), bits);
        assert!(!u.is_signed());
        assert!(i.is_signed());
    }
}

#[test]
fn descriptor_rejects_other_widths() {
    assert_eq!(IntType::descriptor(false, 0), None);
    assert_eq!(IntType::descriptor(true, 24), None);
    assert_eq!(IntType::descriptor(false, 128), None);
}

#[test]
fn bounds_are_exact() {
    assert_eq!(IntType::U8.max(), 255);
    assert_eq!(IntType::U8.min(), 0);
    assert_eq!(IntType::I8.min(), -128);
    assert_eq!(IntType::I8.max(), 127);
    assert_eq!(IntType::U64.max(), u64::MAX as i128);
    assert_eq!(IntType::I64.min(), i64::MIN as i128);
    assert_eq!(IntType::I64.max(), i64::MAX as i128);
}

#[test]
fn can_represent() {
    assert!(IntType::U32.can_represent(IntType::U16));
    assert!(IntType::I32.can_represent(IntType::U16));
    assert!(IntType::U16.can_represent(IntType::U16));
    assert!(!IntType::I16.can_represent(IntType::U16));
    assert!(!IntType::U64.can_represent(IntType::I8));
    assert!(!IntType::U8.can_represent(IntType::U16));
}

#[test]
fn names_roundtrip() {
    for ty in IntType::ALL {
        assert_eq!(IntType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(IntType::from_name("u128"), None);
    assert_eq!(IntType::I16.to_string(), "i16");
}

#[test]
fn width_mask_and_wider() {
    assert_eq!(BitWidth::W8.mask(), 0xff);
    assert_eq!(BitWidth::W64.mask(), u64::MAX);
    assert_eq!(BitWidth::W16.wider(), Some(BitWidth::W32));
    assert_eq!(BitWidth::W64.wider(), None);
}

#[test]
fn value_twos_complement() {
    let v = Value::new(IntType::I8, -1).unwrap();
    assert_eq!(v.bits(), 0xff);
    assert_eq!(v.get(), -1);

    let w = Value::wrapping(IntType::U16, 70_000);
    assert_eq!(w.get(), 70_000 - 65_536);

    assert_eq!(Value::new(IntType::U8, 256), None);
    assert_eq!(Value::new(IntType::I64, i64::MIN as i128).unwrap().get(), i64::MIN as i128);
}

#[test]
fn value_display() {
    let v = Value::new(IntType::I16, -42).unwrap();
    assert_eq!(v.to_string(), "-42i16");
}

#[test]
fn serializes_as_names() {
    let v = Value::new(IntType::I32, -7).unwrap();
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"{"type":"i32","value":-7}"#);

    let ty: IntType = serde_json::from_str(r#""u64""#).unwrap();
    assert_eq!(ty, IntType::U64);
    assert!(serde_json::from_str::<IntType>(r#""u7""#).is_err());
}
