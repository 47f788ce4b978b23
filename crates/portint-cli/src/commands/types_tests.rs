use super::types::format_catalog;

#[test]
fn catalog_table() {
    insta::assert_snapshot!(format_catalog(), @r"
    type  bits                   min                   max
    u8       8                     0                   255
    u16     16                     0                 65535
    u32     32                     0            4294967295
    u64     64                     0  18446744073709551615
    i8       8                  -128                   127
    i16     16                -32768                 32767
    i32     32           -2147483648            2147483647
    i64     64  -9223372036854775808   9223372036854775807
    ");
}
