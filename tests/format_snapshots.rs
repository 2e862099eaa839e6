//! Snapshot tests of the textual output forms: hex literals, C array
//! literals and decimal strings.

use std::str::FromStr;

use bignum::BigInt;

#[test]
fn hex_literal_compaction() {
    // the top limb sheds redundant sign-extension byte pairs
    insta::assert_snapshot!(BigInt::from(0).to_hex_literal(), @"16#00");
    insta::assert_snapshot!(BigInt::from(1).to_hex_literal(), @"16#01");
    insta::assert_snapshot!(BigInt::from(-1).to_hex_literal(), @"16#FF");
    insta::assert_snapshot!(BigInt::from(127).to_hex_literal(), @"16#7F");
    insta::assert_snapshot!(BigInt::from(-128).to_hex_literal(), @"16#80");
    insta::assert_snapshot!(BigInt::from(128).to_hex_literal(), @"16#0080");
    insta::assert_snapshot!(BigInt::from(255).to_hex_literal(), @"16#00FF");
    insta::assert_snapshot!(BigInt::from(65535).to_hex_literal(), @"16#00FFFF");
    insta::assert_snapshot!(BigInt::from(-2).to_hex_literal(), @"16#FE");
}

#[test]
fn hex_literal_multi_limb() {
    insta::assert_snapshot!(BigInt::from(i64::MAX).to_hex_literal(), @"16#7FFFFFFFFFFFFFFF");
    insta::assert_snapshot!(BigInt::from(i64::MIN).to_hex_literal(), @"16#8000000000000000");
    insta::assert_snapshot!((BigInt::from(1) << 32).to_hex_literal(), @"16#0100000000");
}

#[test]
fn debug_form_is_the_hex_literal() {
    insta::assert_snapshot!(format!("{:?}", BigInt::from(255)), @"16#00FF");
}

#[test]
fn c_literals() {
    // four-byte big-endian count, then the minimal two's-complement payload
    insta::assert_snapshot!(BigInt::from(0).to_c_literal(), @"{0x00,0x00,0x00,0x01,0x00}");
    insta::assert_snapshot!(BigInt::from(1).to_c_literal(), @"{0x00,0x00,0x00,0x01,0x01}");
    insta::assert_snapshot!(BigInt::from(-1).to_c_literal(), @"{0x00,0x00,0x00,0x01,0xFF}");
    insta::assert_snapshot!(BigInt::from(255).to_c_literal(), @"{0x00,0x00,0x00,0x02,0x00,0xFF}");
    insta::assert_snapshot!(BigInt::from(-256).to_c_literal(), @"{0x00,0x00,0x00,0x02,0xFF,0x00}");
}

#[test]
fn decimal_strings() {
    insta::assert_snapshot!(
        BigInt::from(10).pow(40),
        @"10000000000000000000000000000000000000000"
    );
    insta::assert_snapshot!(
        (BigInt::from(1) << 127).pred(),
        @"170141183460469231731687303715884105727"
    );
    insta::assert_snapshot!(
        -(BigInt::from(1) << 127),
        @"-170141183460469231731687303715884105728"
    );
}

#[test]
fn radix_strings() {
    insta::assert_snapshot!(BigInt::from(255).to_str_radix(16), @"ff");
    insta::assert_snapshot!(BigInt::from(10).to_str_radix(2), @"1010");
    insta::assert_snapshot!(BigInt::from(-255).to_str_radix(16), @"-ff");
    insta::assert_snapshot!(BigInt::from(1234567890).to_str_radix(36), @"kf12oi");
}

#[test]
fn parse_and_print_agree_on_a_long_literal() {
    let text = "123456789012345678901234567890123456789012345678901234567890";
    let value = BigInt::from_str(text).unwrap();
    insta::assert_snapshot!(value, @"123456789012345678901234567890123456789012345678901234567890");
}
