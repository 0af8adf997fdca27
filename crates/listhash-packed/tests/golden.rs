use listhash_packed::{
    encode, keccak256, pack, pack_hex, pack_str, solidity_keccak256, solidity_sha256, Address,
    EncodingError, Integer, TypeSpec, Value,
};
use serde_json::json;

fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}

#[test]
fn uint256_encoding_matches_big_endian_reference() {
    let value = Integer::parse("100000000000000000000").unwrap();
    let out = encode(&TypeSpec::Uint(256), &value.into(), false).unwrap();

    let mut expected = [0u8; 32];
    expected[16..].copy_from_slice(&100_000_000_000_000_000_000u128.to_be_bytes());
    assert_eq!(out, expected.to_vec());
    assert_eq!(
        hex::encode(&out),
        "0000000000000000000000000000000000000000000000056bc75e2d63100000"
    );
}

#[test]
fn address_uint256_pack_and_hashes() {
    let types = [TypeSpec::Address, TypeSpec::Uint(256)];
    let values = [Value::from(addr(0x11)), Value::from(1u64)];

    assert_eq!(
        pack_hex(&types, &values).unwrap(),
        "0x11111111111111111111111111111111111111110000000000000000000000000000000000000000000000000000000000000001"
    );
    assert_eq!(
        solidity_keccak256(&types, &values).unwrap().to_hex(),
        "0x5f8770c2413473708dbdc47ac14a9ff677d97b2cbe546cc465b146dfc075a643"
    );
    assert_eq!(
        solidity_sha256(&types, &values).unwrap().to_hex(),
        "0x9e0f6f4d0ac67ad12907552dfdf58350463ca49fba78e0daaf9eb66c028940b8"
    );
}

#[test]
fn mixed_types_pack_to_golden_bytes() {
    let types = [
        "uint8", "int8", "bool", "string", "bytes", "address[]", "int16[]",
    ];
    let values = [
        Value::from(255u64),
        Value::Int(Integer::from(-1i64)),
        Value::Bool(true),
        Value::from("hi"),
        Value::Bytes(vec![0xde, 0xad]),
        Value::Array(vec![addr(0x11).into()]),
        Value::Array(vec![Value::Int(Integer::from(-2i64))]),
    ];

    let packed = pack_str(&types, &values).unwrap();
    assert_eq!(
        hex::encode(&packed),
        "ffff016869dead0000000000000000000000001111111111111111111111111111111111111111fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
    );
    assert_eq!(
        keccak256(&packed).to_hex(),
        "0x5ebd7a0c588ee4aee704741192ec7138bec0f6e6eac27f2f76ab6e72400472a3"
    );
}

#[test]
fn json_coercion_packs_like_typed_values() {
    let types = TypeSpec::parse_all(&["address", "uint256"]).unwrap();
    let raw = json!(["0x1111111111111111111111111111111111111111", "1"]);
    let values: Vec<Value> = types
        .iter()
        .zip(raw.as_array().unwrap())
        .map(|(spec, json)| Value::from_json(spec, json).unwrap())
        .collect();

    assert_eq!(
        pack(&types, &values).unwrap(),
        pack(&types, &[addr(0x11).into(), 1u64.into()]).unwrap()
    );
}

#[test]
fn uint7_is_a_width_error() {
    assert!(matches!(
        TypeSpec::parse("uint7"),
        Err(EncodingError::InvalidWidth { width: 7, .. })
    ));
}

#[test]
fn short_bytes32_is_a_length_error() {
    let err = pack(&[TypeSpec::FixedBytes(32)], &[Value::FixedBytes(vec![0; 16])]).unwrap_err();
    assert!(matches!(
        err,
        EncodingError::LengthMismatch {
            expected: 32,
            actual: 16,
            ..
        }
    ));
}

#[test]
fn errors_render_readable_messages() {
    let err = pack_str(&["uint256[2]"], &[Value::Array(vec![1u64.into()])]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid array length for uint256[2]: expected 2 elements, got 1"
    );
    let err = pack_str(&["tuple"], &[true.into()]).unwrap_err();
    assert_eq!(err.to_string(), "invalid type 'tuple'");
}
