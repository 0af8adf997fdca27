use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::types::TypeSpec;
use crate::validation::{EncodingError, ValidationError};

/// Address width in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Decodes `0x`-prefixed (prefix optional) hex. `"0x"` alone is the empty sequence.
pub fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, ValidationError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    hex::decode(digits).map_err(|_| ValidationError::PatternMismatch {
        field,
        value: value.to_string(),
    })
}

/// 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wraps raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Parses 40 hex digits, optionally `0x`-prefixed. Mixed-case checksums
    /// are accepted but not enforced.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let bytes = decode_hex("address", value)?;
        let array: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| ValidationError::PatternMismatch {
            field: "address",
            value: value.to_string(),
        })?;
        Ok(Address(array))
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}

/// Signed integer with up to 256 bits of magnitude.
///
/// Zero is never negative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    /// Zero.
    pub fn zero() -> Self {
        Integer::default()
    }

    /// Builds an integer from sign and magnitude.
    pub fn from_parts(negative: bool, magnitude: U256) -> Self {
        Integer {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// Parses decimal (`-` allowed) or `0x` hex.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let mismatch = || ValidationError::PatternMismatch {
            field: "integer",
            value: value.to_string(),
        };
        let overflow = || ValidationError::OutOfBounds {
            field: "integer",
            value: value.to_string(),
        };

        let (negative, body) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };

        let magnitude = if let Some(digits) = body
            .strip_prefix("0x")
            .or_else(|| body.strip_prefix("0X"))
        {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(mismatch());
            }
            U256::from_str_radix(digits, 16).map_err(|_| overflow())?
        } else {
            if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
                return Err(mismatch());
            }
            U256::from_dec_str(body).map_err(|_| overflow())?
        };

        Ok(Integer::from_parts(negative, magnitude))
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Absolute value.
    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// Whether the value fits `uintN`.
    pub fn fits_unsigned(&self, bits: usize) -> bool {
        !self.negative && self.magnitude.bits() <= bits
    }

    /// Whether the value fits `intN`.
    pub fn fits_signed(&self, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        let bound = U256::one() << (bits - 1);
        if self.negative {
            self.magnitude <= bound
        } else {
            self.magnitude < bound
        }
    }

    /// Big-endian 256-bit two's-complement word.
    pub fn to_be_word(&self) -> [u8; 32] {
        let raw = if self.negative {
            (!self.magnitude).overflowing_add(U256::one()).0
        } else {
            self.magnitude
        };
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = raw.byte(31 - i);
        }
        out
    }

    /// Big-endian two's-complement representation in `bits / 8` bytes.
    ///
    /// Higher-order bytes are dropped; check [`Integer::fits_unsigned`] or
    /// [`Integer::fits_signed`] first.
    pub fn to_twos(&self, bits: usize) -> Vec<u8> {
        let width = (bits / 8).clamp(1, 32);
        self.to_be_word()[32 - width..].to_vec()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl FromStr for Integer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Integer::parse(s)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer::from_parts(false, U256::from(value))
    }
}

impl From<u128> for Integer {
    fn from(value: u128) -> Self {
        Integer::from_parts(false, U256::from(value))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::from_parts(value < 0, U256::from(value.unsigned_abs()))
    }
}

impl From<U256> for Integer {
    fn from(value: U256) -> Self {
        Integer::from_parts(false, value)
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct IntegerVisitor;

impl Visitor<'_> for IntegerVisitor {
    type Value = Integer;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal/hex integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Integer, E> {
        Ok(Integer::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Integer, E> {
        Ok(Integer::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Integer, E> {
        Ok(Integer::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Integer, E> {
        Integer::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IntegerVisitor)
    }
}

/// A value tagged with the shape it will be encoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Account address.
    Address(Address),
    /// UTF-8 text.
    String(String),
    /// Dynamic byte sequence.
    Bytes(Vec<u8>),
    /// Boolean.
    Bool(bool),
    /// Signed or unsigned integer.
    Int(Integer),
    /// Fixed-width byte sequence.
    FixedBytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Address(_) => "address",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::FixedBytes(_) => "fixed bytes",
            Value::Array(_) => "array",
        }
    }

    /// Coerces loosely typed JSON into a value of the given type.
    ///
    /// Addresses and byte strings are hex strings; integers are JSON numbers
    /// or decimal/hex strings.
    pub fn from_json(spec: &TypeSpec, json: &serde_json::Value) -> Result<Self, EncodingError> {
        use serde_json::Value as Json;

        let mismatch = || EncodingError::ValueMismatch {
            ty: spec.to_string(),
            found: json_kind(json),
        };

        match (spec, json) {
            (TypeSpec::Address, Json::String(s)) => Ok(Value::Address(Address::parse(s)?)),
            (TypeSpec::String, Json::String(s)) => Ok(Value::String(s.clone())),
            (TypeSpec::Bytes, Json::String(s)) => Ok(Value::Bytes(decode_hex("bytes", s)?)),
            (TypeSpec::FixedBytes(_), Json::String(s)) => {
                Ok(Value::FixedBytes(decode_hex("bytes", s)?))
            }
            (TypeSpec::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),
            (TypeSpec::Uint(_) | TypeSpec::Int(_), Json::String(s)) => {
                Ok(Value::Int(Integer::parse(s)?))
            }
            (TypeSpec::Uint(_) | TypeSpec::Int(_), Json::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    Ok(Value::Int(Integer::from(v)))
                } else if let Some(v) = n.as_i64() {
                    Ok(Value::Int(Integer::from(v)))
                } else {
                    Err(ValidationError::PatternMismatch {
                        field: "integer",
                        value: n.to_string(),
                    }
                    .into())
                }
            }
            (TypeSpec::Array(element, _), Json::Array(items)) => items
                .iter()
                .map(|item| Value::from_json(element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err(mismatch()),
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Address(value)
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Int(Integer::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Digest> for Value {
    fn from(value: Digest) -> Self {
        Value::FixedBytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn address_parses_mixed_case() {
        let addr = Address::parse("0xd13Da05B9288BA4961973110594bD0fE3428791F").unwrap();
        assert_eq!(addr.to_string(), "0xd13da05b9288ba4961973110594bd0fe3428791f");
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xzz13da05b9288ba4961973110594bd0fe3428791").is_err());
    }

    #[test]
    fn integer_parses_decimal_hex_and_negative() {
        assert_eq!(Integer::parse("100").unwrap(), Integer::from(100u64));
        assert_eq!(Integer::parse("0x64").unwrap(), Integer::from(100u64));
        assert_eq!(Integer::parse("-5").unwrap(), Integer::from(-5i64));
        assert_eq!(Integer::parse("-0").unwrap(), Integer::zero());
        assert!(!Integer::parse("-0").unwrap().is_negative());
        assert!(Integer::parse("").is_err());
        assert!(Integer::parse("12a").is_err());
        assert!(Integer::parse("1.5").is_err());
    }

    #[test]
    fn integer_rejects_more_than_256_bits() {
        let too_big = format!("0x1{}", "0".repeat(64));
        assert!(matches!(
            Integer::parse(&too_big),
            Err(ValidationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn signed_bounds() {
        assert!(Integer::from(127i64).fits_signed(8));
        assert!(!Integer::from(128i64).fits_signed(8));
        assert!(Integer::from(-128i64).fits_signed(8));
        assert!(!Integer::from(-129i64).fits_signed(8));
        assert!(Integer::from(255u64).fits_unsigned(8));
        assert!(!Integer::from(256u64).fits_unsigned(8));
        assert!(!Integer::from(-1i64).fits_unsigned(256));
    }

    #[test]
    fn twos_complement_bytes() {
        assert_eq!(Integer::from(-1i64).to_twos(8), vec![0xff]);
        assert_eq!(Integer::from(-2i64).to_twos(16), vec![0xff, 0xfe]);
        assert_eq!(Integer::from(258u64).to_twos(16), vec![0x01, 0x02]);
        assert_eq!(Integer::from(-1i64).to_be_word(), [0xff; 32]);
    }

    #[test]
    fn integer_serde_accepts_numbers_and_strings() {
        let a: Integer = serde_json::from_value(json!(42)).unwrap();
        let b: Integer = serde_json::from_value(json!("42")).unwrap();
        let c: Integer = serde_json::from_value(json!("100000000000000000000")).unwrap();
        assert_eq!(a, b);
        assert_eq!(c.to_string(), "100000000000000000000");
        assert_eq!(serde_json::to_value(c).unwrap(), json!("100000000000000000000"));
    }

    #[test]
    fn from_json_follows_type() {
        let spec = TypeSpec::parse("uint256[]").unwrap();
        let value = Value::from_json(&spec, &json!([1, "2", "0x03"])).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![1u64.into(), 2u64.into(), 3u64.into()])
        );

        let err = Value::from_json(&TypeSpec::Bool, &json!("true")).unwrap_err();
        assert!(matches!(err, EncodingError::ValueMismatch { found: "string", .. }));
    }
}
