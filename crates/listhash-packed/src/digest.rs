use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Digest width in bytes.
pub const DIGEST_LEN: usize = 32;

/// Fixed 32-byte value produced by a hash primitive.
///
/// Also used for other 32-byte words that travel alongside digests, such as
/// the merkle roots of a direct swap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// All-zero digest; the seed of every listing hash chain.
    pub const ZERO: Digest = Digest([0u8; DIGEST_LEN]);

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    /// Builds a digest from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let array: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| ValidationError::OutOfBounds {
            field: "digest length",
            value: bytes.len().to_string(),
        })?;
        Ok(Digest(array))
    }

    /// Parses `0x`-prefixed (prefix optional) hex of exactly 64 digits.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let bytes = crate::values::decode_hex("digest", value)?;
        if bytes.len() != DIGEST_LEN {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: value.to_string(),
            });
        }
        Digest::from_slice(&bytes)
    }

    /// Borrowed byte-array form, as handed to a signer.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Owned byte-array form.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::parse(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_digest_is_32_bytes() {
        assert_eq!(Digest::ZERO.as_bytes().len(), 32);
        assert_eq!(Digest::ZERO.to_hex(), format!("0x{}", "00".repeat(32)));
    }

    #[test]
    fn parses_with_and_without_prefix() {
        let hex = "ab".repeat(32);
        let a = Digest::parse(&format!("0x{hex}")).unwrap();
        let b = Digest::parse(&hex).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), &[0xab; 32]);
    }

    #[test]
    fn rejects_wrong_length() {
        // 33 zero bytes: one pair too many
        let too_long = format!("0x{}", "00".repeat(33));
        assert!(Digest::parse(&too_long).is_err());
        assert!(Digest::parse("0x1234").is_err());
        assert!(Digest::from_slice(&[0u8; 31]).is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let digest = Digest::new([0x01; 32]);
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(32)));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
