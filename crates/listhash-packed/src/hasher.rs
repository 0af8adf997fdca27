use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest as Sha3Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::packer::pack;
use crate::types::TypeSpec;
use crate::validation::{EncodingError, ValidationError};
use crate::values::Value;

/// Supported hash primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlg {
    /// Keccak-256 (original padding, not NIST SHA3-256). Used by listing hashes.
    #[default]
    Keccak256,
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl HashAlg {
    /// Hashes `bytes` with this primitive.
    pub fn digest(self, bytes: &[u8]) -> Digest {
        match self {
            HashAlg::Keccak256 => keccak256(bytes),
            HashAlg::Sha256 => sha256(bytes),
        }
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlg::Keccak256 => f.write_str("keccak256"),
            HashAlg::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for HashAlg {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keccak256" | "keccak-256" => Ok(HashAlg::Keccak256),
            "sha256" | "sha-256" => Ok(HashAlg::Sha256),
            other => Err(ValidationError::PatternMismatch {
                field: "hash algorithm",
                value: other.to_string(),
            }),
        }
    }
}

/// Keccak-256 of `bytes`.
pub fn keccak256(bytes: &[u8]) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    Digest::new(hasher.finalize().into())
}

/// SHA-256 of `bytes`.
pub fn sha256(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Digest::new(hasher.finalize().into())
}

/// `keccak256(abi.encodePacked(values...))`.
pub fn solidity_keccak256(types: &[TypeSpec], values: &[Value]) -> Result<Digest, EncodingError> {
    Ok(keccak256(&pack(types, values)?))
}

/// `sha256(abi.encodePacked(values...))`.
pub fn solidity_sha256(types: &[TypeSpec], values: &[Value]) -> Result<Digest, EncodingError> {
    Ok(sha256(&pack(types, values)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            keccak256(b"").to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn sha256_of_abc() {
        assert_eq!(
            sha256(b"abc").to_hex(),
            "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn alg_parses_both_spellings() {
        assert_eq!("keccak256".parse::<HashAlg>().unwrap(), HashAlg::Keccak256);
        assert_eq!("sha-256".parse::<HashAlg>().unwrap(), HashAlg::Sha256);
        assert!("md5".parse::<HashAlg>().is_err());
        assert_eq!(HashAlg::Sha256.digest(b"abc"), sha256(b"abc"));
    }

    #[test]
    fn alg_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&HashAlg::Sha256).unwrap(), "\"sha-256\"");
        assert_eq!(serde_json::to_string(&HashAlg::Keccak256).unwrap(), "\"keccak256\"");
    }
}
