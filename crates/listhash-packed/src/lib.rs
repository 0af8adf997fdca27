//! Solidity-compatible tight packing and hashing primitives.
//!
//! The encoding mirrors `abi.encodePacked`: values are concatenated at their
//! minimal width with no offsets or length prefixes, and array elements are
//! widened to 32-byte slots. Hashing the packed bytes with keccak256 yields the
//! same digest a contract computes with `keccak256(abi.encodePacked(...))`.
//!
#![deny(missing_docs)]

/// Digest (32-byte word) primitive.
pub mod digest;
/// Single-value packed encoder.
pub mod encoder;
/// Hash primitives and packed-hash helpers.
pub mod hasher;
/// Packing of typed value lists.
pub mod packer;
/// Type specifier grammar.
pub mod types;
/// Error types.
pub mod validation;
/// Value model (addresses, integers, tagged values).
pub mod values;

pub use digest::{Digest, DIGEST_LEN};
pub use encoder::encode;
pub use hasher::{keccak256, sha256, solidity_keccak256, solidity_sha256, HashAlg};
pub use packer::{pack, pack_hex, pack_str};
pub use types::TypeSpec;
pub use validation::{EncodingError, ValidationError};
pub use values::{Address, Integer, Value, ADDRESS_LEN};
