//! Listing data model and hash chain for marketplace listing commitments.
//!
//! This crate provides:
//! - Listing types (`Listing`, `ListingAssets`, `DirectSwap`, `Reserve`, `Royalty`)
//! - Validation of the parallel-sequence invariants
//! - The sequential keccak256 hash chain that folds a listing into one digest
//! - Verification of a claimed listing hash
//!
//! Core invariants:
//! - The chain starts from 32 zero bytes and folds fields in a fixed order
//! - Every step is `keccak256(abi.encodePacked(fields..., runningDigest))`
//! - Hashing is pure: no I/O, no shared state, identical input gives identical output
//!
#![deny(missing_docs)]

/// Sequential hash chain and fold-step layout.
pub mod chain;
/// Error types for listing operations.
pub mod errors;
/// Listing types.
pub mod listing;
/// Listing hash computation and verification.
pub mod listing_hash;

pub use chain::{fold_steps, FoldStep, HashChain};
pub use errors::ListingError;
pub use listing::{DirectSwap, Listing, ListingAssets, Reserve, Royalty};
pub use listing_hash::{compute_listing_hash, trace_listing_hash, verify_listing_hash};
