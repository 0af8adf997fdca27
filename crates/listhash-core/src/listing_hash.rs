use listhash_packed::Digest;
use tracing::debug;

use crate::chain::{fold_steps, HashChain};
use crate::errors::ListingError;
use crate::listing::Listing;

/// Computes the listing commitment an on-chain verifier re-derives.
///
/// The listing is validated first; every parallel-sequence mismatch fails
/// with [`ListingError::ArrayLengthMismatch`] before any hashing happens.
///
/// # Example
///
/// ```rust
/// use listhash_core::{compute_listing_hash, Listing};
///
/// let listing = Listing::from_json(r#"{
///     "listingAssets": {
///         "tokens": ["0x1111111111111111111111111111111111111111"],
///         "tokenIds": ["1"],
///         "paymentTokens": [],
///         "amounts": []
///     },
///     "directSwaps": [],
///     "reserves": [],
///     "royalty": { "to": [], "percentage": [] },
///     "tradeIntendedFor": "0x0000000000000000000000000000000000000000",
///     "timePeriod": 86400,
///     "owner": "0x4444444444444444444444444444444444444444",
///     "nonce": 0
/// }"#)?;
///
/// let digest = compute_listing_hash(&listing)?;
/// assert_eq!(digest.to_hex().len(), 66);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`ListingError`] if the listing is malformed or a step fails to pack.
pub fn compute_listing_hash(listing: &Listing) -> Result<Digest, ListingError> {
    let steps = fold_steps(listing)?;
    let count = steps.len();
    let digest = HashChain::new().fold(steps)?;
    debug!(steps = count, digest = %digest, "computed listing hash");
    Ok(digest)
}

/// Digest after every fold step, labelled by the listing field it came from.
///
/// The last entry is the listing hash.
pub fn trace_listing_hash(listing: &Listing) -> Result<Vec<(String, Digest)>, ListingError> {
    let mut chain = HashChain::new();
    let mut trace = Vec::new();
    for step in fold_steps(listing)? {
        let label = step.label.clone();
        let digest = chain.absorb(step)?;
        trace.push((label, digest));
    }
    Ok(trace)
}

/// Verifies that a claimed listing hash matches the computed one.
///
/// Returns `true` if the claimed digest matches, `false` otherwise.
pub fn verify_listing_hash(listing: &Listing, claimed: &Digest) -> Result<bool, ListingError> {
    let computed = compute_listing_hash(listing)?;
    Ok(&computed == claimed)
}
