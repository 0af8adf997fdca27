//! Sequential hash chain over a listing.
//!
//! The chain is a left fold: every step packs its own fields followed by the
//! running digest as `bytes32`, and the keccak256 of that becomes the new
//! running digest. The result binds both content and order, so swapping two
//! entries of any sequence changes it.

use listhash_packed::{keccak256, pack, Address, Digest, EncodingError, Integer, TypeSpec, Value};
use tracing::trace;

use crate::errors::ListingError;
use crate::listing::{FieldPath, Listing, ListingAssets};

/// `(address token, uint256 idOrAmount, bytes32 sig)`
static TOKEN_AMOUNT_STEP: [TypeSpec; 3] = [
    TypeSpec::Address,
    TypeSpec::Uint(256),
    TypeSpec::FixedBytes(32),
];

/// `(address token, bytes32 root, bytes32 sig)`
static TOKEN_ROOT_STEP: [TypeSpec; 3] = [
    TypeSpec::Address,
    TypeSpec::FixedBytes(32),
    TypeSpec::FixedBytes(32),
];

/// `(uint256 duration, bytes32 sig)`
static DURATION_STEP: [TypeSpec; 2] = [TypeSpec::Uint(256), TypeSpec::FixedBytes(32)];

/// `(address tradeIntendedFor, uint256 timePeriod, address owner, uint256 nonce, bytes32 sig)`
static FINAL_STEP: [TypeSpec; 5] = [
    TypeSpec::Address,
    TypeSpec::Uint(256),
    TypeSpec::Address,
    TypeSpec::Uint(256),
    TypeSpec::FixedBytes(32),
];

/// One step of the fold.
///
/// `types` ends with the `bytes32` slot that receives the running digest;
/// `values` holds everything before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldStep {
    /// Where in the listing the step's fields come from.
    pub label: String,
    /// Packed layout of the step, including the trailing digest slot.
    pub types: &'static [TypeSpec],
    /// Field values, without the running digest.
    pub values: Vec<Value>,
}

impl FoldStep {
    fn new(label: impl ToString, types: &'static [TypeSpec], values: Vec<Value>) -> Self {
        Self {
            label: label.to_string(),
            types,
            values,
        }
    }
}

/// Running keccak256 accumulator, seeded with [`Digest::ZERO`].
#[derive(Debug, Clone)]
pub struct HashChain {
    sig: Digest,
    steps: usize,
}

impl HashChain {
    /// Starts a chain at the zero digest.
    pub fn new() -> Self {
        Self {
            sig: Digest::ZERO,
            steps: 0,
        }
    }

    /// Packs the step followed by the running digest and rehashes.
    pub fn absorb(&mut self, step: FoldStep) -> Result<Digest, EncodingError> {
        let FoldStep {
            label,
            types,
            mut values,
        } = step;
        values.push(Value::from(self.sig));
        let digest = keccak256(&pack(types, &values)?);
        self.sig = digest;
        self.steps += 1;
        trace!(step = %label, digest = %digest, "absorbed fold step");
        Ok(digest)
    }

    /// Absorbs every step in order and returns the final digest.
    pub fn fold<I>(mut self, steps: I) -> Result<Digest, EncodingError>
    where
        I: IntoIterator<Item = FoldStep>,
    {
        for step in steps {
            self.absorb(step)?;
        }
        Ok(self.sig)
    }

    /// Current running digest.
    pub fn digest(&self) -> Digest {
        self.sig
    }

    /// Number of steps absorbed so far.
    pub fn len(&self) -> usize {
        self.steps
    }

    /// Whether no step has been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }
}

impl Default for HashChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates `listing` and lays out its fold steps in chain order:
///
/// 1. `listingAssets`: NFT leg, then fungible leg;
/// 2. each direct swap: `(token, root)` pairs, then its fungible leg;
/// 3. each reserve: `deposit`, `remaining`, then `duration`;
/// 4. royalty recipients;
/// 5. the closing `(tradeIntendedFor, timePeriod, owner, nonce)` step.
///
/// Empty sequences contribute no steps.
pub fn fold_steps(listing: &Listing) -> Result<Vec<FoldStep>, ListingError> {
    listing.validate()?;

    let root = FieldPath::root();
    let mut steps = Vec::new();

    push_assets(&mut steps, &root.push_field("listingAssets"), &listing.listing_assets);

    for (idx, swap) in listing.direct_swaps.iter().enumerate() {
        let path = root.push_field("directSwaps").push_index(idx);
        for (i, (token, root_hash)) in swap.tokens.iter().zip(&swap.roots).enumerate() {
            steps.push(FoldStep::new(
                path.push_field("tokens").push_index(i),
                &TOKEN_ROOT_STEP,
                vec![Value::from(*token), Value::from(*root_hash)],
            ));
        }
        push_pairs(
            &mut steps,
            &path.push_field("paymentTokens"),
            &swap.payment_tokens,
            &swap.amounts,
        );
    }

    for (idx, reserve) in listing.reserves.iter().enumerate() {
        let path = root.push_field("reserves").push_index(idx);
        push_assets(&mut steps, &path.push_field("deposit"), &reserve.deposit);
        push_assets(&mut steps, &path.push_field("remaining"), &reserve.remaining);
        steps.push(FoldStep::new(
            path.push_field("duration"),
            &DURATION_STEP,
            vec![Value::from(reserve.duration)],
        ));
    }

    push_pairs(
        &mut steps,
        &root.push_field("royalty").push_field("to"),
        &listing.royalty.to,
        &listing.royalty.percentage,
    );

    steps.push(FoldStep::new(
        "final",
        &FINAL_STEP,
        vec![
            Value::from(listing.trade_intended_for),
            Value::from(listing.time_period),
            Value::from(listing.owner),
            Value::from(listing.nonce),
        ],
    ));

    Ok(steps)
}

fn push_assets(steps: &mut Vec<FoldStep>, path: &FieldPath, assets: &ListingAssets) {
    push_pairs(steps, &path.push_field("tokens"), &assets.tokens, &assets.token_ids);
    push_pairs(
        steps,
        &path.push_field("paymentTokens"),
        &assets.payment_tokens,
        &assets.amounts,
    );
}

/// NFT legs, fungible legs and royalties share the `(address, uint256)` layout.
fn push_pairs(
    steps: &mut Vec<FoldStep>,
    path: &FieldPath,
    tokens: &[Address],
    amounts: &[Integer],
) {
    for (i, (token, amount)) in tokens.iter().zip(amounts).enumerate() {
        steps.push(FoldStep::new(
            path.push_index(i),
            &TOKEN_AMOUNT_STEP,
            vec![Value::from(*token), Value::from(*amount)],
        ));
    }
}
