use listhash_packed::{Address, Digest, Integer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ListingError;

/// NFT and fungible legs of a listing, as parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingAssets {
    /// NFT contract addresses.
    pub tokens: Vec<Address>,
    /// Token ids, one per entry of `tokens`.
    pub token_ids: Vec<Integer>,
    /// Fungible token addresses.
    pub payment_tokens: Vec<Address>,
    /// Amounts, one per entry of `payment_tokens`.
    pub amounts: Vec<Integer>,
}

/// Swap offer: NFT collections identified by merkle roots plus a fungible leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectSwap {
    /// NFT contract addresses.
    pub tokens: Vec<Address>,
    /// Merkle roots of acceptable token ids, one per entry of `tokens`.
    pub roots: Vec<Digest>,
    /// Fungible token addresses.
    pub payment_tokens: Vec<Address>,
    /// Amounts, one per entry of `payment_tokens`.
    pub amounts: Vec<Integer>,
}

/// Reservation terms: an upfront deposit, the remaining balance and a duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserve {
    /// Assets paid upfront.
    pub deposit: ListingAssets,
    /// Assets paid on settlement.
    pub remaining: ListingAssets,
    /// Reservation duration.
    pub duration: Integer,
}

/// Royalty recipients and their percentages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Royalty {
    /// Recipients.
    pub to: Vec<Address>,
    /// Percentages, one per recipient.
    pub percentage: Vec<Integer>,
}

impl Royalty {
    /// Royalty with no recipients; folds to nothing.
    pub fn empty() -> Self {
        Royalty::default()
    }
}

/// A marketplace listing, as signed by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Assets offered by the owner.
    pub listing_assets: ListingAssets,
    /// Accepted swap offers.
    #[serde(default)]
    pub direct_swaps: Vec<DirectSwap>,
    /// Accepted reservation terms.
    #[serde(default)]
    pub reserves: Vec<Reserve>,
    /// Royalty split.
    #[serde(default)]
    pub royalty: Royalty,
    /// Counterparty the trade is restricted to; zero address for anyone.
    pub trade_intended_for: Address,
    /// Validity period.
    pub time_period: Integer,
    /// Listing owner.
    pub owner: Address,
    /// Owner nonce.
    pub nonce: Integer,
}

impl Listing {
    /// Parses a listing from its JSON form (camelCase field names).
    pub fn from_json(json: &str) -> Result<Self, ListingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that every pair of parallel sequences has equal length.
    pub fn validate(&self) -> Result<(), ListingError> {
        let root = FieldPath::root();

        self.listing_assets.validate(&root.push_field("listingAssets"))?;

        for (idx, swap) in self.direct_swaps.iter().enumerate() {
            let path = root.push_field("directSwaps").push_index(idx);
            check_parallel(&path.push_field("tokens"), &swap.tokens, &swap.roots)?;
            check_parallel(
                &path.push_field("paymentTokens"),
                &swap.payment_tokens,
                &swap.amounts,
            )?;
        }

        for (idx, reserve) in self.reserves.iter().enumerate() {
            let path = root.push_field("reserves").push_index(idx);
            reserve.deposit.validate(&path.push_field("deposit"))?;
            reserve.remaining.validate(&path.push_field("remaining"))?;
        }

        check_parallel(
            &root.push_field("royalty").push_field("to"),
            &self.royalty.to,
            &self.royalty.percentage,
        )
    }
}

impl ListingAssets {
    fn validate(&self, path: &FieldPath) -> Result<(), ListingError> {
        check_parallel(&path.push_field("tokens"), &self.tokens, &self.token_ids)?;
        check_parallel(
            &path.push_field("paymentTokens"),
            &self.payment_tokens,
            &self.amounts,
        )
    }
}

fn check_parallel<A, B>(path: &FieldPath, left: &[A], right: &[B]) -> Result<(), ListingError> {
    if left.len() != right.len() {
        return Err(ListingError::ArrayLengthMismatch {
            field: path.to_string(),
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Dotted path into a listing, e.g. `reserves[1].deposit.tokens`.
#[derive(Debug, Clone)]
pub(crate) struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub(crate) fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub(crate) fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    pub(crate) fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "root");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.starts_with('[') {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
