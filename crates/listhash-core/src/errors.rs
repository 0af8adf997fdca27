use thiserror::Error;

/// Errors raised while validating or hashing a listing.
#[derive(Error, Debug)]
pub enum ListingError {
    /// Two parallel sequences differ in length.
    #[error("array length mismatch at {field}: {left} vs {right}")]
    ArrayLengthMismatch {
        /// Path of the first sequence, e.g. `directSwaps[0].tokens`.
        field: String,
        /// Length of the first sequence.
        left: usize,
        /// Length of its parallel sequence.
        right: usize,
    },
    /// Packing a fold step failed.
    #[error("encoding failed: {0}")]
    Encoding(#[from] listhash_packed::EncodingError),
    /// Listing JSON could not be parsed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
