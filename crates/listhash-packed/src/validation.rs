use thiserror::Error;

/// Validation errors for primitive values (addresses, integers, digests).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a numeric value exceeds its bounds.
    #[error("{field} ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Errors raised while encoding typed values into packed bytes.
///
/// Every error is terminal for the call that produced it; no partial output
/// is returned alongside.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Malformed or unsupported type specifier.
    #[error("invalid type '{0}'")]
    InvalidType(String),
    /// Integer or fixed-bytes width outside the allowed range.
    #[error("invalid {kind} width {width}")]
    InvalidWidth {
        /// Type family (`uint`, `int` or `bytes`).
        kind: &'static str,
        /// Offending width (bits for integers, bytes for `bytesN`).
        width: usize,
    },
    /// Fixed-bytes value whose length differs from the declared width.
    #[error("invalid value for {ty}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Declared type.
        ty: String,
        /// Declared width in bytes.
        expected: usize,
        /// Actual value length in bytes.
        actual: usize,
    },
    /// Fixed array count disagrees with the number of elements supplied.
    #[error("invalid array length for {ty}: expected {expected} elements, got {actual}")]
    ArrayLengthMismatch {
        /// Declared array type.
        ty: String,
        /// Declared element count.
        expected: usize,
        /// Actual element count.
        actual: usize,
    },
    /// Number of types and values passed to the packer differ.
    #[error("wrong number of values; expected {expected}, got {actual}")]
    ArgumentCountMismatch {
        /// Number of types.
        expected: usize,
        /// Number of values.
        actual: usize,
    },
    /// Integer value does not fit the declared width.
    #[error("value {value} out of range for {ty}")]
    ValueOutOfRange {
        /// Declared type.
        ty: String,
        /// Offending value.
        value: String,
    },
    /// Value of the wrong kind for its type.
    #[error("{ty} cannot encode a {found} value")]
    ValueMismatch {
        /// Declared type.
        ty: String,
        /// Kind of the value that was supplied.
        found: &'static str,
    },
    /// Primitive parsing failed while coercing loosely typed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
