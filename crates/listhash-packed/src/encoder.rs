//! Non-standard packed encoding of a single typed value.
//!
//! Outside arrays every type takes its minimal width: addresses are 20 bytes,
//! booleans one byte, `uintN`/`intN` exactly `N / 8` bytes. Array elements are
//! widened to 32-byte slots instead; dynamic `bytes` and `string` are never
//! padded and carry no length prefix.

use crate::types::{TypeSpec, MAX_INT_BITS, WORD_SIZE};
use crate::validation::EncodingError;
use crate::values::{Integer, Value};

/// Encodes one value as `abi.encodePacked` would.
///
/// `in_array` selects the 32-byte slot layout used for array elements.
/// Widths are validated before any byte is produced; on error nothing is
/// returned.
pub fn encode(spec: &TypeSpec, value: &Value, in_array: bool) -> Result<Vec<u8>, EncodingError> {
    spec.validate()?;
    let mut out = Vec::new();
    encode_into(spec, value, in_array, &mut out)?;
    Ok(out)
}

/// Appends the encoding of `value` to `out`. `spec` must already be validated.
pub(crate) fn encode_into(
    spec: &TypeSpec,
    value: &Value,
    in_array: bool,
    out: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    match (spec, value) {
        (TypeSpec::Address, Value::Address(address)) => {
            if in_array {
                pad_left(out, address.as_bytes());
            } else {
                out.extend_from_slice(address.as_bytes());
            }
        }
        (TypeSpec::String, Value::String(text)) => out.extend_from_slice(text.as_bytes()),
        (TypeSpec::Bytes, Value::Bytes(bytes) | Value::FixedBytes(bytes)) => {
            out.extend_from_slice(bytes)
        }
        (TypeSpec::Bool, Value::Bool(flag)) => {
            let byte = [u8::from(*flag)];
            if in_array {
                pad_left(out, &byte);
            } else {
                out.extend_from_slice(&byte);
            }
        }
        (TypeSpec::Uint(bits), Value::Int(n)) => {
            encode_integer(spec, n, *bits, n.fits_unsigned(*bits), in_array, out)?
        }
        (TypeSpec::Int(bits), Value::Int(n)) => {
            encode_integer(spec, n, *bits, n.fits_signed(*bits), in_array, out)?
        }
        (TypeSpec::FixedBytes(size), Value::Bytes(bytes) | Value::FixedBytes(bytes)) => {
            if bytes.len() != *size {
                return Err(EncodingError::LengthMismatch {
                    ty: spec.to_string(),
                    expected: *size,
                    actual: bytes.len(),
                });
            }
            out.extend_from_slice(bytes);
            if in_array {
                out.resize(out.len() + (WORD_SIZE - size), 0);
            }
        }
        (TypeSpec::Array(element, count), Value::Array(items)) => {
            if let Some(expected) = count {
                if *expected != items.len() {
                    return Err(EncodingError::ArrayLengthMismatch {
                        ty: spec.to_string(),
                        expected: *expected,
                        actual: items.len(),
                    });
                }
            }
            for item in items {
                encode_into(element, item, true, out)?;
            }
        }
        _ => {
            return Err(EncodingError::ValueMismatch {
                ty: spec.to_string(),
                found: value.kind(),
            })
        }
    }
    Ok(())
}

/// Range-checks against the declared width, then writes the slot width.
fn encode_integer(
    spec: &TypeSpec,
    n: &Integer,
    bits: usize,
    fits: bool,
    in_array: bool,
    out: &mut Vec<u8>,
) -> Result<(), EncodingError> {
    if !fits {
        return Err(EncodingError::ValueOutOfRange {
            ty: spec.to_string(),
            value: n.to_string(),
        });
    }
    let slot = if in_array { MAX_INT_BITS } else { bits };
    out.extend_from_slice(&n.to_twos(slot));
    Ok(())
}

fn pad_left(out: &mut Vec<u8>, bytes: &[u8]) {
    out.resize(out.len() + (WORD_SIZE - bytes.len()), 0);
    out.extend_from_slice(bytes);
}
