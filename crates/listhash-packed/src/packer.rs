use crate::encoder::encode_into;
use crate::types::TypeSpec;
use crate::validation::EncodingError;
use crate::values::Value;

/// Concatenates the packed encodings of `values`, typed by `types`.
///
/// Top-level values are never in array context. Fails with
/// [`EncodingError::ArgumentCountMismatch`] when the slices differ in length.
///
/// # Example
///
/// ```rust
/// use listhash_packed::{pack, Address, TypeSpec, Value};
///
/// let token = Address::parse("0x1111111111111111111111111111111111111111")?;
/// let packed = pack(
///     &[TypeSpec::Address, TypeSpec::Uint(256)],
///     &[Value::from(token), Value::from(1u64)],
/// )?;
/// assert_eq!(packed.len(), 20 + 32);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pack(types: &[TypeSpec], values: &[Value]) -> Result<Vec<u8>, EncodingError> {
    if types.len() != values.len() {
        return Err(EncodingError::ArgumentCountMismatch {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let mut out = Vec::new();
    for (spec, value) in types.iter().zip(values) {
        spec.validate()?;
        encode_into(spec, value, false, &mut out)?;
    }
    Ok(out)
}

/// Like [`pack`], returning `0x`-prefixed lowercase hex.
pub fn pack_hex(types: &[TypeSpec], values: &[Value]) -> Result<String, EncodingError> {
    pack(types, values).map(|bytes| format!("0x{}", hex::encode(bytes)))
}

/// Parses string type specifiers, then packs.
pub fn pack_str(types: &[&str], values: &[Value]) -> Result<Vec<u8>, EncodingError> {
    let specs = TypeSpec::parse_all(types)?;
    pack(&specs, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Address;

    #[test]
    fn argument_count_must_match() {
        let err = pack(&[TypeSpec::Address, TypeSpec::Bool], &[true.into()]).unwrap_err();
        assert_eq!(
            err,
            EncodingError::ArgumentCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_pack_is_empty() {
        assert!(pack(&[], &[]).unwrap().is_empty());
        assert_eq!(pack_hex(&[], &[]).unwrap(), "0x");
    }

    #[test]
    fn concatenates_in_order() {
        let a = Address::new([0xaa; 20]);
        let out = pack(&[TypeSpec::Bool, TypeSpec::Address], &[true.into(), a.into()]).unwrap();
        assert_eq!(out.len(), 21);
        assert_eq!(out[0], 1);
        assert_eq!(&out[1..], &[0xaa; 20]);
    }

    #[test]
    fn string_specs_are_parsed() {
        let out = pack_str(&["uint8", "bytes2"], &[7u64.into(), Value::FixedBytes(vec![1, 2])])
            .unwrap();
        assert_eq!(out, vec![7, 1, 2]);
        assert!(matches!(
            pack_str(&["uint7"], &[1u64.into()]),
            Err(EncodingError::InvalidWidth { .. })
        ));
    }
}
