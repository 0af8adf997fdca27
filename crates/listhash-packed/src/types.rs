use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::validation::EncodingError;

/// Largest integer width, in bits.
pub const MAX_INT_BITS: usize = 256;

/// Largest `bytesN` width, in bytes. Also the array slot size.
pub const WORD_SIZE: usize = 32;

/// Parsed Solidity type specifier.
///
/// The grammar is closed: anything not representable here is rejected at
/// parse time with [`EncodingError::InvalidType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    /// 20-byte account address.
    Address,
    /// UTF-8 text, never padded.
    String,
    /// Dynamic byte sequence, never padded.
    Bytes,
    /// Boolean, one byte outside arrays.
    Bool,
    /// Unsigned integer of the given width in bits.
    Uint(usize),
    /// Signed integer of the given width in bits.
    Int(usize),
    /// Fixed byte sequence of the given width in bytes.
    FixedBytes(usize),
    /// Array of an element type, with an optional fixed element count.
    Array(Box<TypeSpec>, Option<usize>),
}

impl TypeSpec {
    /// Builds a validated `uintN`.
    pub fn uint(bits: usize) -> Result<Self, EncodingError> {
        check_int_width("uint", bits)?;
        Ok(TypeSpec::Uint(bits))
    }

    /// Builds a validated `intN`.
    pub fn int(bits: usize) -> Result<Self, EncodingError> {
        check_int_width("int", bits)?;
        Ok(TypeSpec::Int(bits))
    }

    /// Builds a validated `bytesN`.
    pub fn fixed_bytes(size: usize) -> Result<Self, EncodingError> {
        check_bytes_width(size)?;
        Ok(TypeSpec::FixedBytes(size))
    }

    /// Builds a dynamic array `T[]`.
    pub fn array(element: TypeSpec) -> Self {
        TypeSpec::Array(Box::new(element), None)
    }

    /// Builds a fixed array `T[count]`.
    pub fn fixed_array(element: TypeSpec, count: usize) -> Self {
        TypeSpec::Array(Box::new(element), Some(count))
    }

    /// Parses a type specifier such as `uint256`, `bytes32` or `address[2]`.
    pub fn parse(spec: &str) -> Result<Self, EncodingError> {
        match spec {
            "address" => return Ok(TypeSpec::Address),
            "string" => return Ok(TypeSpec::String),
            "bytes" => return Ok(TypeSpec::Bytes),
            "bool" => return Ok(TypeSpec::Bool),
            _ => {}
        }

        let number = Regex::new(r"^(u?int)([0-9]*)$").expect("invalid regex");
        if let Some(caps) = number.captures(spec) {
            let bits = if caps[2].is_empty() {
                MAX_INT_BITS
            } else {
                let kind = if &caps[1] == "uint" { "uint" } else { "int" };
                parse_width(spec, kind, &caps[2])?
            };
            return if &caps[1] == "uint" {
                TypeSpec::uint(bits)
            } else {
                TypeSpec::int(bits)
            };
        }

        let bytes = Regex::new(r"^bytes([0-9]+)$").expect("invalid regex");
        if let Some(caps) = bytes.captures(spec) {
            let size = parse_width(spec, "bytes", &caps[1])?;
            return TypeSpec::fixed_bytes(size);
        }

        let array = Regex::new(r"^(.*)\[([0-9]*)\]$").expect("invalid regex");
        if let Some(caps) = array.captures(spec) {
            let element = TypeSpec::parse(&caps[1])?;
            // A count past usize can never be matched by a value, so it is
            // rejected here as a malformed specifier.
            let count = if caps[2].is_empty() {
                None
            } else {
                Some(
                    caps[2]
                        .parse::<usize>()
                        .map_err(|_| EncodingError::InvalidType(spec.to_string()))?,
                )
            };
            return Ok(TypeSpec::Array(Box::new(element), count));
        }

        Err(EncodingError::InvalidType(spec.to_string()))
    }

    /// Parses a list of type specifiers.
    pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Self>, EncodingError> {
        specs.iter().map(|s| TypeSpec::parse(s.as_ref())).collect()
    }

    /// Re-checks widths of a spec that may have been built without the
    /// checked constructors.
    pub fn validate(&self) -> Result<(), EncodingError> {
        match self {
            TypeSpec::Uint(bits) => check_int_width("uint", *bits),
            TypeSpec::Int(bits) => check_int_width("int", *bits),
            TypeSpec::FixedBytes(size) => check_bytes_width(*size),
            TypeSpec::Array(element, _) => element.validate(),
            TypeSpec::Address | TypeSpec::String | TypeSpec::Bytes | TypeSpec::Bool => Ok(()),
        }
    }
}

/// Widths are canonical decimal: `uint08` is malformed, not `uint8`.
///
/// `digits` is all ASCII digits, so a parse failure means overflow; that is
/// still a width error, reported as `usize::MAX`.
fn parse_width(spec: &str, kind: &'static str, digits: &str) -> Result<usize, EncodingError> {
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(EncodingError::InvalidType(spec.to_string()));
    }
    digits.parse::<usize>().map_err(|_| EncodingError::InvalidWidth {
        kind,
        width: usize::MAX,
    })
}

fn check_int_width(kind: &'static str, bits: usize) -> Result<(), EncodingError> {
    if bits == 0 || bits % 8 != 0 || bits > MAX_INT_BITS {
        return Err(EncodingError::InvalidWidth { kind, width: bits });
    }
    Ok(())
}

fn check_bytes_width(size: usize) -> Result<(), EncodingError> {
    if size == 0 || size > WORD_SIZE {
        return Err(EncodingError::InvalidWidth {
            kind: "bytes",
            width: size,
        });
    }
    Ok(())
}

impl FromStr for TypeSpec {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeSpec::parse(s)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Address => write!(f, "address"),
            TypeSpec::String => write!(f, "string"),
            TypeSpec::Bytes => write!(f, "bytes"),
            TypeSpec::Bool => write!(f, "bool"),
            TypeSpec::Uint(bits) => write!(f, "uint{}", bits),
            TypeSpec::Int(bits) => write!(f, "int{}", bits),
            TypeSpec::FixedBytes(size) => write!(f, "bytes{}", size),
            TypeSpec::Array(element, Some(count)) => write!(f, "{}[{}]", element, count),
            TypeSpec::Array(element, None) => write!(f, "{}[]", element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elementary_types() {
        assert_eq!(TypeSpec::parse("address").unwrap(), TypeSpec::Address);
        assert_eq!(TypeSpec::parse("uint256").unwrap(), TypeSpec::Uint(256));
        assert_eq!(TypeSpec::parse("int8").unwrap(), TypeSpec::Int(8));
        assert_eq!(TypeSpec::parse("bytes32").unwrap(), TypeSpec::FixedBytes(32));
        assert_eq!(TypeSpec::parse("bytes").unwrap(), TypeSpec::Bytes);
    }

    #[test]
    fn bare_int_defaults_to_256_bits() {
        assert_eq!(TypeSpec::parse("uint").unwrap(), TypeSpec::Uint(256));
        assert_eq!(TypeSpec::parse("int").unwrap(), TypeSpec::Int(256));
    }

    #[test]
    fn nested_arrays_split_on_last_bracket() {
        let spec = TypeSpec::parse("uint8[2][]").unwrap();
        assert_eq!(
            spec,
            TypeSpec::array(TypeSpec::fixed_array(TypeSpec::Uint(8), 2))
        );
        assert_eq!(spec.to_string(), "uint8[2][]");
    }

    #[test]
    fn rejects_bad_widths() {
        assert!(matches!(
            TypeSpec::parse("uint7"),
            Err(EncodingError::InvalidWidth { kind: "uint", width: 7 })
        ));
        assert!(matches!(
            TypeSpec::parse("int264"),
            Err(EncodingError::InvalidWidth { kind: "int", width: 264 })
        ));
        assert!(matches!(
            TypeSpec::parse("uint0"),
            Err(EncodingError::InvalidWidth { .. })
        ));
        assert!(matches!(
            TypeSpec::parse("bytes33"),
            Err(EncodingError::InvalidWidth { kind: "bytes", width: 33 })
        ));
        assert!(matches!(
            TypeSpec::parse("bytes0"),
            Err(EncodingError::InvalidWidth { kind: "bytes", width: 0 })
        ));
    }

    #[test]
    fn oversized_numeric_width_is_a_width_error() {
        assert!(matches!(
            TypeSpec::parse("uint99999999999999999999999"),
            Err(EncodingError::InvalidWidth { kind: "uint", width: usize::MAX })
        ));
        assert!(matches!(
            TypeSpec::parse("int99999999999999999999999"),
            Err(EncodingError::InvalidWidth { kind: "int", width: usize::MAX })
        ));
        assert!(matches!(
            TypeSpec::parse("bytes99999999999999999999999"),
            Err(EncodingError::InvalidWidth { kind: "bytes", width: usize::MAX })
        ));
    }

    #[test]
    fn oversized_array_count_is_malformed() {
        assert!(matches!(
            TypeSpec::parse("uint8[99999999999999999999999]"),
            Err(EncodingError::InvalidType(_))
        ));
    }

    #[test]
    fn rejects_malformed_specifiers() {
        for spec in ["uint08", "bytes01", "uintx", "tuple", "", "address[x]", "[]"] {
            assert!(
                matches!(TypeSpec::parse(spec), Err(EncodingError::InvalidType(_))),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn validate_catches_unchecked_variants() {
        assert!(TypeSpec::Uint(7).validate().is_err());
        assert!(TypeSpec::array(TypeSpec::FixedBytes(40)).validate().is_err());
        assert!(TypeSpec::array(TypeSpec::Uint(256)).validate().is_ok());
    }
}
