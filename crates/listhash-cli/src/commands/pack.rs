//! Pack command implementation.

use listhash_packed::{pack, pack_hex, EncodingError, HashAlg, TypeSpec, Value};

pub fn run(
    types: Vec<String>,
    values: String,
    hash: Option<HashAlg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let specs = TypeSpec::parse_all(&types)?;

    let raw: serde_json::Value =
        serde_json::from_str(&values).map_err(|e| format!("Invalid JSON: {}", e))?;
    let items = raw.as_array().ok_or("values must be a JSON array")?;
    if items.len() != specs.len() {
        return Err(EncodingError::ArgumentCountMismatch {
            expected: specs.len(),
            actual: items.len(),
        }
        .into());
    }

    let values = specs
        .iter()
        .zip(items)
        .map(|(spec, item)| Value::from_json(spec, item))
        .collect::<Result<Vec<_>, _>>()?;

    match hash {
        Some(alg) => println!("{}", alg.digest(&pack(&specs, &values)?)),
        None => println!("{}", pack_hex(&specs, &values)?),
    }
    Ok(())
}
