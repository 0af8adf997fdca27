//! Verify command implementation.

use listhash_core::{compute_listing_hash, verify_listing_hash};
use listhash_packed::Digest;
use serde_json::json;

use crate::commands::read_listing;

pub fn run(
    input: Option<String>,
    expected: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let claimed = Digest::parse(&expected).map_err(|e| format!("Invalid digest: {}", e))?;
    let listing = read_listing(input)?;

    let valid = verify_listing_hash(&listing, &claimed)
        .map_err(|e| format!("Listing hash failed: {}", e))?;
    // Only a mismatch needs the recomputed digest for reporting.
    let computed = if valid {
        claimed
    } else {
        compute_listing_hash(&listing).map_err(|e| format!("Listing hash failed: {}", e))?
    };

    if json_output {
        let result = json!({
            "valid": valid,
            "expected": claimed,
            "computed": computed,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if valid {
        println!("valid");
    } else {
        println!("invalid: computed {}", computed);
    }

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
