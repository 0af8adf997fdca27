//! Hash command implementation.

use listhash_core::{compute_listing_hash, trace_listing_hash};
use serde_json::json;

use crate::commands::read_listing;
use crate::output;

pub fn run(
    input: Option<String>,
    json_output: bool,
    steps: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = read_listing(input)?;

    if steps {
        let trace = trace_listing_hash(&listing)
            .map_err(|e| format!("Listing hash failed: {}", e))?;
        if json_output {
            let rows: Vec<_> = trace
                .iter()
                .map(|(step, digest)| json!({ "step": step, "digest": digest }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            output::print_table_header();
            for (step, digest) in &trace {
                println!("{}", output::format_step_row(step, digest));
            }
        }
        return Ok(());
    }

    let digest =
        compute_listing_hash(&listing).map_err(|e| format!("Listing hash failed: {}", e))?;
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "listing_hash": digest }))?
        );
    } else {
        println!("{}", digest);
    }
    Ok(())
}
