//! Subcommand implementations.

pub mod hash;
pub mod pack;
pub mod verify;

use listhash_core::Listing;
use std::io::{self, Read};
use tracing::debug;

/// Reads a listing from a JSON file, or from stdin when no path is given.
pub fn read_listing(input: Option<String>) -> Result<Listing, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = input {
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
        debug!(source = %path, bytes = contents.len(), "read listing");
        contents
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        debug!(source = "stdin", bytes = buffer.len(), "read listing");
        buffer
    };

    let listing = Listing::from_json(&json_str).map_err(|e| format!("Invalid listing: {}", e))?;
    Ok(listing)
}
