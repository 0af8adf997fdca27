use listhash_core::{trace_listing_hash, Listing};
use serde_json::json;

fn main() {
    let listing = json!({
        "listingAssets": {
            "tokens": ["0x1111111111111111111111111111111111111111"],
            "tokenIds": ["1"],
            "paymentTokens": ["0x2222222222222222222222222222222222222222"],
            "amounts": ["100000000000000000000"]
        },
        "directSwaps": [],
        "reserves": [],
        "royalty": { "to": [], "percentage": [] },
        "tradeIntendedFor": "0x0000000000000000000000000000000000000000",
        "timePeriod": "86400",
        "owner": "0x4444444444444444444444444444444444444444",
        "nonce": "0"
    });

    let result = Listing::from_json(&listing.to_string()).and_then(|l| trace_listing_hash(&l));
    match result {
        Ok(trace) => {
            for (label, digest) in trace {
                println!("{:<32} {}", label, digest);
            }
        }
        Err(err) => {
            eprintln!("listing hash failed: {}", err);
            std::process::exit(1);
        }
    }
}
