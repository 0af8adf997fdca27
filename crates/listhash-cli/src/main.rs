//! Listhash CLI - Command-line interface for listing hashes and packed encoding.

use clap::{Parser, Subcommand};
use listhash_packed::HashAlg;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{hash, pack, verify};

#[derive(Parser)]
#[command(name = "listhash")]
#[command(about = "Listing hash computation and Solidity packed-encoding CLI")]
struct Cli {
    /// Log each fold step to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the hash of a listing
    Hash {
        /// Input listing JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show the digest after every fold step
        #[arg(long)]
        steps: bool,
    },
    /// Check a listing against a claimed hash
    Verify {
        /// Input listing JSON file (or stdin if not provided)
        input: Option<String>,
        /// Claimed listing hash (0x-prefixed hex)
        #[arg(long)]
        expected: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pack typed values as abi.encodePacked does
    Pack {
        /// Comma-separated type specifiers, e.g. `address,uint256`
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<String>,
        /// JSON array of values, one per type
        #[arg(long)]
        values: String,
        /// Print the hash of the packed bytes instead (keccak256 or sha256)
        #[arg(long)]
        hash: Option<HashAlg>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Hash { input, json, steps } => hash::run(input, json, steps),
        Commands::Verify {
            input,
            expected,
            json,
        } => verify::run(input, expected, json),
        Commands::Pack {
            types,
            values,
            hash,
        } => pack::run(types, values, hash),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
