//! Output formatting utilities.

use listhash_packed::Digest;

/// Formats a fold step as a simple table row.
pub fn format_step_row(step: &str, digest: &Digest) -> String {
    format!("{:<40} {}", truncate(step, 40), digest)
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<40} {}", "STEP", "DIGEST");
    println!("{}", "-".repeat(107));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
