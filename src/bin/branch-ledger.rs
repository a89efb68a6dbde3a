use std::fs::File;

use anyhow::{Context, Result};
use branch_ledger::bin_utils::Service;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the customer listing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let bank_name = std::env::args().nth(2).unwrap_or_else(|| "Bank".to_string());
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        bank_name,
        error_printer: Box::new(|line, err| {
            // overdrafts and duplicates are business outcomes, not input errors
            if !err.is_rejection() {
                eprintln!("Error at line {line}: {err}")
            }
        }),
    };
    service.run()
}
