//! Sanitize stage entry point.
//!
//! Reads the extractor output, enriches organization clients through the
//! rate-limited registry, applies the backfill rules and writes the
//! import-ready file.

use anyhow::{Context, Result};
use contracts::{files, sanitize_records, BrasilApi, RateLimitedRegistry};
use pipeline_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    pipeline_cli::init_tracing();
    let config = Config::from_env()?;

    let records = files::read_records(&config.extracted_path).with_context(|| {
        format!(
            "cannot read '{}'; run the extract stage first",
            config.extracted_path.display()
        )
    })?;

    println!("Sanitizing and enriching {} records...", records.len());

    let registry = RateLimitedRegistry::with_default_cooldown(BrasilApi::new());
    let report = sanitize_records(records, &registry).await;

    files::write_records(&config.sanitized_path, &report.records)
        .with_context(|| format!("failed to write {}", config.sanitized_path.display()))?;

    println!("\nSanitize finished.");
    println!("Records kept:     {}", report.records.len());
    println!("Records dropped:  {}", report.dropped);
    println!("Records enriched: {}", report.enriched);
    println!(
        "Output written to '{}'. Review it before running the import stage.",
        config.sanitized_path.display()
    );

    Ok(())
}
