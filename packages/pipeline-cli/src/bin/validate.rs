//! Validate stage entry point.
//!
//! Read-only missing-field report over the extractor output file.

use anyhow::{Context, Result};
use contracts::{files, missing_field_report};
use pipeline_cli::config::Config;

fn main() -> Result<()> {
    pipeline_cli::init_tracing();
    let config = Config::from_env()?;

    let records = files::read_raw_records(&config.extracted_path).with_context(|| {
        format!(
            "cannot read '{}'; run the extract stage first",
            config.extracted_path.display()
        )
    })?;

    if records.is_empty() {
        println!("No records found in the file to validate.");
        return Ok(());
    }

    let report = missing_field_report(&records);

    println!("--- Extraction quality report ---");
    println!("Documents analyzed: {}", report.total_records);
    println!("Events identified:  {}", report.total_events);

    if report.is_clean() {
        println!("\nNo essential field is missing anywhere in the file.");
        return Ok(());
    }

    println!("\n--- Null or empty field counts ---");
    println!("(showing only fields missing at least once)\n");
    for (path, count) in report.missing_only() {
        println!(
            "- {path}: {count} of {} entries",
            report.population_for(path)
        );
    }

    Ok(())
}
