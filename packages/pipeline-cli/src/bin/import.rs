//! Import stage entry point.
//!
//! Destructive: loads the sanitized records into the database after an
//! interactive confirmation. A connection failure aborts the whole run;
//! individual insert failures are reported and skipped.

use anyhow::{Context, Result};
use colored::Colorize;
use contracts::{files, import_records, ClassificationPolicy, SqliteStore};
use dialoguer::Confirm;
use pipeline_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    pipeline_cli::init_tracing();
    let config = Config::from_env()?;

    let records = files::read_records(&config.sanitized_path).with_context(|| {
        format!(
            "cannot read '{}'; run the sanitize stage first",
            config.sanitized_path.display()
        )
    })?;

    println!(
        "This will modify the database at '{}' ({} records to import).",
        config.database_url,
        records.len()
    );
    let confirmed = Confirm::new()
        .with_prompt("Have you backed it up? Continue?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Import cancelled.");
        return Ok(());
    }

    let store = SqliteStore::new(&config.database_url)
        .await
        .context("fatal: could not connect to the database")?;

    let policy = ClassificationPolicy::default();
    let summary = import_records(&records, &store, &policy).await;

    println!("\n{}", "--- Final import report ---".bold());
    println!("Records processed:       {}", summary.processed);
    println!(
        "New clients created:     {}",
        summary.clients_created.to_string().green()
    );
    println!("Existing clients reused: {}", summary.clients_reused);
    println!(
        "Events imported:         {}",
        summary.events_inserted.to_string().green()
    );

    if !summary.skipped.is_empty() {
        println!(
            "\n{}",
            format!("--- Skipped records ({}) ---", summary.skipped.len()).yellow()
        );
        for skip in &summary.skipped {
            println!("- {} | {}", skip.source_file, skip.reason);
        }
    }

    println!("\nImport finished.");

    Ok(())
}
