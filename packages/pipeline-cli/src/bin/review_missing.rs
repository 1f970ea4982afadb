//! Review stage entry point (debug mode).
//!
//! Re-downloads the source documents of records missing the configured
//! field and writes their raw text into one consolidated review file.

use anyhow::{Context, Result};
use contracts::{build_review_file, files, DriveClient};
use pipeline_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    pipeline_cli::init_tracing();
    let config = Config::from_env()?;

    println!("Reviewing records missing '{}'...", config.review_field);

    let records = files::read_raw_records(&config.extracted_path).with_context(|| {
        format!(
            "cannot read '{}'; run the extract stage first",
            config.extracted_path.display()
        )
    })?;

    let source = DriveClient::from_token_file(&config.token_path)
        .context("no usable Drive token; run the authorization tooling first")?;

    let outcome = build_review_file(&records, &config.review_field, &source).await;

    if outcome.matched == 0 {
        println!(
            "No record has '{}' missing. Nothing to review.",
            config.review_field
        );
        return Ok(());
    }

    std::fs::write(&config.review_path, &outcome.content)
        .with_context(|| format!("failed to write {}", config.review_path.display()))?;

    println!(
        "\n{} matching records, {} documents downloaded.",
        outcome.matched, outcome.downloaded
    );
    println!(
        "Full text written to '{}' — check whether the information really is absent.",
        config.review_path.display()
    );

    Ok(())
}
