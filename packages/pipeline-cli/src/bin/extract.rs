//! Extract stage entry point.
//!
//! Lists the configured Drive folders, downloads each .docx, runs the
//! field extraction and writes the extractor output file.

use anyhow::{Context, Result};
use contracts::{extract_documents, files, DriveClient, OpenAiExtractor};
use pipeline_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    pipeline_cli::init_tracing();
    let config = Config::from_env()?;

    println!("Starting contract extraction...");

    let source = DriveClient::from_token_file(&config.token_path)
        .context("no usable Drive token; run the authorization tooling first")?;
    let extractor = OpenAiExtractor::new(config.openai_api_key()?);
    let folders = config.source_folders()?;

    let report = extract_documents(&source, &extractor, &folders).await?;

    files::write_records(&config.extracted_path, &report.records)
        .with_context(|| format!("failed to write {}", config.extracted_path.display()))?;

    println!("\nExtraction finished.");
    println!("Documents listed:    {}", report.documents_listed);
    println!("Records extracted:   {}", report.records.len());
    println!("Download failures:   {}", report.download_failures);
    println!("Extraction failures: {}", report.extraction_failures);
    println!(
        "Output written to '{}'.",
        config.extracted_path.display()
    );

    Ok(())
}
