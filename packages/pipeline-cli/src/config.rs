use anyhow::{Context, Result};
use contracts::SourceFolder;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Pipeline configuration loaded from environment variables.
///
/// Only the pieces a given stage actually uses are required: the accessor
/// methods fail with a clear message when their variable is unset, so the
/// read-only stages run without API credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub token_path: PathBuf,
    pub extracted_path: PathBuf,
    pub sanitized_path: PathBuf,
    pub review_path: PathBuf,
    /// Dot-path checked by the review stage.
    pub review_field: String,
    openai_api_key: Option<String>,
    paid_folder_id: Option<String>,
    free_folder_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:events.db?mode=rwc".to_string()),
            token_path: env::var("DRIVE_TOKEN_PATH")
                .unwrap_or_else(|_| "token.json".to_string())
                .into(),
            extracted_path: env::var("EXTRACTED_FILE")
                .unwrap_or_else(|_| "extracted_records.json".to_string())
                .into(),
            sanitized_path: env::var("SANITIZED_FILE")
                .unwrap_or_else(|_| "sanitized_records.json".to_string())
                .into(),
            review_path: env::var("REVIEW_FILE")
                .unwrap_or_else(|_| "missing_field_review.txt".to_string())
                .into(),
            review_field: env::var("REVIEW_FIELD")
                .unwrap_or_else(|_| "cliente.nome_responsavel".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            paid_folder_id: env::var("DRIVE_FOLDER_PAID").ok(),
            free_folder_id: env::var("DRIVE_FOLDER_FREE").ok(),
        })
    }

    pub fn openai_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY must be set")
    }

    /// The folders the extract stage scans, in fixed order.
    pub fn source_folders(&self) -> Result<Vec<SourceFolder>> {
        let mut folders = Vec::new();
        if let Some(id) = &self.paid_folder_id {
            folders.push(SourceFolder::new("Paid terms", id));
        }
        if let Some(id) = &self.free_folder_id {
            folders.push(SourceFolder::new("Free terms", id));
        }
        if folders.is_empty() {
            anyhow::bail!("DRIVE_FOLDER_PAID and/or DRIVE_FOLDER_FREE must be set");
        }
        Ok(folders)
    }
}
