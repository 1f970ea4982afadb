//! Google Drive implementation of the [`DocumentSource`] trait.
//!
//! Lists .docx files by parent folder and downloads them by id, handing
//! the payload to [`docx::extract_text`]. Uses a previously-issued OAuth
//! access token read from a token file; obtaining and refreshing tokens is
//! outside this pipeline.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::documents::docx;
use crate::error::{DocumentError, DocumentResult};
use crate::traits::{DocumentRef, DocumentSource};

const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const LIST_PAGE_SIZE: u32 = 1000;

/// Drive API client scoped to read-only document access.
#[derive(Debug)]
pub struct DriveClient {
    client: Client,
    access_token: SecretString,
    base_url: String,
}

impl DriveClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: SecretString::from(access_token.into()),
            base_url: DRIVE_BASE_URL.to_string(),
        }
    }

    /// Read the access token from a token file (JSON with a `token` key,
    /// as written by the authorization tooling).
    pub fn from_token_file(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DocumentError::Token(format!("cannot read {}: {e}", path.display()))
        })?;
        let token_file: TokenFile = serde_json::from_str(&raw).map_err(|e| {
            DocumentError::Token(format!("malformed token file {}: {e}", path.display()))
        })?;
        let token = token_file
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                DocumentError::Token(format!("no access token in {}", path.display()))
            })?;
        Ok(Self::new(token))
    }

    /// Set a custom base URL (tests point this at a local server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl DocumentSource for DriveClient {
    async fn list_folder(&self, folder_id: &str) -> DocumentResult<Vec<DocumentRef>> {
        let query = format!(
            "'{folder_id}' in parents and mimeType='{DOCX_MIME_TYPE}' and trashed=false"
        );
        let page_size = LIST_PAGE_SIZE.to_string();

        let res = self
            .client
            .get(format!("{}/files", self.base_url))
            .bearer_auth(self.access_token.expose_secret())
            .query(&[
                ("q", query.as_str()),
                ("pageSize", page_size.as_str()),
                ("fields", "files(id, name)"),
            ])
            .send()
            .await
            .map_err(|e| DocumentError::Http(Box::new(e)))?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(DocumentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: FileList = res
            .json()
            .await
            .map_err(|e| DocumentError::Http(Box::new(e)))?;

        Ok(body
            .files
            .into_iter()
            .map(|f| DocumentRef::new(f.id, f.name))
            .collect())
    }

    async fn fetch_text(&self, file_id: &str) -> DocumentResult<String> {
        let res = self
            .client
            .get(format!("{}/files/{}", self.base_url, file_id))
            .bearer_auth(self.access_token.expose_secret())
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| DocumentError::Http(Box::new(e)))?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(DocumentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload = res
            .bytes()
            .await
            .map_err(|e| DocumentError::Http(Box::new(e)))?;

        docx::extract_text(&payload)
    }
}

#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileItem>,
}

#[derive(Debug, Deserialize)]
struct FileItem {
    id: String,
    name: String,
}
