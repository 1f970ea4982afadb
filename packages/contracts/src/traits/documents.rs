//! DocumentSource trait for the cloud file store.

use async_trait::async_trait;

use crate::error::DocumentResult;

/// One listed document: store identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
}

impl DocumentRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Lists and downloads contract documents.
///
/// Listing is by parent-folder identifier, restricted to non-trashed
/// .docx items. `fetch_text` downloads one document and returns its plain
/// text (text extraction included — callers never see the binary).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_folder(&self, folder_id: &str) -> DocumentResult<Vec<DocumentRef>>;

    async fn fetch_text(&self, file_id: &str) -> DocumentResult<String>;
}
