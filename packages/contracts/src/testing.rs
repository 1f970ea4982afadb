//! Testing utilities including mock collaborators.
//!
//! These let stage and application tests run without real model,
//! registry or document-store calls.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{
    DocumentError, DocumentResult, ExtractError, ExtractResult, RegistryError, RegistryResult,
};
use crate::traits::{CompanyInfo, DocumentRef, DocumentSource, Extractor, Registry};
use crate::types::ContractRecord;

/// A mock extractor returning scripted records per file name.
#[derive(Default)]
pub struct MockExtractor {
    records: RwLock<HashMap<String, ContractRecord>>,
    failures: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the record returned for a file name.
    pub fn with_record(self, file_name: impl Into<String>, record: ContractRecord) -> Self {
        self.records.write().unwrap().insert(file_name.into(), record);
        self
    }

    /// Make extraction fail (as after exhausted retries) for a file name.
    pub fn with_failure(self, file_name: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(file_name.into());
        self
    }

    /// File names extracted so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, _text: &str, file_name: &str) -> ExtractResult<ContractRecord> {
        self.calls.write().unwrap().push(file_name.to_string());

        if self.failures.read().unwrap().contains(file_name) {
            return Err(ExtractError::RetriesExhausted {
                attempts: 3,
                last_error: "scripted failure".to_string(),
            });
        }

        self.records
            .read()
            .unwrap()
            .get(file_name)
            .cloned()
            .ok_or_else(|| {
                ExtractError::InvalidResponse(format!("no scripted record for {file_name}"))
            })
    }
}

/// A mock registry with scripted company data per tax id.
#[derive(Default)]
pub struct MockRegistry {
    companies: RwLock<HashMap<String, CompanyInfo>>,
    failures: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the company returned for a tax id.
    pub fn with_company(self, tax_id: impl Into<String>, info: CompanyInfo) -> Self {
        self.companies.write().unwrap().insert(tax_id.into(), info);
        self
    }

    /// Make the lookup fail for a tax id.
    pub fn with_failure(self, tax_id: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(tax_id.into());
        self
    }

    /// Tax ids looked up so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn lookup(&self, tax_id: &str) -> RegistryResult<Option<CompanyInfo>> {
        self.calls.write().unwrap().push(tax_id.to_string());

        if self.failures.read().unwrap().contains(tax_id) {
            return Err(RegistryError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        Ok(self.companies.read().unwrap().get(tax_id).cloned())
    }
}

/// A mock document source with scripted folders and document texts.
#[derive(Default)]
pub struct MockDocumentSource {
    folders: RwLock<HashMap<String, Vec<DocumentRef>>>,
    texts: RwLock<HashMap<String, String>>,
    folder_failures: RwLock<HashSet<String>>,
    download_failures: RwLock<HashSet<String>>,
}

impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to a folder, with its text.
    pub fn with_document(
        self,
        folder_id: impl Into<String>,
        file_id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let file_id = file_id.into();
        self.folders
            .write()
            .unwrap()
            .entry(folder_id.into())
            .or_default()
            .push(DocumentRef::new(file_id.clone(), name));
        self.texts.write().unwrap().insert(file_id, text.into());
        self
    }

    /// Add a downloadable text without listing it in any folder.
    pub fn with_text(self, file_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.write().unwrap().insert(file_id.into(), text.into());
        self
    }

    /// Make listing a folder fail.
    pub fn with_folder_failure(self, folder_id: impl Into<String>) -> Self {
        self.folder_failures.write().unwrap().insert(folder_id.into());
        self
    }

    /// Make downloading a file fail.
    pub fn with_download_failure(self, file_id: impl Into<String>) -> Self {
        self.download_failures
            .write()
            .unwrap()
            .insert(file_id.into());
        self
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn list_folder(&self, folder_id: &str) -> DocumentResult<Vec<DocumentRef>> {
        if self.folder_failures.read().unwrap().contains(folder_id) {
            return Err(DocumentError::Api {
                status: 500,
                message: "scripted listing failure".to_string(),
            });
        }

        Ok(self
            .folders
            .read()
            .unwrap()
            .get(folder_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_text(&self, file_id: &str) -> DocumentResult<String> {
        if self.download_failures.read().unwrap().contains(file_id) {
            return Err(DocumentError::Api {
                status: 500,
                message: "scripted download failure".to_string(),
            });
        }

        self.texts
            .read()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| DocumentError::Api {
                status: 404,
                message: format!("no scripted text for {file_id}"),
            })
    }
}
