//! Extract stage: folder listing → download → field extraction.
//!
//! Processes documents strictly one at a time. A document whose download
//! or extraction fails is logged and excluded from the output; it never
//! reaches the sanitize or import stages.

use std::time::Duration;

use crate::error::Result;
use crate::traits::{DocumentSource, Extractor};
use crate::types::ContractRecord;

/// Pause between documents, to stay polite with both APIs.
const DOCUMENT_PAUSE: Duration = Duration::from_secs(1);

/// One folder to scan for contract documents.
#[derive(Debug, Clone)]
pub struct SourceFolder {
    /// Human-readable label used in progress output.
    pub label: String,
    pub folder_id: String,
}

impl SourceFolder {
    pub fn new(label: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            folder_id: folder_id.into(),
        }
    }
}

/// Outcome of one extract run.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Successfully extracted candidate records, in listing order.
    pub records: Vec<ContractRecord>,
    /// Documents returned by folder listings.
    pub documents_listed: usize,
    /// Documents whose download or text extraction failed.
    pub download_failures: usize,
    /// Documents whose model extraction failed after retries.
    pub extraction_failures: usize,
}

/// Run the extract stage over the given folders.
pub async fn extract_documents(
    source: &dyn DocumentSource,
    extractor: &dyn Extractor,
    folders: &[SourceFolder],
) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();

    for folder in folders {
        tracing::info!(folder = %folder.label, "listing folder");

        let documents = match source.list_folder(&folder.folder_id).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!(folder = %folder.label, error = %e, "folder listing failed");
                continue;
            }
        };

        if documents.is_empty() {
            tracing::info!(folder = %folder.label, "no documents found");
            continue;
        }

        report.documents_listed += documents.len();
        let total = documents.len();

        for (index, document) in documents.iter().enumerate() {
            tracing::info!(
                folder = %folder.label,
                document = %document.name,
                progress = %format!("{}/{}", index + 1, total),
                "processing document"
            );

            let text = match source.fetch_text(&document.id).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(document = %document.name, error = %e, "download failed");
                    report.download_failures += 1;
                    continue;
                }
            };

            match extractor.extract(&text, &document.name).await {
                Ok(mut record) => {
                    record.normalize();
                    record.source_file = Some(document.name.clone());
                    record.drive_file_id = Some(document.id.clone());
                    report.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(
                        document = %document.name,
                        error = %e,
                        "extraction failed, document excluded"
                    );
                    report.extraction_failures += 1;
                }
            }

            tokio::time::sleep(DOCUMENT_PAUSE).await;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDocumentSource, MockExtractor};
    use crate::types::{ClientFields, EventFields};

    fn candidate(tax_id: &str) -> ContractRecord {
        ContractRecord {
            client: Some(ClientFields {
                legal_name: Some("ACME LTDA".to_string()),
                tax_id: Some(tax_id.to_string()),
                person_type: Some("PJ".to_string()),
                ..Default::default()
            }),
            events: Some(vec![EventFields {
                net_value: Some(100.0),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_records_are_stamped_and_normalized() {
        let source = MockDocumentSource::new()
            .with_document("folder-a", "f1", "termo_001.docx", "text one")
            .with_document("folder-a", "f2", "termo_002.docx", "text two");
        let extractor = MockExtractor::new()
            .with_record("termo_001.docx", candidate("12.345.678/0001-95"))
            .with_record("termo_002.docx", candidate("98765432000110"));

        let folders = [SourceFolder::new("Paid terms", "folder-a")];
        let report = extract_documents(&source, &extractor, &folders)
            .await
            .unwrap();

        assert_eq!(report.documents_listed, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.extraction_failures, 0);

        let first = &report.records[0];
        assert_eq!(first.source_file.as_deref(), Some("termo_001.docx"));
        assert_eq!(first.drive_file_id.as_deref(), Some("f1"));
        // Punctuated tax id came back digits-only.
        assert_eq!(
            first.client.as_ref().unwrap().tax_id.as_deref(),
            Some("12345678000195")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_extraction_excludes_document_only() {
        let source = MockDocumentSource::new()
            .with_document("folder-a", "f1", "termo_001.docx", "text one")
            .with_document("folder-a", "f2", "termo_002.docx", "text two");
        let extractor = MockExtractor::new()
            .with_failure("termo_001.docx")
            .with_record("termo_002.docx", candidate("98765432000110"));

        let folders = [SourceFolder::new("Paid terms", "folder-a")];
        let report = extract_documents(&source, &extractor, &folders)
            .await
            .unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.extraction_failures, 1);
        assert_eq!(
            report.records[0].source_file.as_deref(),
            Some("termo_002.docx")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_failure_skips_document() {
        let source = MockDocumentSource::new()
            .with_document("folder-a", "f1", "termo_001.docx", "text one")
            .with_download_failure("f1");
        let extractor = MockExtractor::new().with_record("termo_001.docx", candidate("1"));

        let folders = [SourceFolder::new("Paid terms", "folder-a")];
        let report = extract_documents(&source, &extractor, &folders)
            .await
            .unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.download_failures, 1);
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_failure_continues_with_next_folder() {
        let source = MockDocumentSource::new()
            .with_folder_failure("folder-a")
            .with_document("folder-b", "f2", "termo_002.docx", "text two");
        let extractor = MockExtractor::new().with_record("termo_002.docx", candidate("2"));

        let folders = [
            SourceFolder::new("Paid terms", "folder-a"),
            SourceFolder::new("Free terms", "folder-b"),
        ];
        let report = extract_documents(&source, &extractor, &folders)
            .await
            .unwrap();

        assert_eq!(report.records.len(), 1);
    }
}
