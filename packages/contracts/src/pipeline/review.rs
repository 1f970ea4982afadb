//! Review stage: consolidated source text for missing-field records.
//!
//! Debug companion to the validator. Given a dot-path (e.g.
//! `cliente.nome_responsavel`), finds the records where that field is
//! missing, re-downloads their original documents and builds one review
//! file with a header per document, so a human can check whether the
//! information truly is absent from the source text.

use serde_json::Value;

use crate::traits::DocumentSource;

const HEADER_RULE: &str =
    "======================================================================";

/// Outcome of one review run.
#[derive(Debug, Default)]
pub struct ReviewOutcome {
    /// Records where the field was missing.
    pub matched: usize,
    /// Documents whose text was downloaded successfully.
    pub downloaded: usize,
    /// The consolidated review file body.
    pub content: String,
}

/// Walk a record along a dot-separated path.
pub fn value_at_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for key in path.split('.') {
        current = current.get(key)?;
    }
    Some(current)
}

/// True when the field at `path` is missing from the record: absent
/// anywhere along the path, null, or an empty string/list.
pub fn is_field_missing(record: &Value, path: &str) -> bool {
    match value_at_path(record, path) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(_) => false,
    }
}

/// Build the consolidated review file for one field path.
pub async fn build_review_file(
    records: &[Value],
    field_path: &str,
    source: &dyn DocumentSource,
) -> ReviewOutcome {
    let missing: Vec<&Value> = records
        .iter()
        .filter(|record| is_field_missing(record, field_path))
        .collect();

    let mut outcome = ReviewOutcome {
        matched: missing.len(),
        ..Default::default()
    };

    if missing.is_empty() {
        return outcome;
    }

    for (index, record) in missing.iter().enumerate() {
        let file_name = record
            .get("arquivo_origem")
            .and_then(Value::as_str)
            .unwrap_or("<unknown source>");
        let file_id = record.get("id_arquivo_drive").and_then(Value::as_str);

        let Some(file_id) = file_id else {
            outcome.content.push_str(&format!(
                "\n--- ERROR: document '{file_name}' has no stored drive id ---\n\n"
            ));
            continue;
        };

        tracing::info!(
            document = file_name,
            progress = %format!("{}/{}", index + 1, missing.len()),
            "downloading document for review"
        );

        outcome.content.push_str(&format!(
            "{HEADER_RULE}\nDOCUMENT: {file_name}\nDRIVE ID: {file_id}\n{HEADER_RULE}\n\n"
        ));

        match source.fetch_text(file_id).await {
            Ok(text) => {
                outcome.content.push_str(&text);
                outcome.content.push_str("\n\n");
                outcome.downloaded += 1;
            }
            Err(e) => {
                tracing::warn!(document = file_name, error = %e, "review download failed");
                outcome
                    .content
                    .push_str("--- FAILED TO DOWNLOAD THIS DOCUMENT'S CONTENT ---\n\n");
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDocumentSource;
    use serde_json::json;

    #[test]
    fn test_value_at_path_traverses_nested_keys() {
        let record = json!({"cliente": {"nome_responsavel": "MARIA"}});
        assert_eq!(
            value_at_path(&record, "cliente.nome_responsavel"),
            Some(&json!("MARIA"))
        );
        assert_eq!(value_at_path(&record, "cliente.documento"), None);
        assert_eq!(value_at_path(&record, "eventos.0"), None);
    }

    #[test]
    fn test_missing_semantics() {
        let record = json!({"cliente": {"nome_responsavel": "", "documento": "123"}});
        assert!(is_field_missing(&record, "cliente.nome_responsavel"));
        assert!(is_field_missing(&record, "cliente.tipo_pessoa"));
        assert!(is_field_missing(&json!({}), "cliente.documento"));
        assert!(!is_field_missing(&record, "cliente.documento"));
    }

    #[tokio::test]
    async fn test_review_collects_only_missing_records() {
        let source = MockDocumentSource::new()
            .with_text("f1", "texto completo do termo um")
            .with_text("f2", "texto completo do termo dois");

        let records = vec![
            json!({
                "cliente": {"nome_responsavel": null},
                "arquivo_origem": "termo_001.docx",
                "id_arquivo_drive": "f1"
            }),
            json!({
                "cliente": {"nome_responsavel": "MARIA"},
                "arquivo_origem": "termo_002.docx",
                "id_arquivo_drive": "f2"
            }),
        ];

        let outcome =
            build_review_file(&records, "cliente.nome_responsavel", &source).await;

        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.downloaded, 1);
        assert!(outcome.content.contains("DOCUMENT: termo_001.docx"));
        assert!(outcome.content.contains("texto completo do termo um"));
        assert!(!outcome.content.contains("termo_002.docx"));
    }

    #[tokio::test]
    async fn test_review_handles_missing_id_and_failed_download() {
        let source = MockDocumentSource::new().with_download_failure("f1");

        let records = vec![
            json!({
                "arquivo_origem": "termo_001.docx",
                "id_arquivo_drive": "f1"
            }),
            json!({
                "arquivo_origem": "termo_002.docx"
            }),
        ];

        let outcome =
            build_review_file(&records, "cliente.nome_responsavel", &source).await;

        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.downloaded, 0);
        assert!(outcome.content.contains("FAILED TO DOWNLOAD"));
        assert!(outcome
            .content
            .contains("document 'termo_002.docx' has no stored drive id"));
    }
}
