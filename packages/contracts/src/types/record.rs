//! Wire-shaped records for the intermediate JSON files.
//!
//! The extractor output file and the sanitized output file are UTF-8 JSON
//! arrays of [`ContractRecord`]. The wire keys are fixed (they are what the
//! extraction model is instructed to emit and what downstream reviewers see
//! when inspecting the files); the Rust structs map them to English names.
//!
//! Fields the extraction cannot find are explicit `null`s, never omitted.

use serde::{Deserialize, Serialize};

use super::client::PersonType;

/// One candidate record: a client plus its events, tagged with the source
/// document it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractRecord {
    #[serde(rename = "cliente", default)]
    pub client: Option<ClientFields>,

    #[serde(rename = "eventos", default)]
    pub events: Option<Vec<EventFields>>,

    /// Display name of the originating document.
    #[serde(rename = "arquivo_origem", default)]
    pub source_file: Option<String>,

    /// File identifier in the document store, kept so the review stage can
    /// re-download the original.
    #[serde(rename = "id_arquivo_drive", default)]
    pub drive_file_id: Option<String>,
}

impl ContractRecord {
    /// Display name of the source document, or a placeholder.
    pub fn source_name(&self) -> &str {
        self.source_file.as_deref().unwrap_or("<unknown source>")
    }

    /// True when the record carries a non-empty event list.
    ///
    /// An empty list means the extraction found a client but no events;
    /// such records are dropped by the sanitizer, same as a missing list.
    pub fn has_events(&self) -> bool {
        self.events.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Normalize extractor output before it is trusted downstream: the tax
    /// id becomes digits-only and event net values are clamped non-negative.
    /// 0.0 remains "confirmed free event", not "unknown".
    pub fn normalize(&mut self) {
        if let Some(client) = &mut self.client {
            if let Some(tax_id) = &client.tax_id {
                let digits = normalize_tax_id(tax_id);
                client.tax_id = if digits.is_empty() { None } else { Some(digits) };
            }
        }
        if let Some(events) = &mut self.events {
            for event in events {
                if let Some(value) = event.net_value {
                    event.net_value = Some(if value.is_finite() { value.max(0.0) } else { 0.0 });
                }
            }
        }
    }
}

/// Client block of a candidate record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFields {
    #[serde(rename = "nome_razao_social", default)]
    pub legal_name: Option<String>,

    /// Tax identifier (CNPJ or CPF), digits-only once normalized.
    #[serde(rename = "documento", default)]
    pub tax_id: Option<String>,

    /// "PJ" (organization) or "PF" (individual), as emitted by the model.
    #[serde(rename = "tipo_pessoa", default)]
    pub person_type: Option<String>,

    #[serde(rename = "nome_responsavel", default)]
    pub responsible_name: Option<String>,

    /// Registry legal name, set by the sanitizer for enriched organizations.
    #[serde(rename = "nome_razao_social_oficial", default)]
    pub official_legal_name: Option<String>,

    #[serde(rename = "cep", default)]
    pub postal_code: Option<String>,

    #[serde(rename = "logradouro", default)]
    pub street: Option<String>,

    #[serde(rename = "numero", default)]
    pub number: Option<String>,

    #[serde(rename = "complemento", default)]
    pub complement: Option<String>,

    #[serde(rename = "bairro", default)]
    pub district: Option<String>,

    #[serde(rename = "cidade", default)]
    pub city: Option<String>,

    #[serde(rename = "uf", default)]
    pub state_code: Option<String>,
}

impl ClientFields {
    /// Parsed person type, `None` for absent or unrecognized values.
    pub fn person_type(&self) -> Option<PersonType> {
        self.person_type.as_deref().and_then(PersonType::from_wire)
    }

    /// Digits-only tax id, `None` when absent or empty after filtering.
    pub fn normalized_tax_id(&self) -> Option<String> {
        self.tax_id
            .as_deref()
            .map(normalize_tax_id)
            .filter(|digits| !digits.is_empty())
    }

    /// The name to persist: the registry's official legal name when the
    /// record was enriched, the extracted one otherwise.
    pub fn display_legal_name(&self) -> Option<&str> {
        self.official_legal_name
            .as_deref()
            .or(self.legal_name.as_deref())
    }
}

/// Event block of a candidate record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFields {
    #[serde(rename = "numero_processo", default)]
    pub process_number: Option<String>,

    #[serde(rename = "numero_termo", default)]
    pub term_number: Option<String>,

    #[serde(rename = "nome_evento", default)]
    pub event_name: Option<String>,

    /// Calendar dates in "YYYY-MM-DD" form, in document order.
    #[serde(rename = "datas_evento", default)]
    pub event_dates: Option<Vec<String>>,

    #[serde(rename = "hora_inicio", default)]
    pub start_time: Option<String>,

    #[serde(rename = "hora_fim", default)]
    pub end_time: Option<String>,

    /// Contracted (net) value. 0.0 means the event is confirmed free.
    #[serde(rename = "valor_final", default)]
    pub net_value: Option<f64>,

    #[serde(rename = "espaco_utilizado", default)]
    pub venue: Option<String>,

    #[serde(rename = "data_vigencia_final", default)]
    pub final_validity_date: Option<String>,

    /// Official-letter reference number, when the document cites one.
    #[serde(rename = "numero_oficio_sei", default)]
    pub sei_reference: Option<String>,
}

/// Canonical digits-only form of a tax identifier.
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tax_id_strips_punctuation() {
        assert_eq!(normalize_tax_id("12.345.678/0001-95"), "12345678000195");
        assert_eq!(normalize_tax_id("123.456.789-00"), "12345678900");
        assert_eq!(normalize_tax_id("n/a"), "");
    }

    #[test]
    fn test_normalize_clamps_net_value() {
        let mut record = ContractRecord {
            client: Some(ClientFields {
                tax_id: Some("12.345.678/0001-95".to_string()),
                ..Default::default()
            }),
            events: Some(vec![
                EventFields {
                    net_value: Some(-10.0),
                    ..Default::default()
                },
                EventFields {
                    net_value: Some(0.0),
                    ..Default::default()
                },
                EventFields {
                    net_value: None,
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        record.normalize();

        let client = record.client.as_ref().unwrap();
        assert_eq!(client.tax_id.as_deref(), Some("12345678000195"));

        let events = record.events.as_ref().unwrap();
        assert_eq!(events[0].net_value, Some(0.0));
        assert_eq!(events[1].net_value, Some(0.0));
        // Absent stays absent; "unknown" is decided at pricing time.
        assert_eq!(events[2].net_value, None);
    }

    #[test]
    fn test_record_tolerates_missing_keys() {
        let record: ContractRecord = serde_json::from_str(r#"{"cliente": {}}"#).unwrap();
        assert!(record.client.is_some());
        assert!(!record.has_events());
        assert_eq!(record.source_name(), "<unknown source>");
    }

    #[test]
    fn test_empty_event_list_counts_as_no_events() {
        let record: ContractRecord =
            serde_json::from_str(r#"{"cliente": {"documento": "123"}, "eventos": []}"#).unwrap();
        assert!(!record.has_events());
    }

    #[test]
    fn test_wire_keys_round_trip() {
        let json = r#"{
            "cliente": {
                "nome_razao_social": "ACME LTDA",
                "documento": "12345678000195",
                "tipo_pessoa": "PJ",
                "nome_responsavel": null
            },
            "eventos": [{"nome_evento": "Feira", "valor_final": 100.0}],
            "arquivo_origem": "termo_001.docx",
            "id_arquivo_drive": "abc123"
        }"#;

        let record: ContractRecord = serde_json::from_str(json).unwrap();
        let client = record.client.as_ref().unwrap();
        assert_eq!(client.legal_name.as_deref(), Some("ACME LTDA"));
        assert_eq!(client.person_type(), Some(PersonType::Organization));

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["cliente"]["documento"], "12345678000195");
        assert_eq!(out["eventos"][0]["valor_final"], 100.0);
        assert_eq!(out["arquivo_origem"], "termo_001.docx");
    }
}
