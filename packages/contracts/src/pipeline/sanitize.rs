//! Sanitize stage: enrichment and missing-field backfill.
//!
//! Consumes the extract stage's output and produces the import-ready file.
//! Records without a client block or a non-empty event list are dropped
//! here (logged, not an error) and never reach the importer.

use crate::traits::{CompanyInfo, Registry};
use crate::types::{ClientFields, ContractRecord, PersonType};

/// Length of a digits-only company tax id (CNPJ). Anything else never
/// triggers an enrichment attempt.
const COMPANY_TAX_ID_LEN: usize = 14;

/// Outcome of one sanitize run.
#[derive(Debug, Default)]
pub struct SanitizeReport {
    /// Import-ready records, in input order.
    pub records: Vec<ContractRecord>,
    /// Records dropped for missing client or event data.
    pub dropped: usize,
    /// Records that received registry data.
    pub enriched: usize,
}

/// Run the sanitize stage.
///
/// The registry is expected to be rate-limited by the caller (wrap it in
/// [`crate::registry::RateLimitedRegistry`]); this function just calls it
/// once per eligible organization record.
pub async fn sanitize_records(
    records: Vec<ContractRecord>,
    registry: &dyn Registry,
) -> SanitizeReport {
    let mut report = SanitizeReport::default();
    let total = records.len();

    for (index, mut record) in records.into_iter().enumerate() {
        let source = record.source_name().to_string();
        tracing::info!(
            source = %source,
            progress = %format!("{}/{}", index + 1, total),
            "sanitizing record"
        );

        if record.client.is_none() || !record.has_events() {
            tracing::warn!(source = %source, "record dropped: missing client or event data");
            report.dropped += 1;
            continue;
        }

        let client = record.client.as_mut().unwrap();

        match client.person_type() {
            Some(PersonType::Organization) => {
                if let Some(tax_id) = company_tax_id(client) {
                    match registry.lookup(&tax_id).await {
                        Ok(Some(info)) => {
                            apply_company_info(client, &info);
                            report.enriched += 1;
                        }
                        Ok(None) => {
                            tracing::debug!(source = %source, tax_id = %tax_id, "registry has no data");
                        }
                        Err(e) => {
                            tracing::warn!(source = %source, tax_id = %tax_id, error = %e, "registry lookup failed");
                        }
                    }
                }
            }
            Some(PersonType::Individual) => {
                if is_blank(&client.responsible_name) {
                    client.responsible_name = client.legal_name.clone();
                }
            }
            None => {}
        }

        report.records.push(record);
    }

    report
}

/// Digits-only tax id, only when it has the exact company length.
fn company_tax_id(client: &ClientFields) -> Option<String> {
    client
        .normalized_tax_id()
        .filter(|digits| digits.len() == COMPANY_TAX_ID_LEN)
}

/// Overwrite registry-owned fields with the registry's data.
fn apply_company_info(client: &mut ClientFields, info: &CompanyInfo) {
    client.official_legal_name = info.legal_name.clone();
    client.postal_code = info.postal_code.clone();
    client.street = info.street.clone();
    client.number = info.number.clone();
    client.complement = info.complement.clone();
    client.district = info.district.clone();
    client.city = info.city.clone();
    client.state_code = info.state_code.clone();

    if is_blank(&client.responsible_name) {
        if let Some(partner) = info.first_partner() {
            client.responsible_name = Some(partner.to_string());
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRegistry;
    use crate::types::EventFields;

    fn record(person_type: &str, tax_id: &str, responsible: Option<&str>) -> ContractRecord {
        ContractRecord {
            client: Some(ClientFields {
                legal_name: Some("ACME PRODUCOES LTDA".to_string()),
                tax_id: Some(tax_id.to_string()),
                person_type: Some(person_type.to_string()),
                responsible_name: responsible.map(str::to_string),
                ..Default::default()
            }),
            events: Some(vec![EventFields::default()]),
            source_file: Some("termo_001.docx".to_string()),
            ..Default::default()
        }
    }

    fn registry_info() -> CompanyInfo {
        CompanyInfo {
            legal_name: Some("ACME PRODUCOES DE EVENTOS LTDA".to_string()),
            postal_code: Some("57000-000".to_string()),
            street: Some("RUA DO COMERCIO".to_string()),
            number: Some("100".to_string()),
            complement: None,
            district: Some("CENTRO".to_string()),
            city: Some("MACEIO".to_string()),
            state_code: Some("AL".to_string()),
            partners: vec!["MARIA SOUZA".to_string(), "JOSE SANTOS".to_string()],
        }
    }

    #[tokio::test]
    async fn test_organization_is_enriched_and_partner_backfills_responsible() {
        let registry = MockRegistry::new().with_company("12345678000195", registry_info());
        let records = vec![record("PJ", "12.345.678/0001-95", None)];

        let report = sanitize_records(records, &registry).await;

        assert_eq!(report.enriched, 1);
        let client = report.records[0].client.as_ref().unwrap();
        assert_eq!(
            client.official_legal_name.as_deref(),
            Some("ACME PRODUCOES DE EVENTOS LTDA")
        );
        assert_eq!(client.city.as_deref(), Some("MACEIO"));
        assert_eq!(client.responsible_name.as_deref(), Some("MARIA SOUZA"));
        // The extracted trade name is kept alongside the official one.
        assert_eq!(client.legal_name.as_deref(), Some("ACME PRODUCOES LTDA"));
    }

    #[tokio::test]
    async fn test_existing_responsible_name_is_not_overwritten() {
        let registry = MockRegistry::new().with_company("12345678000195", registry_info());
        let records = vec![record("PJ", "12345678000195", Some("CARLA DIAS"))];

        let report = sanitize_records(records, &registry).await;

        let client = report.records[0].client.as_ref().unwrap();
        assert_eq!(client.responsible_name.as_deref(), Some("CARLA DIAS"));
    }

    #[tokio::test]
    async fn test_short_tax_id_never_reaches_registry() {
        let registry = MockRegistry::new();
        // 11 digits (an individual's document) on an organization record.
        let records = vec![record("PJ", "123.456.789-00", None)];

        let report = sanitize_records(records, &registry).await;

        assert_eq!(registry.lookup_count(), 0);
        assert_eq!(report.enriched, 0);
        assert_eq!(report.records.len(), 1);
    }

    #[tokio::test]
    async fn test_individual_rule_backfills_responsible_from_legal_name() {
        let registry = MockRegistry::new();
        let records = vec![record("PF", "12345678900", None)];

        let report = sanitize_records(records, &registry).await;

        assert_eq!(registry.lookup_count(), 0);
        let client = report.records[0].client.as_ref().unwrap();
        assert_eq!(
            client.responsible_name.as_deref(),
            Some("ACME PRODUCOES LTDA")
        );
    }

    #[tokio::test]
    async fn test_records_without_client_or_events_are_dropped() {
        let registry = MockRegistry::new();
        let records = vec![
            ContractRecord {
                client: None,
                events: Some(vec![EventFields::default()]),
                ..Default::default()
            },
            ContractRecord {
                client: Some(ClientFields::default()),
                events: Some(vec![]),
                ..Default::default()
            },
            record("PF", "12345678900", Some("X")),
        ];

        let report = sanitize_records(records, &registry).await;

        assert_eq!(report.dropped, 2);
        assert_eq!(report.records.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_failure_keeps_record_unenriched() {
        let registry = MockRegistry::new().with_failure("12345678000195");
        let records = vec![record("PJ", "12345678000195", None)];

        let report = sanitize_records(records, &registry).await;

        assert_eq!(report.enriched, 0);
        let client = report.records[0].client.as_ref().unwrap();
        assert!(client.official_legal_name.is_none());
        assert!(client.responsible_name.is_none());
    }
}
