//! Import stage: client deduplication and event loading.
//!
//! Records are processed strictly one at a time, in source order — client
//! deduplication depends on sequentially-updated store state, so no
//! parallel import is permitted. Per record:
//!
//! 1. Skip records with no client block or no tax document id.
//! 2. Resolve the client by normalized tax id: reuse an existing row, or
//!    classify and insert a new one. Classification is never reapplied to
//!    existing clients.
//! 3. Price and insert each event against the resolved client's stored
//!    category, status "Pending".
//!
//! Insert failures are logged, recorded in the skip report and do not
//! roll back earlier inserts of the same record; already-inserted events
//! stay committed.

use crate::classify::{gross_value, responsible_name_from_legal_name, ClassificationPolicy};
use crate::traits::ContractStore;
use crate::types::{
    ClientCategory, ClientFields, ContractRecord, ImportSummary, NewClient, NewEvent, PersonType,
    EVENT_STATUS_PENDING,
};

/// Run the import stage over sanitized records.
pub async fn import_records(
    records: &[ContractRecord],
    store: &dyn ContractStore,
    policy: &ClassificationPolicy,
) -> ImportSummary {
    let mut summary = ImportSummary {
        processed: records.len(),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        let source = record.source_name().to_string();
        tracing::info!(
            source = %source,
            progress = %format!("{}/{}", index + 1, records.len()),
            "importing record"
        );

        let Some(client_fields) = &record.client else {
            tracing::warn!(source = %source, "skipped: no client block");
            summary.skip(source.as_str(), "no client block");
            continue;
        };

        let Some(tax_id) = client_fields.normalized_tax_id() else {
            tracing::warn!(source = %source, "skipped: no tax document id");
            summary.skip(source.as_str(), "no tax document id");
            continue;
        };

        // Resolve the client: find by natural key, or classify and create.
        let (client_id, category) = match store.find_client_by_tax_id(&tax_id).await {
            Ok(Some(existing)) => {
                tracing::info!(
                    source = %source,
                    client_id = existing.id,
                    "client already exists, reusing"
                );
                summary.clients_reused += 1;
                (existing.id, existing.category)
            }
            Ok(None) => {
                let category = policy.classify(&tax_id, client_fields.legal_name.as_deref());
                let new_client = build_new_client(client_fields, &tax_id, category);

                match store.insert_client(&new_client).await {
                    Ok(id) => {
                        tracing::info!(
                            source = %source,
                            client_id = id,
                            category = %category,
                            "new client created"
                        );
                        summary.clients_created += 1;
                        (id, category)
                    }
                    Err(e) => {
                        tracing::error!(source = %source, error = %e, "client insert failed");
                        summary.skip(source.as_str(), format!("client insert failed: {e}"));
                        continue;
                    }
                }
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "client lookup failed");
                summary.skip(source.as_str(), format!("client lookup failed: {e}"));
                continue;
            }
        };

        // Price against the resolved client's category, found or created.
        let rate = policy.discount_rate(category);
        let discount_kind = policy.discount_kind(category);

        for event_fields in record.events.as_deref().unwrap_or_default() {
            let net_value = event_fields.net_value.unwrap_or(0.0).max(0.0);

            let event = NewEvent {
                client_id,
                event_name: event_fields.event_name.clone(),
                event_dates: event_fields.event_dates.clone().unwrap_or_default(),
                gross_value: gross_value(net_value, rate),
                net_value,
                status: EVENT_STATUS_PENDING.to_string(),
                validity_date: event_fields.final_validity_date.clone(),
                process_number: event_fields.process_number.clone(),
                term_number: event_fields.term_number.clone(),
                venue: event_fields.venue.clone(),
                sei_reference: event_fields.sei_reference.clone(),
                start_time: event_fields.start_time.clone(),
                end_time: event_fields.end_time.clone(),
                discount_kind: discount_kind.to_string(),
            };

            match store.insert_event(&event).await {
                Ok(_) => summary.events_inserted += 1,
                Err(e) => {
                    tracing::error!(
                        source = %source,
                        client_id,
                        error = %e,
                        "event insert failed"
                    );
                    summary.skip(source.as_str(), format!("event insert failed: {e}"));
                    // Partial success: keep what was inserted, move on to
                    // the next record.
                    break;
                }
            }
        }
    }

    summary
}

fn build_new_client(
    fields: &ClientFields,
    tax_id: &str,
    category: ClientCategory,
) -> NewClient {
    let mut responsible_name = fields
        .responsible_name
        .clone()
        .filter(|name| !name.trim().is_empty());

    // Short organization names often are the responsible person's name.
    if responsible_name.is_none() && fields.person_type() == Some(PersonType::Organization) {
        responsible_name = fields
            .legal_name
            .as_deref()
            .and_then(responsible_name_from_legal_name)
            .map(str::to_string);
    }

    NewClient {
        legal_name: fields.display_legal_name().unwrap_or_default().to_string(),
        person_type: fields.person_type.clone(),
        tax_id: tax_id.to_string(),
        responsible_name,
        category,
        postal_code: fields.postal_code.clone(),
        street: fields.street.clone(),
        number: fields.number.clone(),
        complement: fields.complement.clone(),
        district: fields.district.clone(),
        city: fields.city.clone(),
        state_code: fields.state_code.clone(),
    }
}
