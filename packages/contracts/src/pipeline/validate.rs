//! Validate stage: read-only missing-field reporting.
//!
//! Operates on raw JSON values rather than typed records so a malformed
//! or partially-shaped record never fails the scan — a missing
//! intermediate key simply counts as a missing field.

use serde_json::Value;

/// Client field paths checked per record.
pub const CLIENT_FIELD_PATHS: [&str; 4] = [
    "cliente.nome_razao_social",
    "cliente.documento",
    "cliente.tipo_pessoa",
    "cliente.nome_responsavel",
];

/// Event field paths checked per event entry.
pub const EVENT_FIELD_PATHS: [&str; 4] = [
    "evento.nome_evento",
    "evento.datas_evento",
    "evento.valor_final",
    "evento.espaco_utilizado",
];

/// Missing-field counts over one extractor output file.
#[derive(Debug, Default)]
pub struct MissingFieldReport {
    pub total_records: usize,
    pub total_events: usize,
    counts: Vec<(&'static str, usize)>,
}

impl MissingFieldReport {
    /// All counters, in fixed field order.
    pub fn counts(&self) -> &[(&'static str, usize)] {
        &self.counts
    }

    /// Count for one field path.
    pub fn count_for(&self, path: &str) -> usize {
        self.counts
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Fields missing at least once, in fixed field order.
    pub fn missing_only(&self) -> Vec<(&'static str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .copied()
            .collect()
    }

    /// True when no field is missing anywhere.
    pub fn is_clean(&self) -> bool {
        self.counts.iter().all(|(_, count)| *count == 0)
    }

    /// Denominator for a field path: events for `evento.*`, records
    /// otherwise.
    pub fn population_for(&self, path: &str) -> usize {
        if path.starts_with("evento.") {
            self.total_events
        } else {
            self.total_records
        }
    }

    fn bump(&mut self, path: &'static str) {
        if let Some(entry) = self.counts.iter_mut().find(|(p, _)| *p == path) {
            entry.1 += 1;
        }
    }
}

/// Scan raw extractor-output records for missing fields.
pub fn missing_field_report(records: &[Value]) -> MissingFieldReport {
    let mut report = MissingFieldReport {
        total_records: records.len(),
        total_events: 0,
        counts: CLIENT_FIELD_PATHS
            .iter()
            .chain(EVENT_FIELD_PATHS.iter())
            .map(|path| (*path, 0))
            .collect(),
    };

    for record in records {
        let client = record.get("cliente");
        for path in CLIENT_FIELD_PATHS {
            let key = field_key(path);
            if is_missing(client.and_then(|c| c.get(key)), key) {
                report.bump(path);
            }
        }

        let events = record
            .get("eventos")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if events.is_empty() {
            // No events at all: every event field is missing once for
            // this record.
            for path in EVENT_FIELD_PATHS {
                report.bump(path);
            }
        } else {
            report.total_events += events.len();
            for event in events {
                for path in EVENT_FIELD_PATHS {
                    let key = field_key(path);
                    if is_missing(event.get(key), key) {
                        report.bump(path);
                    }
                }
            }
        }
    }

    report
}

fn field_key(path: &str) -> &str {
    path.split_once('.').map(|(_, key)| key).unwrap_or(path)
}

/// Missing means absent or null; strings and lists are also missing when
/// empty. `valor_final` is the exception: 0.0 is a real value (confirmed
/// free event), so only null/absent counts.
fn is_missing(value: Option<&Value>, key: &str) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(_) if key == "valor_final" => false,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_event_list_bumps_every_event_counter_once() {
        let records = vec![json!({
            "cliente": {
                "nome_razao_social": "ACME",
                "documento": "123",
                "tipo_pessoa": "PJ",
                "nome_responsavel": "MARIA"
            },
            "eventos": []
        })];

        let report = missing_field_report(&records);

        for path in EVENT_FIELD_PATHS {
            assert_eq!(report.count_for(path), 1, "{path}");
        }
        for path in CLIENT_FIELD_PATHS {
            assert_eq!(report.count_for(path), 0, "{path}");
        }
        assert_eq!(report.total_events, 0);
    }

    #[test]
    fn test_missing_intermediate_key_counts_as_missing() {
        let records = vec![json!({"eventos": [{"nome_evento": "Feira"}]})];

        let report = missing_field_report(&records);

        // No "cliente" object at all: every client field is missing.
        for path in CLIENT_FIELD_PATHS {
            assert_eq!(report.count_for(path), 1, "{path}");
        }
        assert_eq!(report.count_for("evento.nome_evento"), 0);
        assert_eq!(report.count_for("evento.valor_final"), 1);
    }

    #[test]
    fn test_zero_net_value_is_not_missing() {
        let records = vec![json!({
            "cliente": {},
            "eventos": [
                {"valor_final": 0.0},
                {"valor_final": null},
                {}
            ]
        })];

        let report = missing_field_report(&records);
        assert_eq!(report.count_for("evento.valor_final"), 2);
        assert_eq!(report.total_events, 3);
    }

    #[test]
    fn test_empty_strings_and_lists_are_missing() {
        let records = vec![json!({
            "cliente": {
                "nome_razao_social": "  ",
                "documento": "123",
                "tipo_pessoa": "PJ",
                "nome_responsavel": "MARIA"
            },
            "eventos": [{"nome_evento": "Feira", "datas_evento": [], "valor_final": 1.0, "espaco_utilizado": "Hall"}]
        })];

        let report = missing_field_report(&records);
        assert_eq!(report.count_for("cliente.nome_razao_social"), 1);
        assert_eq!(report.count_for("evento.datas_evento"), 1);
        assert_eq!(report.count_for("evento.espaco_utilizado"), 0);
    }

    #[test]
    fn test_clean_file_reports_clean() {
        let records = vec![json!({
            "cliente": {
                "nome_razao_social": "ACME",
                "documento": "123",
                "tipo_pessoa": "PJ",
                "nome_responsavel": "MARIA"
            },
            "eventos": [{
                "nome_evento": "Feira",
                "datas_evento": ["2025-03-01"],
                "valor_final": 0.0,
                "espaco_utilizado": "Hall"
            }]
        })];

        let report = missing_field_report(&records);
        assert!(report.is_clean());
        assert!(report.missing_only().is_empty());
        assert_eq!(report.total_records, 1);
        assert_eq!(report.total_events, 1);
    }

    #[test]
    fn test_population_denominators() {
        let report = missing_field_report(&[
            json!({"cliente": {}, "eventos": [{}, {}]}),
            json!({"cliente": {}, "eventos": [{}]}),
        ]);
        assert_eq!(report.population_for("cliente.documento"), 2);
        assert_eq!(report.population_for("evento.nome_evento"), 3);
    }
}
