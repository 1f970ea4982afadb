//! Persisted event model.

/// Initial status of every imported event.
pub const EVENT_STATUS_PENDING: &str = "Pending";

/// Discount kind stored when no discount applied.
pub const NO_DISCOUNT_KIND: &str = "None";

/// An event about to be inserted, linked to a resolved client.
///
/// Events are written once at import time and never updated by this
/// pipeline; `gross_value` and `discount_kind` are derived from the
/// resolved client's category before insert.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub client_id: i64,
    pub event_name: Option<String>,
    /// Calendar dates in "YYYY-MM-DD" form; persisted JSON-encoded, with
    /// `day_count` derived as its length.
    pub event_dates: Vec<String>,
    pub gross_value: f64,
    pub net_value: f64,
    pub status: String,
    pub validity_date: Option<String>,
    pub process_number: Option<String>,
    pub term_number: Option<String>,
    pub venue: Option<String>,
    pub sei_reference: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub discount_kind: String,
}

impl NewEvent {
    /// Number of event days, derived from the date list.
    pub fn day_count(&self) -> usize {
        self.event_dates.len()
    }
}
