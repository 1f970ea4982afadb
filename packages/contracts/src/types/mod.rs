//! Data types for the contract pipeline.
//!
//! Split by lifecycle:
//! - [`record`] - wire-shaped records flowing through the intermediate JSON
//!   files (extractor output, sanitized output)
//! - [`client`] - persisted client model and its enums
//! - [`event`] - persisted event model
//! - [`report`] - skip reports and the end-of-run import summary

pub mod client;
pub mod event;
pub mod record;
pub mod report;

pub use client::{Client, ClientCategory, NewClient, PersonType};
pub use event::{NewEvent, EVENT_STATUS_PENDING, NO_DISCOUNT_KIND};
pub use record::{normalize_tax_id, ClientFields, ContractRecord, EventFields};
pub use report::{ImportSummary, SkipReport};
