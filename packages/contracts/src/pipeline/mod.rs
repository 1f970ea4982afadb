//! Pipeline stages.
//!
//! Data flows strictly forward, one stage per manually-run binary:
//! extract → sanitize → import, with [`validate`] and [`review`] as
//! read-only reporting over the extractor output. Each stage persists its
//! full output file before the next stage begins, so every stage can be
//! inspected and re-run independently.

pub mod extract;
pub mod import;
pub mod review;
pub mod sanitize;
pub mod validate;

pub use extract::{extract_documents, ExtractReport, SourceFolder};
pub use import::import_records;
pub use review::{build_review_file, is_field_missing, ReviewOutcome};
pub use sanitize::{sanitize_records, SanitizeReport};
pub use validate::{missing_field_report, MissingFieldReport};
