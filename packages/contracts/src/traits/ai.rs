//! Extractor trait for the field-extraction model call.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::ContractRecord;

/// Turns raw document text into one candidate record.
///
/// Implementations wrap a specific LLM provider and own their retry
/// policy: a returned error means the document is extraction-failed for
/// good and must be excluded from all downstream stages.
///
/// The returned record carries the client and event blocks only; the
/// caller stamps `source_file` and `drive_file_id`. Implementations must
/// not normalize fields — the extract stage normalizes tax ids and net
/// values itself rather than trusting the model output.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract structured fields from `text` of the document `file_name`.
    async fn extract(&self, text: &str, file_name: &str) -> ExtractResult<ContractRecord>;
}
