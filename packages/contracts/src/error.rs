//! Typed errors for the contract pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the failure
//! classes the stages care about distinguishable: retryable extraction
//! failures, per-document fetch failures, registry failures, and store
//! failures.

use thiserror::Error;

/// Errors that can occur while running a pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Document listing or download failed
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Field extraction failed after retries
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Registry lookup failed
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Datastore operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Intermediate file could not be read or written
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// Intermediate file contained invalid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the document store (listing, download, text extraction).
#[derive(Debug, Error)]
pub enum DocumentError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store rejected the request (bad token, missing file, quota)
    #[error("document store rejected request (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The downloaded payload is not a readable .docx archive
    #[error("unreadable document payload: {0}")]
    Payload(String),

    /// Access token file missing or malformed
    #[error("token file error: {0}")]
    Token(String),
}

/// Errors from the field-extraction model call.
///
/// These are the transient-retryable class: the extractor retries with
/// backoff and surfaces `RetriesExhausted` only after the final attempt.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The API returned a non-success status
    #[error("extraction API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The model response was not the expected single JSON object
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// All retry attempts failed; the document is excluded downstream
    #[error("extraction failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

/// Errors from the business-registry lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The registry returned an unexpected status (404 is not an error,
    /// it maps to a `None` lookup result)
    #[error("registry API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Errors from the persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connecting to the datastore failed; this aborts an import run
    #[error("connection failed: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A single insert or lookup failed; the importer skips and continues
    #[error("query failed: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for document-store operations.
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
