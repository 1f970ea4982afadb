//! Contract Document Pipeline
//!
//! A batch pipeline that turns venue-use permission contracts into
//! database rows: documents are downloaded from a Drive folder, an LLM
//! extracts one client plus its events per document, organization clients
//! are enriched from the public company registry, deterministic business
//! rules classify new clients and derive event pricing, and an importer
//! loads everything into SQLite with tax-id deduplication.
//!
//! Stages run manually, one binary each, against flat JSON files:
//!
//! ```text
//! extract  ->  extracted_records.json
//! sanitize ->  sanitized_records.json   (validate / review read-only)
//! import   ->  clients + events tables
//! ```
//!
//! Every external collaborator is a trait ([`traits`]) with a production
//! implementation ([`ai`], [`registry`], [`documents`], [`stores`]) and a
//! mock ([`testing`]), so stage logic is testable without network or
//! database access.

pub mod ai;
pub mod classify;
pub mod documents;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod registry;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use classify::{gross_value, responsible_name_from_legal_name, ClassificationPolicy};
pub use error::{
    DocumentError, ExtractError, PipelineError, RegistryError, Result, StoreError,
};
pub use traits::{CompanyInfo, ContractStore, DocumentRef, DocumentSource, Extractor, Registry};
pub use types::{
    Client, ClientCategory, ClientFields, ContractRecord, EventFields, ImportSummary, NewClient,
    NewEvent, PersonType, SkipReport,
};

// Re-export stage entry points
pub use pipeline::{
    build_review_file, extract_documents, import_records, missing_field_report, sanitize_records,
    ExtractReport, MissingFieldReport, ReviewOutcome, SanitizeReport, SourceFolder,
};

// Re-export implementations
pub use ai::OpenAiExtractor;
pub use documents::DriveClient;
pub use registry::{BrasilApi, RateLimitedRegistry, REGISTRY_COOLDOWN};
pub use stores::{MemoryStore, SqliteStore};
