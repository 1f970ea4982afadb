//! Core trait abstractions.
//!
//! Every external collaborator sits behind a trait so the stages can be
//! tested with the fakes in [`crate::testing`]:
//! - [`Extractor`] - the field-extraction model call
//! - [`Registry`] - the public business-registry lookup
//! - [`DocumentSource`] - the cloud file store
//! - [`ContractStore`] - the persisted datastore

pub mod ai;
pub mod documents;
pub mod registry;
pub mod store;

pub use ai::Extractor;
pub use documents::{DocumentRef, DocumentSource};
pub use registry::{CompanyInfo, Registry};
pub use store::ContractStore;
