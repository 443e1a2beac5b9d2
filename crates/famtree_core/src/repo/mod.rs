//! Persistence boundary for family documents and settings.
//!
//! # Responsibility
//! - Define the load/save contract the service layer depends on.
//! - Keep SQL details inside the repository implementation.
//!
//! # Invariants
//! - Saving a document overwrites the stored one as a whole, atomically.
//! - Loading hands back raw JSON; shape repair is the migration engine's job.

pub mod document_repo;
