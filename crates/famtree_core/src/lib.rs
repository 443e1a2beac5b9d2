//! Core domain logic for the family tree.
//! This crate is the single source of truth for relationship invariants.

pub mod db;
pub mod integrity;
pub mod logging;
pub mod migration;
pub mod model;
pub mod relations;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod transfer;

pub use integrity::{
    delete_member, delete_union, upsert_member, upsert_union, DeleteReport, IntegrityError,
};
pub use logging::{init_logging, logging_status, LogLevel};
pub use migration::{classify_document, migrate_document, reconcile, DocumentShape};
pub use model::document::FamilyDocument;
pub use model::draft::{MemberDraft, SaveMode, UnionDraft};
pub use model::member::{Gender, Member, NameOptions};
pub use model::union::Union;
pub use model::{now_timestamp, EntityId, MemberId, UnionId, MAX_ENTITY_ID};
pub use relations::{RelationshipKind, RelationshipResolver, Relative};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use search::member_search::{
    advanced_member_search, search_members, search_suggestions, search_unions,
    union_display_name, AdvancedSearchOptions, MemberSearchOptions, SearchField,
    UnionSearchOptions,
};
pub use search::text::{fuzzy_search, highlight_search_terms};
pub use service::family_service::{FamilyService, PersistResponse};
pub use store::FamilyStore;
pub use transfer::{export_json, import_json, ImportReport, TransferError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
