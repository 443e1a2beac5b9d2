//! Family document use-case service.
//!
//! # Responsibility
//! - Load, migrate and save the family document through a repository.
//! - Route every mutation through the integrity maintainer.
//! - Report persistence outcomes as [`PersistResponse`] envelopes.
//!
//! # Invariants
//! - Persistence failures never surface as errors from this facade.
//! - Mutations change only the in-memory store; callers decide when to `save`.

use crate::integrity::{self, DeleteReport, IntegrityError};
use crate::migration::migrate_document;
use crate::model::document::FamilyDocument;
use crate::model::draft::{MemberDraft, SaveMode, UnionDraft};
use crate::model::member::Member;
use crate::model::now_timestamp;
use crate::model::union::Union;
use crate::model::{MemberId, UnionId};
use crate::relations::RelationshipResolver;
use crate::repo::document_repo::DocumentRepository;
use crate::store::FamilyStore;
use crate::transfer::{self, ImportReport, TransferError};
use log::{error, info, warn};
use serde_json::Value;

/// Pass/fail envelope for persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistResponse {
    pub ok: bool,
    /// Human-readable outcome for diagnostics/UI.
    pub message: String,
}

impl PersistResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Service facade owning the loaded document.
pub struct FamilyService<R: DocumentRepository> {
    repo: R,
    store: FamilyStore,
}

impl<R: DocumentRepository> FamilyService<R> {
    /// Creates a service with an empty store; call [`Self::initialize`] to load.
    pub fn new(repo: R) -> Self {
        Self::with_store(repo, FamilyStore::new())
    }

    pub fn with_store(repo: R, store: FamilyStore) -> Self {
        Self { repo, store }
    }

    pub fn store(&self) -> &FamilyStore {
        &self.store
    }

    pub fn document(&self) -> &FamilyDocument {
        self.store.document()
    }

    /// Relationship queries over the current snapshot.
    pub fn resolver(&self) -> RelationshipResolver<'_> {
        RelationshipResolver::for_document(self.store.document())
    }

    /// Loads the stored document, migrates it and replaces the store.
    ///
    /// A missing or unreadable document leaves the store empty.
    pub fn initialize(&mut self) -> PersistResponse {
        match self.repo.load_document_raw() {
            Ok(Some(raw)) => {
                let document = migrate_document(&raw);
                let message = format!(
                    "loaded {} members and {} unions",
                    document.members.len(),
                    document.unions.len()
                );
                self.store.replace(document);
                info!("event=service_initialize module=service status=ok");
                PersistResponse::success(message)
            }
            Ok(None) => {
                self.store.clear();
                info!("event=service_initialize module=service status=ok empty=true");
                PersistResponse::success("no saved family data")
            }
            Err(err) => {
                self.store.clear();
                error!("event=service_initialize module=service status=error error={err}");
                PersistResponse::failure(format!("failed to load family data: {err}"))
            }
        }
    }

    /// Overwrites the stored document with the current store contents.
    pub fn save(&self) -> PersistResponse {
        match self.repo.save_document(self.store.document()) {
            Ok(()) => PersistResponse::success("family data saved"),
            Err(err) => {
                error!("event=service_save module=service status=error error={err}");
                PersistResponse::failure(format!("failed to save family data: {err}"))
            }
        }
    }

    /// Removes stored document and settings and empties the store.
    pub fn clear_all_data(&mut self) -> PersistResponse {
        self.store.clear();
        match self.repo.clear() {
            Ok(()) => PersistResponse::success("all family data cleared"),
            Err(err) => {
                error!("event=service_clear module=service status=error error={err}");
                PersistResponse::failure(format!("failed to clear family data: {err}"))
            }
        }
    }

    pub fn save_member(
        &mut self,
        draft: &MemberDraft,
        mode: SaveMode,
    ) -> Result<Member, IntegrityError> {
        integrity::upsert_member(&mut self.store, draft, mode, &now_timestamp())
    }

    pub fn save_union(
        &mut self,
        draft: &UnionDraft,
        mode: SaveMode,
    ) -> Result<Union, IntegrityError> {
        integrity::upsert_union(&mut self.store, draft, mode)
    }

    pub fn delete_member(&mut self, member_id: MemberId) -> DeleteReport {
        integrity::delete_member(&mut self.store, member_id)
    }

    pub fn delete_union(&mut self, union_id: UnionId) -> bool {
        integrity::delete_union(&mut self.store, union_id)
    }

    /// Stored settings shallow-merged over `defaults`.
    ///
    /// Falls back to `defaults` when nothing is stored, the stored value is
    /// unreadable, or either side is not a JSON object.
    pub fn load_settings(&self, defaults: Value) -> Value {
        let stored = match self.repo.load_settings_raw() {
            Ok(Some(stored)) => stored,
            Ok(None) => return defaults,
            Err(err) => {
                warn!("event=settings_load module=service status=fallback error={err}");
                return defaults;
            }
        };

        match (defaults, stored) {
            (Value::Object(mut merged), Value::Object(overrides)) => {
                merged.extend(overrides);
                Value::Object(merged)
            }
            (defaults, _) => defaults,
        }
    }

    pub fn save_settings(&self, settings: &Value) -> PersistResponse {
        match self.repo.save_settings(settings) {
            Ok(()) => PersistResponse::success("settings saved"),
            Err(err) => {
                error!("event=settings_save module=service status=error error={err}");
                PersistResponse::failure(format!("failed to save settings: {err}"))
            }
        }
    }

    /// Pretty-printed JSON of the current document.
    pub fn export_json(&self) -> Result<String, TransferError> {
        transfer::export_json(self.store.document())
    }

    /// Replaces the store with an imported document.
    ///
    /// The store is left untouched when the import is rejected.
    pub fn import_json(&mut self, text: &str) -> Result<ImportReport, TransferError> {
        let report = transfer::import_json(text)?;
        self.store.replace(report.document.clone());
        Ok(report)
    }
}
