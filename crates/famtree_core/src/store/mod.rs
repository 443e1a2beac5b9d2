//! In-memory entity store.
//!
//! # Responsibility
//! - Own the member and union collections of the loaded document.
//! - Allocate ids from the shared member/union id space.
//!
//! # Invariants
//! - `next_id()` is one past the largest id of either collection, so an id
//!   still present in the store is never handed out again. It never exceeds
//!   [`MAX_ENTITY_ID`].
//! - `replace()` swaps both collections at once.
//!
//! Mutations go through [`crate::integrity`]; the store itself performs no
//! relationship bookkeeping.

use crate::model::document::FamilyDocument;
use crate::model::member::Member;
use crate::model::union::Union;
use crate::model::{EntityId, MemberId, UnionId, MAX_ENTITY_ID};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyStore {
    document: FamilyDocument,
}

impl FamilyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already normalized document.
    pub fn from_document(document: FamilyDocument) -> Self {
        Self { document }
    }

    pub fn members(&self) -> &[Member] {
        &self.document.members
    }

    pub fn unions(&self) -> &[Union] {
        &self.document.unions
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.document.member(id)
    }

    pub fn union(&self, id: UnionId) -> Option<&Union> {
        self.document.union(id)
    }

    /// Read-only view of both collections.
    pub fn document(&self) -> &FamilyDocument {
        &self.document
    }

    pub fn into_document(self) -> FamilyDocument {
        self.document
    }

    /// Replaces both collections with `document`.
    pub fn replace(&mut self, document: FamilyDocument) {
        debug!(
            "event=store_replace module=store status=ok members={} unions={}",
            document.members.len(),
            document.unions.len()
        );
        self.document = document;
    }

    /// Drops every member and union.
    pub fn clear(&mut self) {
        self.replace(FamilyDocument::default());
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Next free id; `1` for an empty store, `None` once the id space is
    /// used up.
    pub fn next_id(&self) -> Option<EntityId> {
        self.document
            .max_id()
            .checked_add(1)
            .filter(|id| *id <= MAX_ENTITY_ID)
    }

    pub(crate) fn document_mut(&mut self) -> &mut FamilyDocument {
        &mut self.document
    }
}
