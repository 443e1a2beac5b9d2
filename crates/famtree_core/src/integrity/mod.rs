//! Referential integrity maintainer.
//!
//! # Responsibility
//! - Provide the only mutation entry points over a [`FamilyStore`].
//! - Keep `Union::children_ids` and `Member::parent_union_id` consistent.
//!
//! # Invariants
//! - Every entry point finishes with [`reconcile`], so the bidirectional
//!   parent/child invariant holds after any sequence of calls.
//! - A child is listed by at most one union; the most recent union write
//!   claiming it wins.
//! - Dangling ids (unknown parent union, unknown child) are tolerated and
//!   resolve to "no relationship".
//! - Self-parentage and self-unions are rejected before any state changes.

mod error;

pub use error::IntegrityError;

use crate::migration::reconcile;
use crate::model::draft::{MemberDraft, SaveMode, UnionDraft};
use crate::model::member::Member;
use crate::model::union::Union;
use crate::model::{EntityId, MemberId, UnionId, MAX_ENTITY_ID};
use crate::store::FamilyStore;
use log::{debug, info};
use std::collections::HashSet;

/// Outcome of [`delete_member`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Whether a member with the requested id existed.
    pub removed: bool,
    /// Unions dropped because the member was one of their partners.
    pub removed_unions: Vec<UnionId>,
    /// Members whose parent union was dropped.
    pub orphaned_children: Vec<MemberId>,
}

/// Creates or edits a member and updates the parent union's child list.
///
/// `now` is stamped into `updated_at`, and into `created_at` on insert.
/// Editing an id that does not exist yet inserts the member under that id.
///
/// # Errors
/// - `IdsExhausted` when creating and no id is left.
/// - `InvalidId` when editing id `0` or an id above `MAX_ENTITY_ID`.
/// - `IdConflict` when editing an id that belongs to a union.
/// - `MemberIsPartnerOfParentUnion` when the requested parent union has this
///   member as a partner.
pub fn upsert_member(
    store: &mut FamilyStore,
    draft: &MemberDraft,
    mode: SaveMode,
    now: &str,
) -> Result<Member, IntegrityError> {
    let member_id = match mode {
        SaveMode::Create => store.next_id().ok_or(IntegrityError::IdsExhausted)?,
        SaveMode::Edit(id) => ensure_editable_id(store, id, EntityKind::Member)?,
    };

    let new_parent = draft.sanitized_parent_union_id();
    if let Some(parent_id) = new_parent {
        if store
            .union(parent_id)
            .is_some_and(|parent| parent.involves(member_id))
        {
            return Err(IntegrityError::MemberIsPartnerOfParentUnion {
                member_id,
                union_id: parent_id,
            });
        }
    }

    let document = store.document_mut();
    let old_parent = document
        .member(member_id)
        .and_then(|member| member.parent_union_id);

    if old_parent != new_parent {
        if let Some(old_id) = old_parent {
            if let Some(old_union) = document.union_mut(old_id) {
                old_union.children_ids.retain(|child_id| *child_id != member_id);
            }
        }
        if let Some(new_id) = new_parent {
            if let Some(new_union) = document.union_mut(new_id) {
                if !new_union.has_child(member_id) {
                    new_union.children_ids.push(member_id);
                }
            }
        }
    }

    let created = match document.member_mut(member_id) {
        Some(existing) => {
            draft.apply_to(existing);
            existing.updated_at = now.to_string();
            false
        }
        None => {
            let mut member = Member::new(member_id, "", "");
            draft.apply_to(&mut member);
            member.created_at = now.to_string();
            member.updated_at = now.to_string();
            document.members.push(member);
            true
        }
    };

    let report = reconcile(document);
    info!(
        "event=member_upsert module=integrity status=ok member_id={} created={} parent_changed={} reassigned={}",
        member_id,
        created,
        old_parent != new_parent,
        report.reassigned
    );

    document
        .member(member_id)
        .cloned()
        .ok_or(IntegrityError::InconsistentState(
            "upserted member missing after reconcile",
        ))
}

/// Creates or edits a union and re-points the parent back-references of its
/// children.
///
/// Children newly listed here are taken away from any other union that listed
/// them. Editing an id that does not exist yet inserts the union under that id.
///
/// # Errors
/// - `IdsExhausted` when creating and no id is left.
/// - `InvalidId` when editing id `0` or an id above `MAX_ENTITY_ID`.
/// - `IdConflict` when editing an id that belongs to a member.
/// - `SelfUnion` when both partner ids are equal.
/// - `PartnerListedAsChild` when a partner appears in `children_ids`.
pub fn upsert_union(
    store: &mut FamilyStore,
    draft: &UnionDraft,
    mode: SaveMode,
) -> Result<Union, IntegrityError> {
    let union_id = match mode {
        SaveMode::Create => store.next_id().ok_or(IntegrityError::IdsExhausted)?,
        SaveMode::Edit(id) => ensure_editable_id(store, id, EntityKind::Union)?,
    };

    if draft.member1_id == draft.member2_id {
        return Err(IntegrityError::SelfUnion {
            union_id,
            member_id: draft.member1_id,
        });
    }

    let incoming = draft.to_union(union_id);
    if let Some(partner_id) = incoming
        .children_ids
        .iter()
        .copied()
        .find(|child_id| incoming.involves(*child_id))
    {
        return Err(IntegrityError::PartnerListedAsChild {
            union_id,
            member_id: partner_id,
        });
    }

    let document = store.document_mut();
    let existing_index = document.unions.iter().position(|entry| entry.id == union_id);
    let editing = matches!(mode, SaveMode::Edit(_)) && existing_index.is_some();

    match existing_index {
        Some(index) if editing => {
            let old_children: HashSet<MemberId> =
                document.unions[index].children_ids.iter().copied().collect();
            let new_children: HashSet<MemberId> = incoming.children_ids.iter().copied().collect();

            for member in &mut document.members {
                let was_child = old_children.contains(&member.id);
                let is_child = new_children.contains(&member.id);
                if was_child && !is_child && member.parent_union_id == Some(union_id) {
                    member.parent_union_id = None;
                } else if is_child && !was_child {
                    member.parent_union_id = Some(union_id);
                }
            }
            document.unions[index] = incoming.clone();
        }
        _ => {
            for member in &mut document.members {
                if incoming.has_child(member.id) {
                    member.parent_union_id = Some(union_id);
                }
            }
            document.unions.push(incoming.clone());
        }
    }

    let mut moved_children = 0usize;
    for other in document
        .unions
        .iter_mut()
        .filter(|entry| entry.id != union_id)
    {
        let before = other.children_ids.len();
        other
            .children_ids
            .retain(|child_id| !incoming.has_child(*child_id));
        moved_children += before - other.children_ids.len();
    }

    let report = reconcile(document);
    info!(
        "event=union_upsert module=integrity status=ok union_id={} created={} children={} moved_children={} reassigned={}",
        union_id,
        !editing,
        incoming.children_ids.len(),
        moved_children,
        report.reassigned
    );

    document
        .union(union_id)
        .cloned()
        .ok_or(IntegrityError::InconsistentState(
            "upserted union missing after reconcile",
        ))
}

/// Deletes a member and every union it is a partner of.
///
/// Children of a dropped union lose their parent back-reference; they are not
/// re-parented elsewhere. Deleting an unknown id changes nothing.
pub fn delete_member(store: &mut FamilyStore, member_id: MemberId) -> DeleteReport {
    if store.member(member_id).is_none() {
        debug!("event=member_delete module=integrity status=noop member_id={member_id}");
        return DeleteReport::default();
    }

    let document = store.document_mut();
    document.members.retain(|member| member.id != member_id);

    let removed_unions: Vec<UnionId> = document
        .unions
        .iter()
        .filter(|entry| entry.involves(member_id))
        .map(|entry| entry.id)
        .collect();
    document.unions.retain(|entry| !entry.involves(member_id));

    for entry in &mut document.unions {
        entry.children_ids.retain(|child_id| *child_id != member_id);
    }

    let mut orphaned_children = Vec::new();
    for member in &mut document.members {
        if member
            .parent_union_id
            .is_some_and(|parent_id| removed_unions.contains(&parent_id))
        {
            member.parent_union_id = None;
            orphaned_children.push(member.id);
        }
    }

    reconcile(document);
    info!(
        "event=member_delete module=integrity status=ok member_id={} removed_unions={} orphaned_children={}",
        member_id,
        removed_unions.len(),
        orphaned_children.len()
    );

    DeleteReport {
        removed: true,
        removed_unions,
        orphaned_children,
    }
}

/// Deletes one union; its children survive without a parent union.
///
/// Returns whether a union was removed.
pub fn delete_union(store: &mut FamilyStore, union_id: UnionId) -> bool {
    let document = store.document_mut();
    let before = document.unions.len();
    document.unions.retain(|entry| entry.id != union_id);
    if document.unions.len() == before {
        debug!("event=union_delete module=integrity status=noop union_id={union_id}");
        return false;
    }

    let report = reconcile(document);
    info!(
        "event=union_delete module=integrity status=ok union_id={} orphaned_children={}",
        union_id, report.reassigned
    );
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Member,
    Union,
}

fn ensure_editable_id(
    store: &FamilyStore,
    id: EntityId,
    kind: EntityKind,
) -> Result<EntityId, IntegrityError> {
    if id == 0 || id > MAX_ENTITY_ID {
        return Err(IntegrityError::InvalidId(id));
    }
    let taken_by_other = match kind {
        EntityKind::Member => store.union(id).is_some(),
        EntityKind::Union => store.member(id).is_some(),
    };
    if taken_by_other {
        return Err(IntegrityError::IdConflict(id));
    }
    Ok(id)
}
