//! Document migration engine.
//!
//! # Responsibility
//! - Classify raw parsed input as legacy, current or unrecognized.
//! - Normalize any accepted input into the two-collection document.
//! - Own the reconcile pass that rebuilds `parent_union_id`.
//!
//! # Invariants
//! - Migration never fails; unrecognized input yields an empty document.
//! - Union child lists are authoritative; stored `parent_union_id` values are
//!   discarded and rebuilt.
//! - Migrating an already migrated document is a no-op.

mod coerce;
mod reconcile;

pub(crate) use coerce::entity_id;
pub use reconcile::{reconcile, ReconcileReport};

use crate::model::document::FamilyDocument;
use crate::model::member::Member;
use crate::model::union::Union;
use crate::model::EntityId;
use coerce::{normalize_member_value, normalize_union_value};
use log::{info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Top-level layout of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Bare array of members, each optionally embedding its unions.
    Legacy,
    /// Object with `members` and `unions` arrays.
    Current,
    Unrecognized,
}

impl DocumentShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Classifies raw input without inspecting individual entries.
pub fn classify_document(raw: &Value) -> DocumentShape {
    match raw {
        Value::Array(_) => DocumentShape::Legacy,
        Value::Object(map) => {
            let members_ok = map.get("members").is_some_and(Value::is_array);
            let unions_ok = map.get("unions").is_some_and(Value::is_array);
            if members_ok && unions_ok {
                DocumentShape::Current
            } else {
                DocumentShape::Unrecognized
            }
        }
        _ => DocumentShape::Unrecognized,
    }
}

/// Normalizes raw input into a reconciled document.
///
/// Entries that cannot be read as a member or union (no usable id, not an
/// object) are skipped. Later duplicates of an id within one collection are
/// skipped as well.
pub fn migrate_document(raw: &Value) -> FamilyDocument {
    let shape = classify_document(raw);
    let (raw_members, raw_unions) = match (shape, raw) {
        (DocumentShape::Legacy, Value::Array(entries)) => flatten_legacy(entries),
        (DocumentShape::Current, Value::Object(map)) => (
            array_items(map.get("members")),
            array_items(map.get("unions")),
        ),
        _ => {
            warn!("event=document_migrate module=migration status=fallback shape=unrecognized");
            return FamilyDocument::default();
        }
    };

    let members = collect_members(&raw_members);
    let unions = collect_unions(&raw_unions);
    warn_on_shared_ids(&members, &unions);

    let mut document = FamilyDocument::new(members, unions);
    let report = reconcile(&mut document);
    info!(
        "event=document_migrate module=migration status=ok shape={} members={} unions={} dropped_claims={}",
        shape.as_str(),
        document.members.len(),
        document.unions.len(),
        report.dropped_claims
    );
    document
}

fn array_items(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Splits legacy member entries into members and their embedded unions,
/// keeping the first union seen for each id.
fn flatten_legacy(entries: &[Value]) -> (Vec<Value>, Vec<Value>) {
    let mut unions = Vec::new();
    let mut seen_union_ids: HashSet<EntityId> = HashSet::new();

    for entry in entries {
        let Some(embedded) = entry.get("unions").and_then(Value::as_array) else {
            continue;
        };
        for raw_union in embedded {
            let Some(id) = raw_union.get("id").and_then(coerce::entity_id) else {
                unions.push(raw_union.clone());
                continue;
            };
            if seen_union_ids.insert(id) {
                unions.push(raw_union.clone());
            }
        }
    }

    (entries.to_vec(), unions)
}

fn collect_members(raw_members: &[Value]) -> Vec<Member> {
    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut members = Vec::with_capacity(raw_members.len());
    let mut skipped = 0usize;

    for raw in raw_members {
        let parsed = normalize_member_value(raw)
            .and_then(|value| serde_json::from_value::<Member>(value).ok());
        match parsed {
            Some(member) if seen.insert(member.id) => members.push(member),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("event=document_migrate module=migration status=skip kind=member count={skipped}");
    }
    members
}

fn collect_unions(raw_unions: &[Value]) -> Vec<Union> {
    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut unions = Vec::with_capacity(raw_unions.len());
    let mut skipped = 0usize;

    for raw in raw_unions {
        let parsed = normalize_union_value(raw)
            .and_then(|value| serde_json::from_value::<Union>(value).ok());
        match parsed {
            Some(entry) if seen.insert(entry.id) => unions.push(entry),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("event=document_migrate module=migration status=skip kind=union count={skipped}");
    }
    unions
}

fn warn_on_shared_ids(members: &[Member], unions: &[Union]) {
    let member_ids: HashSet<EntityId> = members.iter().map(|member| member.id).collect();
    let shared = unions
        .iter()
        .filter(|entry| member_ids.contains(&entry.id))
        .count();
    if shared > 0 {
        warn!("event=document_migrate module=migration status=warn reason=shared_id count={shared}");
    }
}
