//! The reconcile pass: rebuilds every member's `parent_union_id` from union
//! child lists.
//!
//! A child claimed by several unions stays with the first union in
//! collection order; later claims and repeated ids inside one list are
//! removed. After the pass, `member.parent_union_id == Some(u)` holds exactly
//! when union `u` lists the member.

use crate::model::document::FamilyDocument;
use crate::model::{MemberId, UnionId};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Counters describing what one reconcile pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Members whose `parent_union_id` changed.
    pub reassigned: usize,
    /// Child ids removed from union lists as duplicate claims.
    pub dropped_claims: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.reassigned == 0 && self.dropped_claims == 0
    }
}

/// Runs the rebuild over the whole document.
pub fn reconcile(document: &mut FamilyDocument) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut claimed: HashMap<MemberId, UnionId> = HashMap::new();

    for entry in &mut document.unions {
        let union_id = entry.id;
        entry.children_ids.retain(|child_id| match claimed.entry(*child_id) {
            Entry::Vacant(slot) => {
                slot.insert(union_id);
                true
            }
            Entry::Occupied(_) => {
                report.dropped_claims += 1;
                false
            }
        });
    }

    for member in &mut document.members {
        let rebuilt = claimed.get(&member.id).copied();
        if member.parent_union_id != rebuilt {
            member.parent_union_id = rebuilt;
            report.reassigned += 1;
        }
    }

    if report.dropped_claims > 0 {
        warn!(
            "event=reconcile module=migration status=repaired dropped_claims={}",
            report.dropped_claims
        );
    }
    debug!(
        "event=reconcile module=migration status=ok reassigned={} dropped_claims={}",
        report.reassigned, report.dropped_claims
    );
    report
}
