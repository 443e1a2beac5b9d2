//! Relationship resolver.
//!
//! # Responsibility
//! - Derive parents, children, siblings and spouses from a document snapshot.
//! - Walk ancestors/descendants and classify the relationship of two members.
//!
//! # Invariants
//! - Read-only: nothing here mutates the snapshot or keeps state between calls.
//! - Dangling ids resolve to "no relationship"; they never fail a query.
//! - Results that list members keep member collection order unless noted.

mod lineage;
mod summary;

pub use lineage::{FamilyTree, RelationshipKind, Relative};
pub use summary::{
    relationship_status, sibling_groups, FamilySummary, RelationshipSummary, SiblingGroup,
};

use crate::model::document::FamilyDocument;
use crate::model::member::Member;
use crate::model::union::Union;
use crate::model::MemberId;
use std::collections::HashSet;

/// Borrowed view over members and unions answering relationship queries.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipResolver<'a> {
    members: &'a [Member],
    unions: &'a [Union],
}

impl<'a> RelationshipResolver<'a> {
    pub fn new(members: &'a [Member], unions: &'a [Union]) -> Self {
        Self { members, unions }
    }

    pub fn for_document(document: &'a FamilyDocument) -> Self {
        Self::new(&document.members, &document.unions)
    }

    pub fn member(&self, id: MemberId) -> Option<&'a Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// The union listing `member` as a child, when it exists.
    pub fn parent_union(&self, member: &Member) -> Option<&'a Union> {
        let parent_id = member.parent_union_id?;
        self.unions.iter().find(|entry| entry.id == parent_id)
    }

    /// Up to two partners of the member's parent union that exist.
    pub fn parents(&self, member: &Member) -> Vec<&'a Member> {
        let Some(parent_union) = self.parent_union(member) else {
            return Vec::new();
        };
        let mut parents = Vec::with_capacity(2);
        for partner_id in parent_union.partner_ids() {
            if let Some(parent) = self.member(partner_id) {
                if !parents.iter().any(|known: &&Member| known.id == parent.id) {
                    parents.push(parent);
                }
            }
        }
        parents
    }

    /// Unions the member takes part in as a partner.
    pub fn member_unions(&self, member: &Member) -> Vec<&'a Union> {
        self.unions
            .iter()
            .filter(|entry| entry.involves(member.id))
            .collect()
    }

    /// Children across every union the member is a partner of.
    pub fn children(&self, member: &Member) -> Vec<&'a Member> {
        let child_ids: HashSet<MemberId> = self
            .member_unions(member)
            .into_iter()
            .flat_map(|entry| entry.children_ids.iter().copied())
            .collect();
        self.members
            .iter()
            .filter(|candidate| child_ids.contains(&candidate.id))
            .collect()
    }

    /// Other members sharing the same parent union.
    pub fn direct_siblings(&self, member: &Member) -> Vec<&'a Member> {
        let Some(parent_id) = member.parent_union_id else {
            return Vec::new();
        };
        self.members
            .iter()
            .filter(|sibling| sibling.id != member.id && sibling.parent_union_id == Some(parent_id))
            .collect()
    }

    /// Members whose parent union differs from this member's but shares
    /// exactly one partner with it.
    pub fn step_siblings(&self, member: &Member) -> Vec<&'a Member> {
        let Some(own_union) = self.parent_union(member) else {
            return Vec::new();
        };
        self.members
            .iter()
            .filter(|sibling| {
                if sibling.id == member.id || sibling.parent_union_id == member.parent_union_id {
                    return false;
                }
                self.parent_union(sibling)
                    .is_some_and(|other_union| own_union.shared_partner_count(other_union) == 1)
            })
            .collect()
    }

    /// Direct siblings followed by step siblings.
    pub fn all_siblings(&self, member: &Member) -> Vec<&'a Member> {
        let mut siblings = self.direct_siblings(member);
        siblings.extend(self.step_siblings(member));
        siblings
    }

    /// The other partner of every union involving the member.
    pub fn spouses(&self, member: &Member) -> Vec<&'a Member> {
        self.member_unions(member)
            .into_iter()
            .filter_map(|entry| entry.partner_of(member.id))
            .filter_map(|partner_id| self.member(partner_id))
            .collect()
    }

    /// `First Last` of the other partner, or `Unknown Partner`.
    pub fn union_partner_name(&self, union: &Union, member: &Member) -> String {
        union
            .partner_of(member.id)
            .and_then(|partner_id| self.member(partner_id))
            .map(Member::short_name)
            .unwrap_or_else(|| "Unknown Partner".to_string())
    }

    pub fn can_navigate_to_parents(&self, member: &Member) -> bool {
        member.parent_union_id.is_some()
    }

    pub fn can_navigate_to_children(&self, member: &Member) -> bool {
        self.member_unions(member)
            .iter()
            .any(|entry| !entry.children_ids.is_empty())
    }
}
