//! Count summaries and sibling grouping for display callers.

use super::RelationshipResolver;
use crate::model::member::Member;
use std::collections::HashSet;

/// Relationship counts derived through the resolver primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipSummary {
    pub parents: usize,
    pub children: usize,
    pub siblings: usize,
    pub spouses: usize,
    pub direct_siblings: usize,
    pub step_siblings: usize,
    pub can_navigate_to_parents: bool,
    pub can_navigate_to_children: bool,
}

/// Counts read straight from union records, as shown on a member card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySummary {
    /// Partner slots of the parent union that hold an id.
    pub parents: usize,
    /// Child ids listed by the member's unions.
    pub children: usize,
    /// Direct siblings only.
    pub siblings: usize,
    /// Number of unions the member takes part in.
    pub spouses: usize,
    pub relationship_status: String,
}

/// Members sharing a parent union; parentless members form their own group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingGroup<'a> {
    /// Member ids in ascending order joined with `-`.
    pub id: String,
    pub members: Vec<&'a Member>,
}

impl<'a> RelationshipResolver<'a> {
    pub fn relationship_summary(&self, member: &Member) -> RelationshipSummary {
        let direct_siblings = self.direct_siblings(member).len();
        let step_siblings = self.step_siblings(member).len();
        RelationshipSummary {
            parents: self.parents(member).len(),
            children: self.children(member).len(),
            siblings: direct_siblings + step_siblings,
            spouses: self.spouses(member).len(),
            direct_siblings,
            step_siblings,
            can_navigate_to_parents: self.can_navigate_to_parents(member),
            can_navigate_to_children: self.can_navigate_to_children(member),
        }
    }

    pub fn family_summary(&self, member: &Member) -> FamilySummary {
        let parents = self
            .parent_union(member)
            .map(|entry| entry.partner_ids().iter().filter(|id| **id != 0).count())
            .unwrap_or(0);
        let unions = self.member_unions(member);
        let children = unions.iter().map(|entry| entry.children_ids.len()).sum();

        FamilySummary {
            parents,
            children,
            siblings: self.direct_siblings(member).len(),
            spouses: unions.len(),
            relationship_status: relationship_status(unions.len()),
        }
    }
}

/// `Single`, `Married`, or `Multiple relationships (n)`.
pub fn relationship_status(union_count: usize) -> String {
    match union_count {
        0 => "Single".to_string(),
        1 => "Married".to_string(),
        count => format!("Multiple relationships ({count})"),
    }
}

/// Groups `members` by shared parent union, in first-seen order.
pub fn sibling_groups(members: &[Member]) -> Vec<SiblingGroup<'_>> {
    let mut groups = Vec::new();
    let mut processed = HashSet::new();

    for member in members {
        if processed.contains(&member.id) {
            continue;
        }
        let siblings: Vec<&Member> = match member.parent_union_id {
            None => vec![member],
            Some(parent_id) => members
                .iter()
                .filter(|other| other.parent_union_id == Some(parent_id))
                .collect(),
        };

        let mut ids: Vec<_> = siblings.iter().map(|sibling| sibling.id).collect();
        ids.sort_unstable();
        let id = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-");

        processed.extend(ids);
        groups.push(SiblingGroup {
            id,
            members: siblings,
        });
    }

    groups
}
