//! Multi-generation walks and pairwise relationship classification.

use super::RelationshipResolver;
use crate::model::member::Member;
use crate::model::MemberId;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Generations inspected by [`RelationshipResolver::relationship_type`].
const CLASSIFY_DEPTH: usize = 3;

/// A relative found by an ancestor/descendant walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relative<'a> {
    pub member: &'a Member,
    /// `1` for parents/children, `2` for grandparents/grandchildren, ...
    pub generation: usize,
}

/// How the second member relates to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    SelfMember,
    Spouse,
    Parent,
    Child,
    Sibling,
    Grandparent,
    GreatGrandparent,
    Grandchild,
    GreatGrandchild,
    Unrelated,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfMember => "self",
            Self::Spouse => "spouse",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Grandparent => "grandparent",
            Self::GreatGrandparent => "great-grandparent",
            Self::Grandchild => "grandchild",
            Self::GreatGrandchild => "great-grandchild",
            Self::Unrelated => "unrelated",
        }
    }
}

impl Display for RelationshipKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relatives around one member, as shown by a tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree<'a> {
    pub member: &'a Member,
    /// Sorted by generation.
    pub ancestors: Vec<Relative<'a>>,
    /// Sorted by generation.
    pub descendants: Vec<Relative<'a>>,
    pub spouses: Vec<&'a Member>,
    pub siblings: Vec<&'a Member>,
}

impl<'a> RelationshipResolver<'a> {
    /// Ancestors up to `depth` generations back.
    ///
    /// The walk runs generation by generation rather than line by line: all
    /// parents come before any grandparent, in parent order within a
    /// generation. A visited set stops repeats, so an ancestor reachable
    /// through several lines (pedigree collapse) is reported once, under the
    /// smallest generation number any line gives it. A line-by-line walk
    /// would instead keep whichever distance it reached first. Cyclic data
    /// terminates.
    pub fn ancestors(&self, member: &Member, depth: usize) -> Vec<Relative<'a>> {
        self.walk(member, depth, |resolver, current| resolver.parents(current))
    }

    /// Descendants up to `depth` generations forward, reported like
    /// [`Self::ancestors`].
    pub fn descendants(&self, member: &Member, depth: usize) -> Vec<Relative<'a>> {
        self.walk(member, depth, |resolver, current| resolver.children(current))
    }

    fn walk<F>(&self, member: &Member, depth: usize, next_of: F) -> Vec<Relative<'a>>
    where
        F: Fn(&Self, &Member) -> Vec<&'a Member>,
    {
        let mut found = Vec::new();
        let mut visited: HashSet<MemberId> = HashSet::from([member.id]);
        let mut frontier: Vec<&Member> = vec![member];

        for generation in 1..=depth {
            let mut next_frontier: Vec<&'a Member> = Vec::new();
            for &current in &frontier {
                for relative in next_of(self, current) {
                    if visited.insert(relative.id) {
                        found.push(Relative {
                            member: relative,
                            generation,
                        });
                        next_frontier.push(relative);
                    }
                }
            }
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }

        found
    }

    /// Classifies how `other` relates to `member`.
    ///
    /// Checks run in priority order: self, spouse, parent, child, sibling,
    /// grandparent, great-grandparent, grandchild, great-grandchild. `Parent`
    /// means `other` is a parent of `member`.
    pub fn relationship_type(&self, member: &Member, other: &Member) -> RelationshipKind {
        if member.id == other.id {
            return RelationshipKind::SelfMember;
        }
        let is_other = |candidate: &&Member| candidate.id == other.id;

        if self.spouses(member).iter().any(is_other) {
            return RelationshipKind::Spouse;
        }
        if self.parents(member).iter().any(is_other) {
            return RelationshipKind::Parent;
        }
        if self.children(member).iter().any(is_other) {
            return RelationshipKind::Child;
        }
        if self.all_siblings(member).iter().any(is_other) {
            return RelationshipKind::Sibling;
        }

        let generation_of = |relatives: Vec<Relative<'a>>| {
            relatives
                .into_iter()
                .find(|relative| relative.member.id == other.id)
                .map(|relative| relative.generation)
        };

        match generation_of(self.ancestors(member, CLASSIFY_DEPTH)) {
            Some(2) => return RelationshipKind::Grandparent,
            Some(generation) if generation >= 3 => return RelationshipKind::GreatGrandparent,
            _ => {}
        }
        match generation_of(self.descendants(member, CLASSIFY_DEPTH)) {
            Some(2) => return RelationshipKind::Grandchild,
            Some(generation) if generation >= 3 => return RelationshipKind::GreatGrandchild,
            _ => {}
        }

        RelationshipKind::Unrelated
    }

    /// Ancestors and descendants up to `depth`, plus spouses and siblings.
    pub fn family_tree(&self, member: &'a Member, depth: usize) -> FamilyTree<'a> {
        let mut ancestors = self.ancestors(member, depth);
        let mut descendants = self.descendants(member, depth);
        ancestors.sort_by_key(|relative| relative.generation);
        descendants.sort_by_key(|relative| relative.generation);

        FamilyTree {
            member,
            ancestors,
            descendants,
            spouses: self.spouses(member),
            siblings: self.all_siblings(member),
        }
    }
}
