//! Two-collection family document, the persisted and in-memory shape.

use super::member::Member;
use super::union::Union;
use super::{EntityId, MemberId, UnionId};
use serde::{Deserialize, Serialize};

/// Members and unions of one family tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDocument {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub unions: Vec<Union>,
}

impl FamilyDocument {
    pub fn new(members: Vec<Member>, unions: Vec<Union>) -> Self {
        Self { members, unions }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.unions.is_empty()
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    pub fn union(&self, id: UnionId) -> Option<&Union> {
        self.unions.iter().find(|entry| entry.id == id)
    }

    pub fn union_mut(&mut self, id: UnionId) -> Option<&mut Union> {
        self.unions.iter_mut().find(|entry| entry.id == id)
    }

    /// Largest id across both collections, `0` for an empty document.
    pub fn max_id(&self) -> EntityId {
        let members = self.members.iter().map(|member| member.id);
        let unions = self.unions.iter().map(|entry| entry.id);
        members.chain(unions).max().unwrap_or(0)
    }
}
