//! Mutation inputs for member and union upserts.

use super::member::{Gender, Member};
use super::union::Union;
use super::{EntityId, MemberId, UnionId};

/// Whether an upsert creates a new entity or edits the one with the given id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Edit(EntityId),
}

/// Editable member fields as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub first_name: String,
    pub middle_names: Vec<String>,
    pub last_name: String,
    pub maiden_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_date: Option<String>,
    pub death_place: Option<String>,
    pub gender: Gender,
    pub is_alive: bool,
    /// `Some(0)` is treated as "no parent union".
    pub parent_union_id: Option<UnionId>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

impl MemberDraft {
    /// Draft for a living member with only names set.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_alive: true,
            ..Self::default()
        }
    }

    /// Parent union after input sanitization.
    pub fn sanitized_parent_union_id(&self) -> Option<UnionId> {
        self.parent_union_id.filter(|id| *id != 0)
    }

    /// Overwrites every editable field of `member`, leaving id and
    /// timestamps untouched.
    pub(crate) fn apply_to(&self, member: &mut Member) {
        member.first_name = self.first_name.clone();
        member.middle_names = self
            .middle_names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        member.last_name = self.last_name.clone();
        member.maiden_name = non_blank(&self.maiden_name);
        member.birth_date = non_blank(&self.birth_date);
        member.birth_place = non_blank(&self.birth_place);
        member.death_date = non_blank(&self.death_date);
        member.death_place = non_blank(&self.death_place);
        member.gender = self.gender;
        member.is_alive = self.is_alive;
        member.parent_union_id = self.sanitized_parent_union_id();
        member.photo_url = non_blank(&self.photo_url);
        member.notes = non_blank(&self.notes);
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            first_name: member.first_name.clone(),
            middle_names: member.middle_names.clone(),
            last_name: member.last_name.clone(),
            maiden_name: member.maiden_name.clone(),
            birth_date: member.birth_date.clone(),
            birth_place: member.birth_place.clone(),
            death_date: member.death_date.clone(),
            death_place: member.death_place.clone(),
            gender: member.gender,
            is_alive: member.is_alive,
            parent_union_id: member.parent_union_id,
            photo_url: member.photo_url.clone(),
            notes: member.notes.clone(),
        }
    }
}

/// Editable union fields as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionDraft {
    pub member1_id: MemberId,
    pub member2_id: MemberId,
    pub marriage_date: Option<String>,
    pub marriage_place: Option<String>,
    pub divorce_date: Option<String>,
    pub divorce_place: Option<String>,
    pub children_ids: Vec<MemberId>,
}

impl UnionDraft {
    pub fn between(member1_id: MemberId, member2_id: MemberId) -> Self {
        Self {
            member1_id,
            member2_id,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children_ids: Vec<MemberId>) -> Self {
        self.children_ids = children_ids;
        self
    }

    /// Builds the stored union; duplicate child ids keep their first position.
    pub(crate) fn to_union(&self, id: UnionId) -> Union {
        let mut children_ids: Vec<MemberId> = Vec::with_capacity(self.children_ids.len());
        for child_id in &self.children_ids {
            if !children_ids.contains(child_id) {
                children_ids.push(*child_id);
            }
        }
        Union {
            id,
            member1_id: self.member1_id,
            member2_id: self.member2_id,
            marriage_date: non_blank(&self.marriage_date),
            marriage_place: non_blank(&self.marriage_place),
            divorce_date: non_blank(&self.divorce_date),
            divorce_place: non_blank(&self.divorce_place),
            children_ids,
        }
    }
}

impl From<&Union> for UnionDraft {
    fn from(source: &Union) -> Self {
        Self {
            member1_id: source.member1_id,
            member2_id: source.member2_id,
            marriage_date: source.marriage_date.clone(),
            marriage_place: source.marriage_place.clone(),
            divorce_date: source.divorce_date.clone(),
            divorce_place: source.divorce_place.clone(),
            children_ids: source.children_ids.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
