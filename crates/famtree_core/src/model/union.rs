//! Union domain model.
//!
//! A union is a partnership between two members and the only place
//! parent-child edges are recorded. Partner order carries no meaning.

use super::{MemberId, UnionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    pub id: UnionId,
    #[serde(default)]
    pub member1_id: MemberId,
    #[serde(default)]
    pub member2_id: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_place: Option<String>,
    /// Forward references to children; kept free of duplicates.
    #[serde(default)]
    pub children_ids: Vec<MemberId>,
}

impl Union {
    /// Creates a childless union without dates or places.
    pub fn new(id: UnionId, member1_id: MemberId, member2_id: MemberId) -> Self {
        Self {
            id,
            member1_id,
            member2_id,
            marriage_date: None,
            marriage_place: None,
            divorce_date: None,
            divorce_place: None,
            children_ids: Vec::new(),
        }
    }

    /// Returns whether `member_id` is one of the two partners.
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.member1_id == member_id || self.member2_id == member_id
    }

    /// Returns the other partner when `member_id` takes part in this union.
    pub fn partner_of(&self, member_id: MemberId) -> Option<MemberId> {
        if self.member1_id == member_id {
            Some(self.member2_id)
        } else if self.member2_id == member_id {
            Some(self.member1_id)
        } else {
            None
        }
    }

    pub fn partner_ids(&self) -> [MemberId; 2] {
        [self.member1_id, self.member2_id]
    }

    pub fn has_child(&self, member_id: MemberId) -> bool {
        self.children_ids.contains(&member_id)
    }

    /// Number of partners this union shares with `other`, each counted once.
    pub fn shared_partner_count(&self, other: &Union) -> usize {
        let mine = self.distinct_partners();
        let theirs = other.distinct_partners();
        mine.iter().filter(|id| theirs.contains(id)).count()
    }

    fn distinct_partners(&self) -> Vec<MemberId> {
        if self.member1_id == self.member2_id {
            vec![self.member1_id]
        } else {
            vec![self.member1_id, self.member2_id]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Union;

    #[test]
    fn partner_of_is_symmetric() {
        let union = Union::new(3, 1, 2);
        assert_eq!(union.partner_of(1), Some(2));
        assert_eq!(union.partner_of(2), Some(1));
        assert_eq!(union.partner_of(9), None);
    }

    #[test]
    fn shared_partner_count_counts_distinct_members() {
        let first = Union::new(10, 1, 2);
        let remarriage = Union::new(11, 1, 5);
        let same_pair = Union::new(12, 2, 1);
        assert_eq!(first.shared_partner_count(&remarriage), 1);
        assert_eq!(first.shared_partner_count(&same_pair), 2);
        assert_eq!(first.shared_partner_count(&Union::new(13, 7, 8)), 0);
    }
}
