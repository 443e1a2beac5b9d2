use crate::model::{EntityId, MemberId, UnionId, MAX_ENTITY_ID};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejections raised by the integrity maintainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// Ids are positive and at most `MAX_ENTITY_ID`.
    InvalidId(EntityId),
    /// The largest stored id already sits at `MAX_ENTITY_ID`.
    IdsExhausted,
    /// The id is already used by the other collection.
    IdConflict(EntityId),
    /// Both partner slots name the same member.
    SelfUnion {
        union_id: UnionId,
        member_id: MemberId,
    },
    /// A partner is also listed among the union's children.
    PartnerListedAsChild {
        union_id: UnionId,
        member_id: MemberId,
    },
    /// The requested parent union has this member as a partner.
    MemberIsPartnerOfParentUnion {
        member_id: MemberId,
        union_id: UnionId,
    },
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "invalid entity id: {id}"),
            Self::IdsExhausted => write!(f, "no free entity id left up to {MAX_ENTITY_ID}"),
            Self::IdConflict(id) => write!(f, "id {id} is already used by another entity kind"),
            Self::SelfUnion {
                union_id,
                member_id,
            } => write!(
                f,
                "union {union_id} cannot pair member {member_id} with itself"
            ),
            Self::PartnerListedAsChild {
                union_id,
                member_id,
            } => write!(
                f,
                "union {union_id} lists its partner {member_id} as a child"
            ),
            Self::MemberIsPartnerOfParentUnion {
                member_id,
                union_id,
            } => write!(
                f,
                "member {member_id} cannot be a child of union {union_id} it is a partner of"
            ),
            Self::InconsistentState(details) => write!(f, "inconsistent family state: {details}"),
        }
    }
}

impl Error for IntegrityError {}
