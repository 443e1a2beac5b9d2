//! Family domain model.
//!
//! # Responsibility
//! - Define the canonical member/union records and the document that owns them.
//! - Provide name composition helpers shared by search and display callers.
//!
//! # Invariants
//! - Members and unions share one id space; an id is never used by both.
//! - Unions are the only carrier of parent-child edges.
//!
//! # See also
//! - migration::reconcile for the `parent_union_id` rebuild rule.

pub mod document;
pub mod draft;
pub mod member;
pub mod union;

use chrono::{SecondsFormat, Utc};

/// Identifier shared by members and unions.
pub type EntityId = u64;

/// Member identifier. Same id space as [`UnionId`].
pub type MemberId = EntityId;

/// Union identifier. Same id space as [`MemberId`].
pub type UnionId = EntityId;

/// Largest accepted id: the biggest integer a JSON number read as a double
/// holds exactly.
pub const MAX_ENTITY_ID: EntityId = 9_007_199_254_740_991;

/// Returns the current UTC time in the persisted timestamp format
/// (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::now_timestamp;

    #[test]
    fn timestamp_uses_millis_and_zulu_suffix() {
        let stamp = now_timestamp();
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2024-01-01T00:00:00.000Z".len());
    }
}
