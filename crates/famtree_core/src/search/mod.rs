//! Indexless member and union search.
//!
//! # Responsibility
//! - Match queries against composed display names and selected member fields.
//! - Provide suggestion and highlight helpers for search boxes.
//!
//! # Invariants
//! - Matching is case-insensitive.
//! - A blank query returns the input collection unchanged (no limit applied).
//! - A zero result limit falls back to the default limit.
//! - Result order follows input order.

pub mod member_search;
pub mod text;
