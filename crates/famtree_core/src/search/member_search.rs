//! Name and field search over members and unions.

use super::text::fuzzy_search;
use crate::model::member::{Member, NameOptions};
use crate::model::union::Union;
use crate::model::EntityId;

const DEFAULT_RESULT_LIMIT: usize = 10;
const DEFAULT_SUGGESTION_LIMIT: usize = 5;
const MIN_SUGGESTED_PART_CHARS: usize = 3;

/// Options for [`search_members`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSearchOptions {
    pub exclude_ids: Vec<EntityId>,
    /// Maximum number of hits; `0` means the default of 10.
    pub limit: usize,
    pub include_middle_names: bool,
    pub include_maiden_name: bool,
}

impl Default for MemberSearchOptions {
    fn default() -> Self {
        Self {
            exclude_ids: Vec::new(),
            limit: DEFAULT_RESULT_LIMIT,
            include_middle_names: false,
            include_maiden_name: false,
        }
    }
}

/// Options for [`search_unions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionSearchOptions {
    pub exclude_ids: Vec<EntityId>,
    pub limit: usize,
}

impl Default for UnionSearchOptions {
    fn default() -> Self {
        Self {
            exclude_ids: Vec::new(),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// Member field consulted by [`advanced_member_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Full name including middle and maiden names.
    Name,
    BirthPlace,
    DeathPlace,
    Notes,
}

/// Options for [`advanced_member_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedSearchOptions {
    pub exclude_ids: Vec<EntityId>,
    pub limit: usize,
    /// A member matches when any listed field matches.
    pub fields: Vec<SearchField>,
    /// Subsequence matching instead of substring matching.
    pub fuzzy: bool,
}

impl Default for AdvancedSearchOptions {
    fn default() -> Self {
        Self {
            exclude_ids: Vec::new(),
            limit: DEFAULT_RESULT_LIMIT,
            fields: vec![SearchField::Name],
            fuzzy: false,
        }
    }
}

/// Substring search over composed member names.
pub fn search_members<'a>(
    members: &'a [Member],
    query: &str,
    options: &MemberSearchOptions,
) -> Vec<&'a Member> {
    let Some(needle) = normalize_query(query) else {
        return members.iter().collect();
    };
    let name_options = NameOptions {
        include_middle_names: options.include_middle_names,
        include_maiden_name: options.include_maiden_name,
    };

    members
        .iter()
        .filter(|member| !options.exclude_ids.contains(&member.id))
        .filter(|member| {
            member
                .full_name(name_options)
                .to_lowercase()
                .contains(&needle)
        })
        .take(effective_limit(options.limit))
        .collect()
}

/// `"<partner 1> & <partner 2>"`, with `Unknown` for missing partners.
pub fn union_display_name(union: &Union, members: &[Member]) -> String {
    let name_of = |id: EntityId| {
        members
            .iter()
            .find(|member| member.id == id)
            .map(|member| member.full_name(NameOptions::SHORT))
            .unwrap_or_else(|| "Unknown".to_string())
    };
    format!("{} & {}", name_of(union.member1_id), name_of(union.member2_id))
}

/// Substring search over union display names.
pub fn search_unions<'a>(
    unions: &'a [Union],
    members: &[Member],
    query: &str,
    options: &UnionSearchOptions,
) -> Vec<&'a Union> {
    let Some(needle) = normalize_query(query) else {
        return unions.iter().collect();
    };

    unions
        .iter()
        .filter(|entry| !options.exclude_ids.contains(&entry.id))
        .filter(|entry| {
            union_display_name(entry, members)
                .to_lowercase()
                .contains(&needle)
        })
        .take(effective_limit(options.limit))
        .collect()
}

/// Searches the configured member fields with substring or fuzzy matching.
pub fn advanced_member_search<'a>(
    members: &'a [Member],
    query: &str,
    options: &AdvancedSearchOptions,
) -> Vec<&'a Member> {
    let Some(needle) = normalize_query(query) else {
        return members.iter().collect();
    };

    members
        .iter()
        .filter(|member| !options.exclude_ids.contains(&member.id))
        .filter(|member| {
            options.fields.iter().any(|field| {
                let value = field_value(member, *field).to_lowercase();
                if options.fuzzy {
                    fuzzy_search(&value, &needle)
                } else {
                    value.contains(&needle)
                }
            })
        })
        .take(effective_limit(options.limit))
        .collect()
}

/// Suggestions for a partial query: short names of matching members and
/// matching name parts longer than two characters. Deduplicated, in
/// discovery order.
pub fn search_suggestions(members: &[Member], query: &str, limit: Option<usize>) -> Vec<String> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    let limit = limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let mut suggestions: Vec<String> = Vec::new();
    let mut push_unique = |value: String| {
        if !suggestions.contains(&value) {
            suggestions.push(value);
        }
    };

    for member in members {
        let full_name = member.full_name(NameOptions::FULL).to_lowercase();
        if !full_name.contains(&needle) {
            continue;
        }
        push_unique(member.full_name(NameOptions::SHORT));
        for part in full_name.split(' ') {
            if part.contains(&needle) && part.chars().count() >= MIN_SUGGESTED_PART_CHARS {
                push_unique(part.to_string());
            }
        }
    }

    suggestions.truncate(limit);
    suggestions
}

fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_RESULT_LIMIT
    } else {
        limit
    }
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

fn field_value(member: &Member, field: SearchField) -> String {
    match field {
        SearchField::Name => member.full_name(NameOptions::FULL),
        SearchField::BirthPlace => member.birth_place.clone().unwrap_or_default(),
        SearchField::DeathPlace => member.death_place.clone().unwrap_or_default(),
        SearchField::Notes => member.notes.clone().unwrap_or_default(),
    }
}
