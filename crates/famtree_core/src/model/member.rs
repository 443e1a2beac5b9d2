//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical person record of a family document.
//! - Compose display names from name parts.
//!
//! # Invariants
//! - `id` is positive and unique across members and unions.
//! - `parent_union_id` is derived from union child lists and is rebuilt by
//!   the reconcile pass after every mutation.

use super::{MemberId, UnionId};
use serde::{Deserialize, Serialize};

/// Recorded gender of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Parses the persisted lowercase label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// One person in the family document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    #[serde(default)]
    pub first_name: String,
    /// Ordered, possibly empty.
    #[serde(default)]
    pub middle_names: Vec<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default = "default_is_alive")]
    pub is_alive: bool,
    /// Back-reference to the union listing this member as a child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_union_id: Option<UnionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_is_alive() -> bool {
    true
}

/// Which optional name parts [`Member::full_name`] includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameOptions {
    pub include_middle_names: bool,
    pub include_maiden_name: bool,
}

impl NameOptions {
    /// First and last name only.
    pub const SHORT: Self = Self {
        include_middle_names: false,
        include_maiden_name: false,
    };

    /// Every name part, maiden name rendered as `(b. Name)`.
    pub const FULL: Self = Self {
        include_middle_names: true,
        include_maiden_name: true,
    };
}

impl Member {
    /// Creates a living member with empty optional fields.
    pub fn new(id: MemberId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            middle_names: Vec::new(),
            last_name: last_name.into(),
            maiden_name: None,
            birth_date: None,
            birth_place: None,
            death_date: None,
            death_place: None,
            gender: Gender::default(),
            is_alive: true,
            parent_union_id: None,
            photo_url: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Composes a display name from the parts selected by `options`.
    ///
    /// Blank parts are skipped, so a member without a last name renders as
    /// the first name alone.
    pub fn full_name(&self, options: NameOptions) -> String {
        let mut parts: Vec<String> = vec![self.first_name.clone()];
        if options.include_middle_names {
            parts.extend(self.middle_names.iter().cloned());
        }
        if !self.last_name.is_empty() {
            parts.push(self.last_name.clone());
        }
        if options.include_maiden_name {
            if let Some(maiden) = self.maiden_name.as_deref().filter(|name| !name.is_empty()) {
                parts.push(format!("(b. {maiden})"));
            }
        }
        parts
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First, middle and last names without blank filtering.
    pub fn full_name_with_middle(&self) -> String {
        if self.middle_names.is_empty() {
            return format!("{} {}", self.first_name, self.last_name);
        }
        format!(
            "{} {} {}",
            self.first_name,
            self.middle_names.join(" "),
            self.last_name
        )
    }

    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Uppercased first letters of first and last name.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn has_complete_name(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }

    /// `Living` or `Deceased`.
    pub fn status_text(&self) -> &'static str {
        if self.is_alive {
            "Living"
        } else {
            "Deceased"
        }
    }
}
