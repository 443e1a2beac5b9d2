//! JSON import/export of family documents.
//!
//! # Responsibility
//! - Render the current document as pretty-printed JSON.
//! - Validate imported text before it reaches the migration engine.
//!
//! # Invariants
//! - Export always writes the current two-collection shape.
//! - Import accepts both the current and the legacy shape; partially invalid
//!   member lists are accepted with the invalid entries skipped.

use crate::migration::{classify_document, entity_id, migrate_document, DocumentShape};
use crate::model::document::FamilyDocument;
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Import/export failure.
#[derive(Debug)]
pub enum TransferError {
    /// Input is not JSON.
    Parse(serde_json::Error),
    /// Document could not be encoded.
    Serialize(serde_json::Error),
    /// JSON is neither a member array nor a `{members, unions}` object.
    UnrecognizedShape,
    /// Member entries exist but none carries a positive numeric `id`,
    /// `firstName` and `lastName`.
    NoValidMembers { total: usize },
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "file is not valid JSON: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode family document: {err}"),
            Self::UnrecognizedShape => write!(
                f,
                "JSON must be an array of members or an object with `members` and `unions`"
            ),
            Self::NoValidMembers { total } => {
                write!(f, "no valid members found among {total} entries")
            }
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Serialize(err) => Some(err),
            Self::UnrecognizedShape | Self::NoValidMembers { .. } => None,
        }
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub document: FamilyDocument,
    pub shape: DocumentShape,
    /// Member entries dropped by validation.
    pub skipped_members: usize,
}

/// Pretty-printed JSON of the current document shape.
pub fn export_json(document: &FamilyDocument) -> Result<String, TransferError> {
    serde_json::to_string_pretty(document).map_err(TransferError::Serialize)
}

/// Parses, validates and migrates imported JSON text.
pub fn import_json(text: &str) -> Result<ImportReport, TransferError> {
    let raw: Value = serde_json::from_str(text).map_err(TransferError::Parse)?;
    let shape = classify_document(&raw);

    let (validated, total, skipped) = match (shape, raw) {
        (DocumentShape::Legacy, Value::Array(entries)) => {
            let (kept, total, skipped) = keep_valid_members(entries);
            (Value::Array(kept), total, skipped)
        }
        (DocumentShape::Current, Value::Object(mut map)) => {
            let entries = match map.remove("members") {
                Some(Value::Array(entries)) => entries,
                _ => Vec::new(),
            };
            let (kept, total, skipped) = keep_valid_members(entries);
            map.insert("members".to_string(), Value::Array(kept));
            (Value::Object(map), total, skipped)
        }
        _ => return Err(TransferError::UnrecognizedShape),
    };

    if total > 0 && skipped == total {
        return Err(TransferError::NoValidMembers { total });
    }
    if skipped > 0 {
        warn!(
            "event=document_import module=transfer status=partial skipped_members={skipped} total_members={total}"
        );
    }

    let document = migrate_document(&validated);
    info!(
        "event=document_import module=transfer status=ok shape={} members={} unions={}",
        shape.as_str(),
        document.members.len(),
        document.unions.len()
    );

    Ok(ImportReport {
        document,
        shape,
        skipped_members: skipped,
    })
}

fn keep_valid_members(entries: Vec<Value>) -> (Vec<Value>, usize, usize) {
    let total = entries.len();
    let kept: Vec<Value> = entries.into_iter().filter(is_valid_member).collect();
    let skipped = total - kept.len();
    (kept, total, skipped)
}

fn is_valid_member(entry: &Value) -> bool {
    entry
        .get("id")
        .filter(|id| id.is_number())
        .and_then(entity_id)
        .is_some()
        && entry.get("firstName").is_some_and(Value::is_string)
        && entry.get("lastName").is_some_and(Value::is_string)
}

#[cfg(test)]
mod tests {
    use super::is_valid_member;
    use serde_json::json;

    #[test]
    fn member_validation_requires_core_fields() {
        assert!(is_valid_member(&json!({"id": 1, "firstName": "A", "lastName": "B"})));
        assert!(!is_valid_member(&json!({"id": "1", "firstName": "A", "lastName": "B"})));
        assert!(!is_valid_member(&json!({"id": 0, "firstName": "A", "lastName": "B"})));
        assert!(!is_valid_member(&json!({"id": -1, "firstName": "A", "lastName": "B"})));
        assert!(!is_valid_member(&json!({"id": 1.5, "firstName": "A", "lastName": "B"})));
        assert!(!is_valid_member(&json!({"id": 1, "firstName": "A"})));
        assert!(!is_valid_member(&json!("member")));
    }
}
