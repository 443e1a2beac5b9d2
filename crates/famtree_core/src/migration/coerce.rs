//! Value-level coercion of loosely typed member/union entries.
//!
//! Each entry is repaired in JSON form (wrong-typed fields removed so serde
//! defaults apply) before being deserialized into the typed model.

use crate::model::member::Gender;
use crate::model::{EntityId, MAX_ENTITY_ID};
use serde_json::{Map, Value};

const LEGACY_MEMBER_KEYS: &[&str] = &[
    "parent1Id",
    "parent2Id",
    "parentUnionId",
    "spouseIds",
    "childrenIds",
    "unions",
];

const MEMBER_TEXT_KEYS: &[&str] = &[
    "firstName",
    "lastName",
    "maidenName",
    "birthDate",
    "birthPlace",
    "deathDate",
    "deathPlace",
    "photoUrl",
    "notes",
    "createdAt",
    "updatedAt",
];

const UNION_TEXT_KEYS: &[&str] = &[
    "marriageDate",
    "marriagePlace",
    "divorceDate",
    "divorcePlace",
];

/// Reads an id in `1..=MAX_ENTITY_ID` from a number or a numeric string.
pub(crate) fn entity_id(value: &Value) -> Option<EntityId> {
    let id = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && *float > 0.0 && *float < u64::MAX as f64)
                .map(|float| float as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (id > 0 && id <= MAX_ENTITY_ID).then_some(id)
}

/// Repairs one member entry; `None` when it has no usable id.
pub(super) fn normalize_member_value(raw: &Value) -> Option<Value> {
    let source = raw.as_object()?;
    let id = source.get("id").and_then(entity_id)?;
    let mut map = source.clone();
    map.insert("id".to_string(), Value::from(id));

    for key in LEGACY_MEMBER_KEYS {
        map.remove(*key);
    }

    let middle_names = match map.get("middleNames") {
        Some(Value::Array(names)) => names
            .iter()
            .filter(|name| name.is_string())
            .cloned()
            .collect(),
        _ => Vec::new(),
    };
    map.insert("middleNames".to_string(), Value::Array(middle_names));

    drop_non_strings(&mut map, MEMBER_TEXT_KEYS);

    let gender = map
        .get("gender")
        .and_then(Value::as_str)
        .and_then(Gender::parse)
        .unwrap_or_default();
    map.insert("gender".to_string(), Value::from(gender.as_str()));

    if !map.get("isAlive").is_some_and(Value::is_boolean) {
        map.remove("isAlive");
    }

    Some(Value::Object(map))
}

/// Repairs one union entry; `None` when it has no usable id.
pub(super) fn normalize_union_value(raw: &Value) -> Option<Value> {
    let source = raw.as_object()?;
    let id = source.get("id").and_then(entity_id)?;
    let mut map = source.clone();
    map.insert("id".to_string(), Value::from(id));

    for key in ["member1Id", "member2Id"] {
        match map.get(key).and_then(entity_id) {
            Some(member_id) => {
                map.insert(key.to_string(), Value::from(member_id));
            }
            None => {
                map.remove(key);
            }
        }
    }

    let children_ids: Vec<Value> = match map.get("childrenIds") {
        Some(Value::Array(ids)) => ids.iter().filter_map(entity_id).map(Value::from).collect(),
        _ => Vec::new(),
    };
    map.insert("childrenIds".to_string(), Value::Array(children_ids));

    drop_non_strings(&mut map, UNION_TEXT_KEYS);

    Some(Value::Object(map))
}

fn drop_non_strings(map: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if map.get(*key).is_some_and(|value| !value.is_string()) {
            map.remove(*key);
        }
    }
}
