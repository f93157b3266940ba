//! Dynamic field materialization.
//!
//! Materialization turns a schema (or a task-declared key set) plus an
//! optional existing record into the editable value map a dialog owns.
//! Both functions are pure and are invoked exactly once per "schema
//! changed" event; the previous map is replaced wholesale, never merged, so
//! stale keys from an earlier selection can never leak into a submission.

use fleetdeck_types::{ExecutionConfig, ProviderSchema, ValueMap};
use serde_json::Value;

/// Builds the editable value map for a provider schema, seeded from an
/// existing record when editing.
///
/// The resulting map carries exactly the schema's field names, in schema
/// field order. A record missing a declared field seeds that field with an
/// empty string; read-side malformation is never a hard failure.
pub fn materialize(schema: &ProviderSchema, existing: Option<&ExecutionConfig>) -> ValueMap {
    schema
        .fields
        .iter()
        .map(|field| (field.name.clone(), seed_value(existing, &field.name)))
        .collect()
}

/// Builds the editable value map for a task-declared key set.
///
/// No type or required metadata is attached; every key present is treated
/// as required, since the task declared it as needed. The map's key set
/// equals `keys` exactly, regardless of the existing record's shape.
pub fn materialize_from_keys(keys: &[String], existing: Option<&ExecutionConfig>) -> ValueMap {
    keys.iter()
        .map(|key| (key.clone(), seed_value(existing, key)))
        .collect()
}

/// Seeds one field from an existing record.
///
/// Strings seed verbatim; numbers and booleans seed their display form;
/// null, objects, and arrays seed empty.
fn seed_value(existing: Option<&ExecutionConfig>, name: &str) -> String {
    match existing.and_then(|record| record.get(name)) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(boolean)) => boolean.to_string(),
        _ => String::new(),
    }
}
