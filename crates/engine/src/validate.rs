//! Field and form validation.
//!
//! Validation walks a field list (or a task-declared key set) against a
//! value map and produces either a proof token the submission assembler
//! accepts, or a map of per-field reasons rendered inline next to the
//! offending inputs. Everything here runs locally, before any network call.

use fleetdeck_types::{FieldKind, FieldSchema, ValueMap};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Conservative email shape: one `@`, at least one `.` after it, no
/// embedded whitespace. Deliverability is the backend's problem.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@]+)+$").unwrap());

/// Per-field error reasons keyed by field name, in walk order.
pub type FieldErrors = IndexMap<String, String>;

/// A value map that passed validation.
///
/// Only this module can construct one, which keeps the submission assembler
/// incapable of serializing unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedValues(ValueMap);

impl ValidatedValues {
    pub fn as_map(&self) -> &ValueMap {
        &self.0
    }

    pub fn into_inner(self) -> ValueMap {
        self.0
    }
}

/// The run target of a scheduled task, proven mutually exclusive.
///
/// Produced by [`validate_run_target`]; exactly one of a task reference
/// with validated dynamic inputs, or a non-blank free-form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    Task { task_id: String, inputs: ValidatedValues },
    Message(String),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Walks a schema's field list against a value map.
///
/// A required field with an absent or blank value records
/// `"<label> is required"`. A present email-kind value that fails the shape
/// check records `"invalid email"`. File-kind fields are checked for
/// presence only.
pub fn validate_fields(fields: &[FieldSchema], values: &ValueMap) -> Result<ValidatedValues, FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in fields {
        let value = values.get(&field.name).map(String::as_str).unwrap_or_default();
        if field.required && is_blank(value) {
            errors.insert(field.name.clone(), format!("{} is required", field.label));
            continue;
        }
        match field.kind {
            FieldKind::Email => {
                if !is_blank(value) && !EMAIL_SHAPE.is_match(value.trim()) {
                    errors.insert(field.name.clone(), "invalid email".to_string());
                }
            }
            FieldKind::Text | FieldKind::Password | FieldKind::File => {}
        }
    }

    if errors.is_empty() {
        Ok(ValidatedValues(values.clone()))
    } else {
        Err(errors)
    }
}

/// Validates the schema-level display name.
///
/// The name lives outside the per-provider field list but is always
/// required, exactly like a required text field.
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if is_blank(name) {
        Err("Name is required".to_string())
    } else {
        Ok(())
    }
}

/// Validates a task-declared key set: every key must have a non-blank
/// value. No type-specific checks apply, since task-declared keys carry no
/// type metadata.
pub fn validate_required_keys(keys: &[String], values: &ValueMap) -> Result<ValidatedValues, FieldErrors> {
    let mut errors = FieldErrors::new();
    for key in keys {
        let value = values.get(key).map(String::as_str).unwrap_or_default();
        if is_blank(value) {
            errors.insert(key.clone(), format!("{} is required", key));
        }
    }

    if errors.is_empty() {
        Ok(ValidatedValues(values.clone()))
    } else {
        Err(errors)
    }
}

/// Cross-field rule for a scheduled-task submission.
///
/// Exactly one of `{task selected and all dynamic inputs valid}` or
/// `{no task and message non-blank}` must hold. Selecting a task clears the
/// free-form message requirement and vice versa; the message is ignored
/// entirely while a task is selected.
pub fn validate_run_target(
    task_id: Option<&str>,
    keys: &[String],
    values: &ValueMap,
    message: &str,
) -> Result<RunTarget, FieldErrors> {
    match task_id {
        Some(task_id) => {
            let inputs = validate_required_keys(keys, values)?;
            Ok(RunTarget::Task {
                task_id: task_id.to_string(),
                inputs,
            })
        }
        None => {
            if is_blank(message) {
                let mut errors = FieldErrors::new();
                errors.insert("message".to_string(), "Message is required".to_string());
                Err(errors)
            } else {
                Ok(RunTarget::Message(message.to_string()))
            }
        }
    }
}
