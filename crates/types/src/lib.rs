//! Shared type definitions for the fleetdeck configuration engine.
//!
//! The types here describe the three schema-driven surfaces of the dashboard:
//! provider credential capture, recurring-schedule configuration, and dynamic
//! per-task input binding. They are consumed by the registry (catalog), the
//! engine (materialization, validation, assembly), the API client, and the
//! terminal shell.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod payload;
pub mod schedule;

pub use payload::{ConversationTemplate, CredentialPayload, InputData, ScheduledTaskPayload};
pub use schedule::{Schedule, ScheduleConfig, ScheduleError, ScheduleType};

/// Mutable, dialog-scoped mapping of field name to the current user-entered
/// value.
///
/// Values are uninterpreted text until validated at submission time. For
/// file-kind fields the entry holds the selected file's path. Insertion order
/// follows the owning schema's field order and is preserved on the wire.
pub type ValueMap = IndexMap<String, String>;

/// A task's execution configuration as read from the backend.
///
/// The engine treats the object as opaque: only its key set (plus values for
/// default-seeding) drives dynamic field materialization.
pub type ExecutionConfig = IndexMap<String, Value>;

/// Represents the value type of a configurable field.
///
/// The validator and the sensitive-value presenter switch exhaustively on
/// this; new field types are added as variants, not as ad hoc string checks.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form single-line text
    #[default]
    Text,
    /// Email address, shape-checked before submission
    Email,
    /// Secret text, masked by default when displayed
    Password,
    /// File selection; the value map carries the chosen path
    File,
}

/// Describes one configurable value within a provider schema.
///
/// Field schemas are immutable: defined once per provider kind in the
/// catalog and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, unique within its schema; doubles as the wire key
    pub name: String,
    /// Human-readable label rendered next to the input
    pub label: String,
    /// Value type driving validation and presentation
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    /// Whether a value must be supplied before submission
    #[serde(default)]
    pub required: bool,
    /// Whether the value is masked by default when displayed
    #[serde(default)]
    pub sensitive: bool,
    /// Optional placeholder shown while the field is empty
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Optional help copy shown beneath the field
    #[serde(default)]
    pub description: Option<String>,
}

/// Static catalog entry describing one credential provider kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchema {
    /// Unique provider key (e.g., "github")
    pub kind: String,
    /// Name rendered in pickers and tables
    pub display_name: String,
    /// Ordered field list; order is the canonical display and serialization
    /// order and must be preserved by every consumer
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl ProviderSchema {
    /// Returns the field schema with the given name, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the declared field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// Side effects that can be triggered by engine state changes.
///
/// Effects are applied by the hosting shell; the engine never touches the
/// clipboard or any other ambient resource directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request to write the given text to the system clipboard
    CopyToClipboardRequested(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_schema_round_trip_minimal() {
        let json = r#"{
            "kind": "github",
            "display_name": "GitHub",
            "fields": [
                { "name": "access_token", "label": "Access Token", "type": "password", "required": true, "sensitive": true }
            ]
        }"#;

        let schema: ProviderSchema = serde_json::from_str(json).expect("deserialize ProviderSchema");
        assert_eq!(schema.kind, "github");
        assert_eq!(schema.display_name, "GitHub");
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].kind, FieldKind::Password);
        assert!(schema.fields[0].required);
        assert!(schema.fields[0].sensitive);

        let back = serde_json::to_string(&schema).expect("serialize ProviderSchema");
        let schema2: ProviderSchema = serde_json::from_str(&back).expect("round-trip deserialize");
        assert_eq!(schema2, schema);
    }

    #[test]
    fn field_schema_defaults() {
        let json = r#"{
            "name": "organization",
            "label": "Organization"
        }"#;
        let field: FieldSchema = serde_json::from_str(json).expect("deserialize FieldSchema");
        assert_eq!(field.name, "organization");
        assert_eq!(field.kind, FieldKind::Text);
        assert!(!field.required);
        assert!(!field.sensitive);
        assert!(field.placeholder.is_none());
        assert!(field.description.is_none());
    }

    #[test]
    fn field_kind_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&FieldKind::Email).unwrap(), r#""email""#);
        assert_eq!(serde_json::to_string(&FieldKind::File).unwrap(), r#""file""#);
        let kind: FieldKind = serde_json::from_str(r#""password""#).unwrap();
        assert_eq!(kind, FieldKind::Password);
    }

    #[test]
    fn provider_schema_field_lookup_preserves_order() {
        let yaml = r#"
kind: smtp
display_name: SMTP
fields:
  - { name: host, label: Host, required: true }
  - { name: username, label: Username, required: true }
  - { name: password, label: Password, type: password, required: true, sensitive: true }
"#;
        let schema: ProviderSchema = serde_yaml::from_str(yaml).expect("deserialize from yaml");
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["host", "username", "password"]);
        assert!(schema.field("password").is_some_and(|f| f.sensitive));
        assert!(schema.field("missing").is_none());
    }
}
