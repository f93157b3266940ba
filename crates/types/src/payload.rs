//! Wire payload shapes produced by the submission assembler.
//!
//! Field names on these structs are part of the backend contract. Optional
//! keys are omitted when absent, never serialized as null, and consumers
//! must tolerate absent optional keys on read.

use serde::{Deserialize, Serialize};

use crate::{
    ValueMap,
    schedule::{ScheduleConfig, ScheduleType},
};

/// Credential create payload for `POST /credentials`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Provider kind from the registry catalog
    pub provider: String,
    /// Operator-chosen display name for the stored credential
    pub name: String,
    /// Field values keyed by field name, in schema field order
    pub credential: ValueMap,
}

/// Scheduled task create payload for `POST /scheduled-tasks`.
///
/// Exactly one of `task_id` + structured inputs or a free-form message is
/// carried; the engine's validator enforces the exclusivity before assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTaskPayload {
    pub agent_id: String,
    pub workspace_id: String,
    /// Present only when the run is driven by a task's declared inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub name: String,
    pub description: String,
    pub schedule_type: ScheduleType,
    pub schedule_config: ScheduleConfig,
    pub auto_create_conversation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_template: Option<ConversationTemplate>,
}

/// Seed payload carried by a scheduled run that opens a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTemplate {
    pub input_data: InputData,
}

/// Either task-driven structured inputs or a free-form message.
///
/// On the wire both forms are plain objects; the `message` form is matched
/// first so a bare `{ "message": ... }` object is never misread as a
/// single-field input map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputData {
    Message { message: String },
    Fields(ValueMap),
}
