//! Submission payload assembly.
//!
//! Pure composition over already-validated inputs. The assembler performs
//! no validation of its own: [`ValidatedValues`] is the proof that the
//! per-field walk ran, and the only checks here enforce the wire contract
//! that a payload never carries keys the active schema did not declare.

use fleetdeck_types::{
    ConversationTemplate, CredentialPayload, InputData, ProviderSchema, Schedule, ScheduledTaskPayload, ValueMap,
};
use thiserror::Error;

use crate::validate::{RunTarget, ValidatedValues};

/// Errors raised when validated input does not line up with the schema it
/// claims to satisfy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("value for '{name}' is not declared by the '{kind}' schema")]
    UndeclaredField { kind: String, name: String },

    #[error("'{kind}' schema field '{name}' is missing from the validated values")]
    MissingField { kind: String, name: String },
}

/// Composes the credential create payload.
///
/// The emitted value map carries exactly the schema's fields, re-ordered
/// into schema field order regardless of how the validated map was built.
pub fn credential_payload(
    schema: &ProviderSchema,
    display_name: &str,
    values: ValidatedValues,
) -> Result<CredentialPayload, AssemblyError> {
    let values = values.into_inner();

    if let Some(extra) = values.keys().find(|name| schema.field(name).is_none()) {
        return Err(AssemblyError::UndeclaredField {
            kind: schema.kind.clone(),
            name: extra.clone(),
        });
    }

    let mut credential = ValueMap::new();
    for field in &schema.fields {
        let value = values.get(&field.name).ok_or_else(|| AssemblyError::MissingField {
            kind: schema.kind.clone(),
            name: field.name.clone(),
        })?;
        credential.insert(field.name.clone(), value.clone());
    }

    Ok(CredentialPayload {
        provider: schema.kind.clone(),
        name: display_name.to_string(),
        credential,
    })
}

/// Composes the scheduled-task create payload.
///
/// The [`RunTarget`] decides the conversation template: a task reference
/// carries its validated dynamic inputs, a free-form message carries the
/// message object, and the two can never coexist by construction.
pub fn scheduled_task_payload(
    agent_id: &str,
    workspace_id: &str,
    name: &str,
    description: &str,
    schedule: &Schedule,
    auto_create_conversation: bool,
    target: RunTarget,
) -> ScheduledTaskPayload {
    let (task_id, input_data) = match target {
        RunTarget::Task { task_id, inputs } => (Some(task_id), InputData::Fields(inputs.into_inner())),
        RunTarget::Message(message) => (None, InputData::Message { message }),
    };

    ScheduledTaskPayload {
        agent_id: agent_id.to_string(),
        workspace_id: workspace_id.to_string(),
        task_id,
        name: name.to_string(),
        description: description.to_string(),
        schedule_type: schedule.schedule_type(),
        schedule_config: schedule.to_wire(),
        auto_create_conversation,
        conversation_template: Some(ConversationTemplate { input_data }),
    }
}
