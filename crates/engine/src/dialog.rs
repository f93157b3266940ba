//! Dialog-scoped draft state and async guards.
//!
//! Every open dialog owns its draft exclusively for its lifetime: one value
//! map, one submission gate. Nothing here is shared across dialog
//! instances, and a closed dialog's draft is simply dropped. The only
//! asynchronous boundary, fetching a task's declared input keys, is
//! guarded by a generation stamp so a stale response is discarded instead
//! of silently applied.

use fleetdeck_types::{ExecutionConfig, ValueMap};
use tracing::debug;

use crate::materialize::materialize_from_keys;

/// Whether the dialog currently has a submission outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

/// Draft owned by one open dialog: the editable values plus the
/// single-in-flight submission gate.
#[derive(Debug, Default)]
pub struct DialogDraft {
    values: ValueMap,
    submission: SubmissionState,
}

impl DialogDraft {
    /// Opens a dialog over an already-materialized value map.
    pub fn open(values: ValueMap) -> Self {
        Self {
            values,
            submission: SubmissionState::Idle,
        }
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Records one field edit. Unknown names are ignored; the key set is
    /// fixed at materialization time.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value.into();
        }
    }

    /// Replaces the draft wholesale after a schema or selection switch.
    /// The previous map is discarded, never merged.
    pub fn replace_values(&mut self, values: ValueMap) {
        self.values = values;
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::InFlight
    }

    /// Claims the submission gate. Returns false while a submission is
    /// already outstanding; the caller disables the action in that case.
    pub fn begin_submission(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.submission = SubmissionState::InFlight;
        true
    }

    /// Releases the gate after a failed submission. The draft values are
    /// kept intact so the operator can retry without re-entering data.
    pub fn submission_failed(&mut self) {
        self.submission = SubmissionState::Idle;
    }

    /// Consumes the dialog after a successful submission.
    pub fn submission_succeeded(self) {}
}

/// Stamp identifying one in-flight key-fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    task_id: String,
    generation: u64,
}

impl FetchTicket {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Tracks the currently selected task and stamps key-fetch requests so a
/// response is only ever applied to the selection it was issued for.
#[derive(Debug, Default)]
pub struct TaskSelection {
    current: Option<String>,
    generation: u64,
}

impl TaskSelection {
    /// Switches the selection and issues a ticket for the key fetch. Any
    /// ticket from an earlier selection is dead from this point on.
    pub fn select(&mut self, task_id: &str) -> FetchTicket {
        self.generation += 1;
        self.current = Some(task_id.to_string());
        FetchTicket {
            task_id: task_id.to_string(),
            generation: self.generation,
        }
    }

    /// Clears the selection (switching to free-form message mode).
    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether a response stamped with this ticket belongs to the current
    /// selection.
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.current.as_deref() == Some(ticket.task_id.as_str())
    }

    /// Materializes the fetched execution configuration, or discards it
    /// when the selection moved on while the request was in flight.
    pub fn apply(&self, ticket: &FetchTicket, config: &ExecutionConfig) -> Option<ValueMap> {
        if !self.accepts(ticket) {
            debug!(task_id = %ticket.task_id, "discarding stale execution-config response");
            return None;
        }
        let keys: Vec<String> = config.keys().cloned().collect();
        Some(materialize_from_keys(&keys, Some(config)))
    }
}
