//! # Fleetdeck Configuration Engine
//!
//! The schema-interpretation and validation core behind the dashboard's
//! three schema-driven surfaces: provider credential capture, recurring
//! schedule configuration, and dynamic per-task input binding.
//!
//! The engine is independent of any particular form toolkit. A hosting
//! view collects raw input, the materializer exposes the editable value
//! map, the validator gates submission, and the normalizer and assembler
//! build the wire payload an external request function sends.

pub mod dialog;
pub mod materialize;
pub mod present;
pub mod schedule;
pub mod submit;
pub mod validate;

pub use dialog::{DialogDraft, FetchTicket, SubmissionState, TaskSelection};
pub use materialize::{materialize, materialize_from_keys};
pub use present::{MASK, RevealState, SensitiveValue};
pub use schedule::{ScheduleParams, from_schedule, to_schedule};
pub use submit::{AssemblyError, credential_payload, scheduled_task_payload};
pub use validate::{
    FieldErrors, RunTarget, ValidatedValues, validate_display_name, validate_fields, validate_required_keys,
    validate_run_target,
};
