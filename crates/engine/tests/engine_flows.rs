//! End-to-end engine flows: materialize, validate, normalize, assemble.

use fleetdeck_engine::{
    DialogDraft, ScheduleParams, TaskSelection, credential_payload, materialize, scheduled_task_payload, to_schedule,
    validate_display_name, validate_fields, validate_run_target,
};
use fleetdeck_types::{ExecutionConfig, ProviderSchema, ScheduleType};
use serde_json::json;

fn schema(value: serde_json::Value) -> ProviderSchema {
    serde_json::from_value(value).expect("valid provider schema")
}

fn config(value: serde_json::Value) -> ExecutionConfig {
    serde_json::from_value(value).expect("config is an object")
}

#[test]
fn credential_dialog_flow_from_open_to_payload() {
    let schema = schema(json!({
        "kind": "openai",
        "display_name": "OpenAI",
        "fields": [
            { "name": "api_key", "label": "API Key", "type": "password", "required": true, "sensitive": true },
            { "name": "organization", "label": "Organization ID", "required": false }
        ]
    }));

    let mut draft = DialogDraft::open(materialize(&schema, None));
    draft.set_value("api_key", "sk-test");

    validate_display_name("Team key").expect("name present");
    let validated = validate_fields(&schema.fields, draft.values()).expect("required field filled");

    assert!(draft.begin_submission());
    let payload = credential_payload(&schema, "Team key", validated).expect("assembly succeeds");

    let wire = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(
        wire,
        json!({
            "provider": "openai",
            "name": "Team key",
            "credential": { "api_key": "sk-test", "organization": "" }
        })
    );
    draft.submission_succeeded();
}

#[test]
fn task_switch_rebuilds_the_key_set_and_revalidates() {
    // Scenario: a task declaring ["topic", "tone"] is selected and only
    // "topic" gets filled; submission must block on "tone". Switching to a
    // task declaring ["url"] must clear both prior keys and require "url".
    let mut selection = TaskSelection::default();

    let ticket = selection.select("task-writing");
    let writing_config = config(json!({ "topic": "", "tone": "" }));
    let values = selection.apply(&ticket, &writing_config).expect("response is current");
    let mut draft = DialogDraft::open(values);
    draft.set_value("topic", "rust");

    let keys: Vec<String> = writing_config.keys().cloned().collect();
    let errors =
        validate_run_target(selection.current(), &keys, draft.values(), "").expect_err("tone still missing");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["tone"], "tone is required");

    // Switch tasks; the old draft is replaced wholesale.
    let ticket = selection.select("task-crawl");
    let crawl_config = config(json!({ "url": "" }));
    draft.replace_values(selection.apply(&ticket, &crawl_config).expect("response is current"));

    assert!(!draft.values().contains_key("topic"));
    assert!(!draft.values().contains_key("tone"));

    let keys: Vec<String> = crawl_config.keys().cloned().collect();
    let errors = validate_run_target(selection.current(), &keys, draft.values(), "").expect_err("url required");
    assert_eq!(errors["url"], "url is required");

    draft.set_value("url", "https://example.com");
    let target =
        validate_run_target(selection.current(), &keys, draft.values(), "").expect("crawl inputs complete");

    let schedule = to_schedule(
        ScheduleType::Weekly,
        &ScheduleParams {
            time: Some("09:00".to_string()),
            day_of_week: Some(1),
            // Residue from an earlier monthly draft; must not survive.
            day_of_month: Some(31),
            ..ScheduleParams::default()
        },
    )
    .expect("weekly normalizes");

    let payload = scheduled_task_payload("agent-1", "ws-1", "Crawl", "", &schedule, true, target);
    let wire = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(wire["task_id"], "task-crawl");
    assert_eq!(wire["schedule_config"], json!({ "time": "09:00", "day_of_week": 1 }));
    assert_eq!(
        wire["conversation_template"]["input_data"],
        json!({ "url": "https://example.com" })
    );
}

#[test]
fn free_form_message_flow_skips_dynamic_inputs() {
    let selection = TaskSelection::default();
    let target = validate_run_target(selection.current(), &[], &Default::default(), "Summarize the inbox")
        .expect("message target valid");

    let schedule = to_schedule(
        ScheduleType::Daily,
        &ScheduleParams {
            time: Some("7:15".to_string()),
            ..ScheduleParams::default()
        },
    )
    .expect("daily normalizes");

    let payload = scheduled_task_payload("agent-2", "ws-1", "Inbox sweep", "", &schedule, false, target);
    let wire = serde_json::to_value(&payload).expect("serialize");
    assert!(wire.get("task_id").is_none());
    assert_eq!(wire["schedule_config"], json!({ "time": "07:15" }));
    assert_eq!(
        wire["conversation_template"]["input_data"],
        json!({ "message": "Summarize the inbox" })
    );
}
