use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use fleetdeck_api::FleetClient;
use fleetdeck_engine::{
    DialogDraft, ScheduleParams, SensitiveValue, TaskSelection, credential_payload, materialize,
    scheduled_task_payload, to_schedule, validate_display_name, validate_fields, validate_run_target,
};
use fleetdeck_registry::ProviderRegistry;
use fleetdeck_types::{ExecutionConfig, ProviderSchema, Schedule, ScheduleType};
use fleetdeck_util::{redact_sensitive, time_handling::format_time_12h};
use tracing::{Level, warn};

mod clipboard;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let registry = ProviderRegistry::from_config()?;
    let matches = fleetdeck_registry::build_clap(&registry).get_matches();

    match matches.subcommand() {
        Some(("providers", sub)) => run_providers(&registry, sub),
        Some(("credentials", sub)) => run_credentials(&registry, sub).await,
        Some(("schedule", sub)) => run_schedule(sub),
        Some(("tasks", sub)) => run_tasks(sub).await,
        _ => bail!("expected a subcommand"),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}

fn run_providers(registry: &ProviderRegistry, matches: &ArgMatches) -> Result<()> {
    let Some(("list", sub)) = matches.subcommand() else {
        bail!("expected a providers subcommand");
    };

    if sub.get_flag("json") {
        let providers: Vec<&ProviderSchema> = registry.providers().collect();
        println!("{}", serde_json::to_string_pretty(&providers)?);
        return Ok(());
    }

    for provider in registry.providers() {
        println!(
            "{:<14} {} ({} fields)",
            provider.kind,
            provider.display_name,
            provider.fields.len()
        );
    }
    Ok(())
}

async fn run_credentials(registry: &ProviderRegistry, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("create", sub)) => run_credentials_create(registry, sub).await,
        Some(("preview", sub)) => run_credentials_preview(registry, sub),
        _ => bail!("expected a credentials subcommand"),
    }
}

async fn run_credentials_create(registry: &ProviderRegistry, matches: &ArgMatches) -> Result<()> {
    let (kind, cmd_matches) = matches.subcommand().context("expected a provider kind")?;
    let schema = registry
        .lookup(kind)
        .with_context(|| format!("unknown provider '{}'", kind))?;

    // One dialog instance: materialize empty, then apply the flag edits.
    let mut draft = DialogDraft::open(materialize(schema, None));
    for field in &schema.fields {
        if let Some(value) = cmd_matches.get_one::<String>(&field.name) {
            draft.set_value(&field.name, value.clone());
        }
    }
    let display_name = cmd_matches.get_one::<String>("name").cloned().unwrap_or_default();

    let mut error_count = 0;
    if let Err(reason) = validate_display_name(&display_name) {
        println!("  name: {}", reason);
        error_count += 1;
    }
    let validated = match validate_fields(&schema.fields, draft.values()) {
        Ok(validated) => Some(validated),
        Err(errors) => {
            for (field, reason) in &errors {
                println!("  {}: {}", field, reason);
            }
            error_count += errors.len();
            None
        }
    };
    let Some(validated) = validated.filter(|_| error_count == 0) else {
        bail!("credential form has {} error(s); nothing was sent", error_count);
    };

    let payload = credential_payload(schema, &display_name, validated)?;

    if cmd_matches.get_flag("dry-run") {
        println!("{}", redact_sensitive(&serde_json::to_string_pretty(&payload)?));
        return Ok(());
    }

    let client = FleetClient::new_from_env()?;
    if !draft.begin_submission() {
        bail!("a submission is already in flight for this dialog");
    }
    match client.create_credential(&payload).await {
        Ok(_) => {
            draft.submission_succeeded();
            println!("Stored {} credential '{}'", schema.display_name, display_name);
            Ok(())
        }
        Err(error) => {
            // Draft values stay intact; the operator can re-run as-is.
            draft.submission_failed();
            bail!("credential was not stored: {}", error);
        }
    }
}

fn run_credentials_preview(registry: &ProviderRegistry, matches: &ArgMatches) -> Result<()> {
    let kind = matches.get_one::<String>("provider").context("--provider is required")?;
    let schema = registry
        .lookup(kind)
        .with_context(|| format!("unknown provider '{}'", kind))?;

    let path = matches.get_one::<String>("file").context("--file is required")?;
    let record = read_credential_record(path)?;
    let values = materialize(schema, Some(&record));

    let reveal = matches.get_flag("reveal");
    let copy_field = matches.get_one::<String>("copy");
    if let Some(name) = copy_field
        && schema.field(name).is_none()
    {
        bail!("'{}' is not a field of the '{}' schema", name, schema.kind);
    }

    for field in &schema.fields {
        let value = values.get(&field.name).map(String::as_str).unwrap_or_default();
        let mut presenter = SensitiveValue::for_field(field, value);
        if reveal {
            presenter.reveal();
        }
        println!("{:<20} {}", field.label, presenter.display());

        if copy_field.is_some_and(|name| name == &field.name) {
            // Copying never changes what is rendered.
            clipboard::apply_effect(presenter.copy());
            println!("Copied {} to clipboard", field.label);
        }
    }
    Ok(())
}

/// Reads a stored credential record from disk, accepting either the raw
/// field map or a full credential object wrapping one under `credential`.
fn read_credential_record(path: &str) -> Result<ExecutionConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let value: serde_json::Value = serde_json::from_str(&content).with_context(|| format!("parse {}", path))?;
    let map_value = match value.get("credential") {
        Some(credential) if credential.is_object() => credential.clone(),
        _ => value,
    };
    serde_json::from_value(map_value).with_context(|| format!("{} is not a credential object", path))
}

fn run_schedule(matches: &ArgMatches) -> Result<()> {
    let Some(("preview", sub)) = matches.subcommand() else {
        bail!("expected a schedule subcommand");
    };

    let schedule = normalize_schedule_args(sub)?;
    let wire = serde_json::json!({
        "schedule_type": schedule.schedule_type(),
        "schedule_config": schedule.to_wire(),
    });

    println!("{}", serde_json::to_string_pretty(&wire)?);

    if !sub.get_flag("json")
        && let Schedule::Daily { time } | Schedule::Weekly { time, .. } | Schedule::Monthly { time, .. } = &schedule
        && let Some(friendly) = format_time_12h(time)
    {
        println!("Runs at {}", friendly);
    }
    Ok(())
}

/// Collects the `--type` selection and the four parameter slots, then
/// normalizes them into a canonical schedule. Stale cross-type flags are
/// accepted on the command line and dropped by the normalizer.
fn normalize_schedule_args(matches: &ArgMatches) -> Result<Schedule> {
    let kind: ScheduleType = matches.get_one::<String>("type").context("--type is required")?.parse()?;

    let params = ScheduleParams {
        time: matches.get_one::<String>("time").cloned(),
        day_of_week: parse_day_flag(matches, "day-of-week")?,
        day_of_month: parse_day_flag(matches, "day-of-month")?,
        cron_expression: matches.get_one::<String>("cron").cloned(),
    };

    Ok(to_schedule(kind, &params)?)
}

fn parse_day_flag(matches: &ArgMatches, name: &str) -> Result<Option<u8>> {
    matches
        .get_one::<String>(name)
        .map(|raw| raw.parse::<u8>())
        .transpose()
        .with_context(|| format!("--{} must be a small number", name))
}

async fn run_tasks(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("inputs", sub)) => run_tasks_inputs(sub).await,
        Some(("schedule", sub)) => run_tasks_schedule(sub).await,
        _ => bail!("expected a tasks subcommand"),
    }
}

async fn run_tasks_inputs(matches: &ArgMatches) -> Result<()> {
    let task_id = matches.get_one::<String>("task_id").context("task id is required")?;

    let client = FleetClient::new_from_env()?;
    let mut selection = TaskSelection::default();
    let ticket = selection.select(task_id);
    let config = client.fetch_task_execution_config(task_id).await?;
    let values = selection
        .apply(&ticket, &config)
        .context("task selection changed while fetching")?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }
    if values.is_empty() {
        println!("Task '{}' declares no input keys", task_id);
        return Ok(());
    }
    for (key, seeded) in &values {
        if seeded.is_empty() {
            println!("{}", key);
        } else {
            println!("{:<20} default: {}", key, seeded);
        }
    }
    Ok(())
}

async fn run_tasks_schedule(matches: &ArgMatches) -> Result<()> {
    let agent_id = matches.get_one::<String>("agent-id").context("--agent-id is required")?;
    let workspace_id = matches
        .get_one::<String>("workspace-id")
        .context("--workspace-id is required")?;
    let name = matches.get_one::<String>("name").cloned().unwrap_or_default();
    let description = matches.get_one::<String>("description").cloned().unwrap_or_default();
    let message = matches.get_one::<String>("message").cloned().unwrap_or_default();
    let task_id = matches.get_one::<String>("task-id");

    if task_id.is_some() && !message.trim().is_empty() {
        warn!("--message is ignored while --task-id is set");
    }

    let client = FleetClient::new_from_env()?;

    // Resolve the dynamic key set for the selected task, if any.
    let mut selection = TaskSelection::default();
    let (keys, mut draft) = match task_id {
        Some(task_id) => {
            let ticket = selection.select(task_id);
            let config = client.fetch_task_execution_config(task_id).await?;
            let values = selection
                .apply(&ticket, &config)
                .context("task selection changed while fetching")?;
            let keys: Vec<String> = values.keys().cloned().collect();
            (keys, DialogDraft::open(values))
        }
        None => (Vec::new(), DialogDraft::open(Default::default())),
    };

    // Overlay --input edits; undeclared keys are refused outright since the
    // payload may never carry keys the task did not declare.
    for pair in matches.get_many::<String>("input").unwrap_or_default() {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("--input '{}' is not KEY=VALUE", pair))?;
        if !draft.values().contains_key(key) {
            bail!(
                "'{}' is not declared by this task; declared keys: {}",
                key,
                keys.join(", ")
            );
        }
        draft.set_value(key, value.to_string());
    }

    let mut error_count = 0;
    if let Err(reason) = validate_display_name(&name) {
        println!("  name: {}", reason);
        error_count += 1;
    }
    let target = match validate_run_target(selection.current(), &keys, draft.values(), &message) {
        Ok(target) => Some(target),
        Err(errors) => {
            for (field, reason) in &errors {
                println!("  {}: {}", field, reason);
            }
            error_count += errors.len();
            None
        }
    };
    let Some(target) = target.filter(|_| error_count == 0) else {
        bail!("scheduled task form has {} error(s); nothing was sent", error_count);
    };

    let schedule = normalize_schedule_args(matches)?;
    let payload = scheduled_task_payload(
        agent_id,
        workspace_id,
        &name,
        &description,
        &schedule,
        matches.get_flag("auto-create-conversation"),
        target,
    );

    if matches.get_flag("dry-run") {
        println!("{}", redact_sensitive(&serde_json::to_string_pretty(&payload)?));
        return Ok(());
    }

    if !draft.begin_submission() {
        bail!("a submission is already in flight for this dialog");
    }
    match client.create_scheduled_task(&payload).await {
        Ok(_) => {
            draft.submission_succeeded();
            println!("Scheduled '{}' ({})", name, schedule.schedule_type());
            Ok(())
        }
        Err(error) => {
            draft.submission_failed();
            bail!("scheduled task was not created: {}", error);
        }
    }
}
