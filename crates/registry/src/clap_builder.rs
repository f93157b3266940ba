use clap::{Arg, ArgAction, Command as ClapCommand};
use fleetdeck_types::{FieldSchema, ProviderSchema};

use crate::ProviderRegistry;

/// Builds the complete clap command tree from the provider catalog.
///
/// The catalog drives the terminal surface exactly as it drives the
/// dashboard forms: every provider in the registry becomes a
/// `credentials create <kind>` subcommand whose flags are generated from
/// the provider's field schemas, in schema field order.
///
/// Field flags are deliberately not marked required at the clap level; the
/// engine's validator is the authority on required-ness so that missing
/// fields surface as per-field messages rather than argument-parser errors.
pub fn build_clap(registry: &ProviderRegistry) -> ClapCommand {
    create_root_command()
        .subcommand(build_providers_command())
        .subcommand(build_credentials_command(registry))
        .subcommand(build_schedule_command())
        .subcommand(build_tasks_command())
}

/// Creates the root command with global flags.
fn create_root_command() -> ClapCommand {
    ClapCommand::new("fleetdeck")
        .about("Operator console for a fleet of AI agents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Verbose logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

fn build_providers_command() -> ClapCommand {
    ClapCommand::new("providers")
        .about("Inspect the provider schema catalog")
        .subcommand_required(true)
        .subcommand(ClapCommand::new("list").about("List known credential providers"))
}

/// Builds the `credentials` group: one generated `create` subcommand per
/// catalog entry, plus the read-side `preview`.
fn build_credentials_command(registry: &ProviderRegistry) -> ClapCommand {
    let mut create = ClapCommand::new("create")
        .about("Store a credential for an external service")
        .subcommand_required(true);
    for provider in registry.providers() {
        create = create.subcommand(build_provider_subcommand(provider));
    }

    let preview = ClapCommand::new("preview")
        .about("Display a stored credential record with sensitive values masked")
        .arg(
            Arg::new("provider")
                .long("provider")
                .required(true)
                .action(ArgAction::Set)
                .help("Provider kind of the record"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .required(true)
                .action(ArgAction::Set)
                .help("Path to the credential record JSON"),
        )
        .arg(
            Arg::new("reveal")
                .long("reveal")
                .action(ArgAction::SetTrue)
                .help("Render sensitive values in the clear"),
        )
        .arg(
            Arg::new("copy")
                .long("copy")
                .action(ArgAction::Set)
                .value_name("FIELD")
                .help("Copy one field's literal value to the clipboard"),
        );

    ClapCommand::new("credentials")
        .about("Manage external-service credentials")
        .subcommand_required(true)
        .subcommand(create)
        .subcommand(preview)
}

/// Builds one provider's `create` subcommand from its field schemas.
fn build_provider_subcommand(provider: &ProviderSchema) -> ClapCommand {
    let kind_static: &'static str = Box::leak(provider.kind.clone().into_boxed_str());
    let about: &'static str = Box::leak(format!("Store a {} credential", provider.display_name).into_boxed_str());
    let mut subcommand = ClapCommand::new(kind_static).about(about).arg(
        Arg::new("name")
            .long("name")
            .action(ArgAction::Set)
            .help("Display name for the stored credential (required)"),
    );

    for field in &provider.fields {
        subcommand = subcommand.arg(build_field_argument(field));
    }

    subcommand.arg(
        Arg::new("dry-run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Print the redacted payload instead of sending it"),
    )
}

/// Builds a single field flag with help text derived from the schema.
fn build_field_argument(field: &FieldSchema) -> Arg {
    let name: &'static str = Box::leak(field.name.clone().into_boxed_str());
    let help_text: &'static str = Box::leak(generate_help_text(field).into_boxed_str());
    Arg::new(name).long(name).action(ArgAction::Set).help(help_text)
}

/// Generates help text for a field flag.
fn generate_help_text(field: &FieldSchema) -> String {
    let mut help = match &field.description {
        Some(description) => description.clone(),
        None => field.label.clone(),
    };
    if field.required {
        help.push_str(" (required)");
    }
    help
}

fn build_schedule_command() -> ClapCommand {
    let preview = ClapCommand::new("preview")
        .about("Normalize schedule parameters and print the wire configuration")
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .action(ArgAction::Set)
                .value_parser(clap::builder::PossibleValuesParser::new(["daily", "weekly", "monthly", "custom"]))
                .help("Recurrence kind"),
        )
        .args(schedule_parameter_args());

    ClapCommand::new("schedule")
        .about("Work with recurrence configurations")
        .subcommand_required(true)
        .subcommand(preview)
}

fn build_tasks_command() -> ClapCommand {
    let inputs = ClapCommand::new("inputs")
        .about("Show the input keys a task declares via its execution configuration")
        .arg(Arg::new("task_id").required(true).index(1).help("Task identifier"));

    let schedule = ClapCommand::new("schedule")
        .about("Create a recurring run of a task or a free-form message")
        .arg(
            Arg::new("agent-id")
                .long("agent-id")
                .required(true)
                .action(ArgAction::Set)
                .help("Agent that owns the run"),
        )
        .arg(
            Arg::new("workspace-id")
                .long("workspace-id")
                .required(true)
                .action(ArgAction::Set)
                .help("Workspace the run is scoped to"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .action(ArgAction::Set)
                .help("Name for the scheduled run (required)"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .action(ArgAction::Set)
                .help("Description shown in the schedule table"),
        )
        .arg(
            Arg::new("task-id")
                .long("task-id")
                .action(ArgAction::Set)
                .help("Drive the run from this task's declared inputs"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .action(ArgAction::Append)
                .value_name("KEY=VALUE")
                .help("Value for one task-declared input key; repeatable"),
        )
        .arg(
            Arg::new("message")
                .long("message")
                .action(ArgAction::Set)
                .help("Free-form message driving the run instead of a task"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .action(ArgAction::Set)
                .value_parser(clap::builder::PossibleValuesParser::new(["daily", "weekly", "monthly", "custom"]))
                .help("Recurrence kind"),
        )
        .args(schedule_parameter_args())
        .arg(
            Arg::new("auto-create-conversation")
                .long("auto-create-conversation")
                .action(ArgAction::SetTrue)
                .help("Open a conversation for each run"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the payload instead of sending it"),
        );

    ClapCommand::new("tasks")
        .about("Inspect and schedule task runs")
        .subcommand_required(true)
        .subcommand(inputs)
        .subcommand(schedule)
}

/// The four schedule parameter flags shared by `schedule preview` and
/// `tasks schedule`. All optional; the normalizer decides which apply.
fn schedule_parameter_args() -> Vec<Arg> {
    vec![
        Arg::new("time")
            .long("time")
            .action(ArgAction::Set)
            .value_name("HH:MM")
            .help("Time of day (daily, weekly, monthly)"),
        Arg::new("day-of-week")
            .long("day-of-week")
            .action(ArgAction::Set)
            .value_name("0-6")
            .help("Day of week, 0 = Sunday (weekly)"),
        Arg::new("day-of-month")
            .long("day-of-month")
            .action(ArgAction::Set)
            .value_name("1-31")
            .help("Day of month (monthly)"),
        Arg::new("cron")
            .long("cron")
            .action(ArgAction::Set)
            .value_name("EXPR")
            .help("Cron expression (custom)"),
    ]
}
