//! # Split Date CLI
//!
//! Terminal front end for `splitdate_core`:
//! - `types` lists the registered date data types
//! - `validate` runs a data type's server-side check on one wire value
//! - `check` runs the interactive split-widget rules on loose parts
//! - `fill` walks through a form definition, prompting for each date
//!
//! Every command can print JSON instead of text (`--json`).

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use splitdate_core::config::attr;
use splitdate_core::definition::FieldDefinition;
use splitdate_core::parts::month_name;
use splitdate_core::registry::{Dispatcher, GroupState, Highlight};
use splitdate_core::wire::{self, parse_bound};
use splitdate_core::{
    load_answers, load_form_definition, save_answers, DataTypeRegistry, DatePart, DateParts, Form,
    FormDefinition,
};

#[derive(Parser)]
#[command(author, version, about = "Check split dates and fill date forms", long_about = None)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered date data types
    Types,

    /// Validate a MM/DD/YYYY value with a data type
    Validate {
        #[arg(long = "type", short = 't')]
        datatype: String,

        value: String,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Run the split-widget rules on month, day and year
    Check {
        #[arg(long = "type", short = 't', default_value = "ALThreePartsDateTestValidation2")]
        datatype: String,

        #[arg(long, default_value = "")]
        month: String,

        #[arg(long, default_value = "")]
        day: String,

        #[arg(long, default_value = "")]
        year: String,

        /// Earliest allowed date (YYYY-MM-DD or MM/DD/YYYY)
        #[arg(long)]
        min: Option<String>,

        /// Latest allowed date (YYYY-MM-DD or MM/DD/YYYY)
        #[arg(long)]
        max: Option<String>,

        #[arg(long)]
        required: bool,

        #[arg(long)]
        today: Option<String>,
    },

    /// Answer a form interactively
    Fill {
        /// Form definition file; the built-in sample when omitted
        form: Option<PathBuf>,

        /// Answers file to prefill from and save to
        #[arg(long)]
        answers: Option<PathBuf>,

        #[arg(long)]
        today: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = DataTypeRegistry::with_builtin();
    match cli.command {
        Command::Types => {
            list_types(&registry, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { datatype, value, today } => {
            validate_value(&registry, &datatype, &value, resolve_today(today.as_deref())?, cli.json)
        }
        Command::Check {
            datatype,
            month,
            day,
            year,
            min,
            max,
            required,
            today,
        } => {
            let mut field = FieldDefinition::new("date", "Date", datatype);
            field.required = required;
            if let Some(min) = min {
                field.attributes.insert(attr::AL_MIN, min);
            }
            if let Some(max) = max {
                field.attributes.insert(attr::AL_MAX, max);
            }
            let parts = DateParts::new(month, day, year);
            check_parts(&registry, &field, &parts, resolve_today(today.as_deref())?, cli.json)
        }
        Command::Fill { form, answers, today } => fill_form(
            &registry,
            form.as_deref(),
            answers.as_deref(),
            resolve_today(today.as_deref())?,
            cli.json,
        ),
    }
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_bound(raw).ok_or_else(|| anyhow!("--today {raw:?} is not a date")),
        None => Ok(wire::today()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn list_types(registry: &DataTypeRegistry, as_json: bool) -> Result<()> {
    if as_json {
        let types: Vec<_> = registry
            .iter()
            .map(|data_type| {
                json!({
                    "name": data_type.name(),
                    "input_type": data_type.input_type(),
                    "jq_message": data_type.jq_message(),
                    "parameters": data_type.parameters(),
                    "split_widget": data_type.widget_kind().is_some(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    for data_type in registry.iter() {
        let widget = match data_type.widget_kind() {
            Some(kind) => format!("{kind:?}"),
            None => "-".to_string(),
        };
        println!("{:<36} {:<10} {}", data_type.name(), widget, data_type.parameters().join(", "));
    }
    Ok(())
}

fn validate_value(
    registry: &DataTypeRegistry,
    datatype: &str,
    value: &str,
    today: NaiveDate,
    as_json: bool,
) -> Result<ExitCode> {
    let data_type = registry.get(datatype)?;
    debug!(datatype, value, %today, "validating");

    let outcome = data_type
        .validate(value, today)
        .and_then(|()| data_type.transform(value));

    match outcome {
        Ok(date) => {
            let default = data_type.default_for(date);
            if as_json {
                let report = json!({ "valid": true, "date": date, "default": default });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match date {
                    Some(date) => println!("[OK] {value} -> {date} (shown as {default:?})"),
                    None => println!("[OK] empty"),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_validation() => {
            if as_json {
                let report = json!({ "valid": false, "error": err, "message": err.to_string() });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("[FAIL] {err}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn check_parts(
    registry: &DataTypeRegistry,
    field: &FieldDefinition,
    parts: &DateParts,
    today: NaiveDate,
    as_json: bool,
) -> Result<ExitCode> {
    let config = Arc::new(field.widget_config(registry)?);
    let mut dispatcher = Dispatcher::new();
    dispatcher.registry_mut().register_defaults(&config);
    let state = dispatcher.validate(&config.id, parts, today);

    if as_json {
        let report = json!({
            "value": parts.to_wire(),
            "valid": state.is_valid(),
            "state": state,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("value: {:?}", parts.to_wire());
        print_state(state);
    }
    Ok(if state.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn fill_form(
    registry: &DataTypeRegistry,
    form_path: Option<&Path>,
    answers_path: Option<&Path>,
    today: NaiveDate,
    as_json: bool,
) -> Result<ExitCode> {
    let definition = match form_path {
        Some(path) => load_form_definition(path)
            .with_context(|| format!("loading form {}", path.display()))?,
        None => FormDefinition::sample(),
    };
    let prior = match answers_path {
        Some(path) if path.exists() => Some(load_answers(path)?),
        _ => None,
    };

    let mut form = Form::from_definition(&definition, registry, prior.as_ref(), today)?;
    println!("{}", form.title());
    println!("{}", "=".repeat(form.title().chars().count().max(8)));

    let ids: Vec<String> = form.widgets().map(|widget| widget.id().to_string()).collect();
    for id in &ids {
        println!();
        println!("{}", form.label(id).unwrap_or(id));
        loop {
            for part in DatePart::ALL {
                let current = form
                    .widget(id)
                    .map(|widget| widget.parts().get(part).to_string())
                    .unwrap_or_default();
                let value = prompt_part(part, &current)?;
                form.change(id, part, &value)?;
            }
            let messages = form.check_field(id, registry)?;
            if messages.is_empty() {
                break;
            }
            let state = form.group_state(id);
            if state.is_valid() {
                // Rules pass but the data type refused the value
                for message in &messages {
                    println!("  [FAIL] {message}");
                }
            } else {
                print_state(&state);
            }
        }
    }

    match form.submit(registry) {
        Ok(answers) => {
            info!(answers = answers.values.len(), "form submitted");
            if as_json {
                println!("{}", serde_json::to_string_pretty(&answers)?);
            } else {
                println!();
                print_answers(&answers.values);
            }
            if let Some(path) = answers_path {
                save_answers(&answers, path)?;
                println!("saved {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else {
                println!();
                println!("[FAIL] {errors}");
                for (id, messages) in &errors.fields {
                    for message in messages {
                        println!("  {id}: {message}");
                    }
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// Terminal helpers
// ============================================================================

/// Ask for one sub-field. Enter keeps the current value, "-" clears it.
fn prompt_part(part: DatePart, current: &str) -> Result<String> {
    let shown = match (part, month_name(current)) {
        (DatePart::Month, Some(name)) => format!("{current} {name}"),
        _ => current.to_string(),
    };
    print!("  {:<6} [{}]: ", part.label(), shown);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        bail!("input closed before the form was finished");
    }

    Ok(match input.trim() {
        "" => current.to_string(),
        "-" => String::new(),
        typed => typed.to_string(),
    })
}

fn print_state(state: &GroupState) {
    if state.is_valid() {
        println!("[OK]");
        return;
    }
    for message in state.messages() {
        println!("  [FAIL] {message}");
    }
    match &state.highlight {
        Highlight::Parts(parts) => {
            let names: Vec<&str> = parts.iter().map(|part| part.label()).collect();
            println!("  missing: {}", names.join(", "));
        }
        Highlight::Group | Highlight::None => {}
    }
}

fn print_answers(values: &BTreeMap<String, String>) {
    for (name, value) in values {
        println!("  {name:<24} {value}");
    }
}
