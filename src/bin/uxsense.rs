//! uxsense CLI - Command-line interface for uxsense
//!
//! Commands:
//! - replay: Replay recorded interaction events through the detectors (batch mode)
//! - validate: Validate interaction event input
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use uxsense::pipeline::{parse_events_json, parse_events_ndjson, replay_events};
use uxsense::types::{EmittedEvent, InteractionEvent};
use uxsense::{MonitorConfig, TelemetryError, EVENT_SCHEMA_VERSION, PRODUCER_NAME, UXSENSE_VERSION};

/// uxsense - Frustration-signal detection engine for interface telemetry
#[derive(Parser)]
#[command(name = "uxsense")]
#[command(version = UXSENSE_VERSION)]
#[command(about = "Turn interaction event streams into frustration signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded interaction events through the detectors (batch mode)
    Replay {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Detector configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate interaction event input
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one emitted event per line)
    Ndjson,
    /// JSON array of emitted events
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (ux.interaction_event.v1)
    Input,
    /// Output schema (emitted telemetry events)
    Output,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), UxCliError> {
    match cli.command {
        Commands::Replay {
            input,
            output,
            input_format,
            output_format,
            config,
        } => cmd_replay(&input, &output, input_format, output_format, config.as_deref()),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_replay(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&std::path::Path>,
) -> Result<(), UxCliError> {
    let input_data = read_input(input)?;

    let events = parse_events(&input_data, &input_format)?;

    if events.is_empty() {
        return Err(UxCliError::NoEvents);
    }

    let config = match config {
        Some(path) => {
            let config_json = fs::read_to_string(path)?;
            MonitorConfig::from_json(&config_json)?
        }
        None => MonitorConfig::default(),
    };

    let emitted = replay_events(events, config);
    let output_data = format_output(&emitted, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), UxCliError> {
    let input_data = read_input(input)?;

    // Check each record individually so the report covers every error,
    // not just the first one.
    let mut total = 0usize;
    let mut errors: Vec<ValidationErrorDetail> = Vec::new();

    match input_format {
        InputFormat::Ndjson => {
            for (lineno, line) in input_data.lines().enumerate() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                total += 1;
                if let Err(e) = serde_json::from_str::<InteractionEvent>(trimmed) {
                    errors.push(ValidationErrorDetail {
                        index: lineno + 1,
                        error: e.to_string(),
                    });
                }
            }
        }
        InputFormat::Json => {
            let values: Vec<serde_json::Value> = serde_json::from_str(&input_data)
                .map_err(|e| TelemetryError::ParseError(e.to_string()))?;
            total = values.len();
            for (index, value) in values.iter().enumerate() {
                if let Err(e) = serde_json::from_value::<InteractionEvent>(value.clone()) {
                    errors.push(ValidationErrorDetail {
                        index,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    let report = ValidationReport {
        schema: EVENT_SCHEMA_VERSION.to_string(),
        total_events: total,
        valid_events: total - errors.len(),
        invalid_events: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Schema:         {}", report.schema);
        println!("Total events:   {}", report.total_events);
        println!("Valid events:   {}", report.valid_events);
        println!("Invalid events: {}", report.invalid_events);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_events > 0 {
        Err(UxCliError::ValidationFailed(report.invalid_events))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), UxCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", EVENT_SCHEMA_VERSION);
            println!();
            println!("Each record is one interaction event:");
            println!();
            println!("- timestamp: RFC 3339 instant the interaction happened");
            println!("- event_type: click, scroll, field_focus, field_blur, form_submit,");
            println!("  form_abandon, error, navigation, identify_user, clear_user,");
            println!("  reset_session");
            println!("- target: element snapshot for clicks");
            println!("  - tag, id, classes, role, href, disabled, has_tabindex,");
            println!("    has_inline_handler, looks_clickable");
            println!("  - label, text, title, alt, placeholder (semantic naming)");
            println!("  - ancestors: enclosing element snapshots, nearest first");
            println!("- scroll: {{ position, document_height, viewport_height }}");
            println!("- field: {{ name, id, tag }} for focus/blur");
            println!("- form: {{ form, success, error_message }} for submit/abandon");
            println!("- error: {{ message, stack, error_type }}");
            println!("- navigation: {{ url, title }}");
            println!("- user: {{ id, email, name }} for identify_user");
        }
        SchemaType::Output => {
            println!("Output Schema: emitted telemetry events");
            println!();
            println!("Every emitted event carries:");
            println!();
            println!("- name: frustration.rage_click, frustration.dead_click,");
            println!("  frustration.thrashing, frustration.form_hesitation,");
            println!("  form.field_blur, form.submit, form.abandon, page.error,");
            println!("  navigation.change, session.identify");
            println!("- severity: info, warn, error");
            println!("- attributes: flat string-keyed map, always stamped with");
            println!("  - session.id, session.sequence, session.duration_ms");
            println!("  - page.url, page.title");
            println!("  - user.* when a user has been identified");
            println!("- frustration events add frustration.type, frustration.score,");
            println!("  target.name, target.key, and per-detector metrics");
            println!();
            println!("Producer: {} {}", PRODUCER_NAME, UXSENSE_VERSION);
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, UxCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_events(
    input_data: &str,
    input_format: &InputFormat,
) -> Result<Vec<InteractionEvent>, UxCliError> {
    let events = match input_format {
        InputFormat::Ndjson => parse_events_ndjson(input_data)?,
        InputFormat::Json => parse_events_json(input_data)?,
    };
    Ok(events)
}

fn format_output(
    emitted: &[EmittedEvent],
    format: &OutputFormat,
) -> Result<String, UxCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for event in emitted {
                lines.push(serde_json::to_string(event)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(emitted)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(emitted)?),
    }
}

// Error types

#[derive(Debug)]
enum UxCliError {
    Io(io::Error),
    Telemetry(TelemetryError),
    Json(serde_json::Error),
    NoEvents,
    ValidationFailed(usize),
}

impl From<io::Error> for UxCliError {
    fn from(e: io::Error) -> Self {
        UxCliError::Io(e)
    }
}

impl From<TelemetryError> for UxCliError {
    fn from(e: TelemetryError) -> Self {
        UxCliError::Telemetry(e)
    }
}

impl From<serde_json::Error> for UxCliError {
    fn from(e: serde_json::Error) -> Self {
        UxCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<UxCliError> for CliError {
    fn from(e: UxCliError) -> Self {
        match e {
            UxCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            UxCliError::Telemetry(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {} schema", EVENT_SCHEMA_VERSION)),
            },
            UxCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            UxCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            UxCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} events failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    schema: String,
    total_events: usize,
    valid_events: usize,
    invalid_events: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}
