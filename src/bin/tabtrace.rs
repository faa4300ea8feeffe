//! tabtrace CLI - Command-line interface for the tabtrace engine
//!
//! Commands:
//! - report: Compute a dashboard report from an events file (batch mode)
//! - validate: Validate attention events against the ingestion schema
//! - demo: Generate a synthetic week of attention events
//! - schema: Print schema information
//! - doctor: Diagnose engine health and inputs

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tabtrace::engine::AttentionEngine;
use tabtrace::schema::{EventAdapter, SCHEMA_VERSION};
use tabtrace::types::{AttentionEvent, EventKind};
use tabtrace::{ComputeError, PRODUCER_NAME, VERSION};

/// tabtrace - On-device analytics engine for browser attention events
#[derive(Parser)]
#[command(name = "tabtrace")]
#[command(version = VERSION)]
#[command(about = "Turn attention events into dashboard analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a dashboard report from an events file (batch mode)
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Which report to compute
        #[arg(short, long, default_value = "dashboard")]
        report: ReportKind,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Fixed UTC offset for bucketing, e.g. "+02:00" (defaults to the
        /// system's local timezone)
        #[arg(long)]
        utc_offset: Option<FixedOffset>,
    },

    /// Validate attention events against the ingestion schema
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

    /// Generate a synthetic week of attention events
    Demo {
        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Number of days to generate, ending today
        #[arg(long, default_value = "7")]
        days: u32,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input events or output reports)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },

    /// Diagnose engine health and inputs
    Doctor {
        /// Check an events file
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    /// Full 24x7 fingerprint grid
    Buckets,
    /// Today's timeline segments
    Timeline,
    /// 7-day rollup
    Weekly,
    /// Top distraction triggers
    Triggers,
    /// Next best focus window
    NextWindow,
    /// All reports in one payload
    Dashboard,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events (or a single event object)
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Newline-delimited JSON (one element per line for list reports)
    Ndjson,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaType {
    /// Input schema (attention.event.v1)
    Input,
    /// Output schema (dashboard reports)
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

fn run(cli: Cli) -> Result<(), TraceCliError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            report,
            input_format,
            output_format,
            utc_offset,
        } => cmd_report(&input, &output, report, input_format, output_format, utc_offset),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Demo {
            output,
            days,
            seed,
            output_format,
        } => cmd_demo(&output, days, seed, output_format),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),

        Commands::Doctor { events, json } => cmd_doctor(events.as_deref(), json),
    }
}

fn cmd_report(
    input: &Path,
    output: &Path,
    report: ReportKind,
    input_format: InputFormat,
    output_format: OutputFormat,
    utc_offset: Option<FixedOffset>,
) -> Result<(), TraceCliError> {
    let events = read_events(input, input_format)?;
    if events.is_empty() {
        return Err(TraceCliError::NoEvents);
    }

    let mut engine = AttentionEngine::new();
    engine.ingest(events)?;

    let rendered = match utc_offset {
        Some(offset) => render_report(&engine, report, output_format, &Utc::now().with_timezone(&offset))?,
        None => render_report(&engine, report, output_format, &Local::now())?,
    };

    write_output(output, &rendered)
}

fn render_report<Tz: TimeZone>(
    engine: &AttentionEngine,
    report: ReportKind,
    format: OutputFormat,
    now: &DateTime<Tz>,
) -> Result<String, TraceCliError> {
    let tz = now.timezone();
    match report {
        ReportKind::Buckets => format_list(&engine.buckets(&tz), format),
        ReportKind::Timeline => format_list(&engine.today_timeline(now), format),
        ReportKind::Weekly => format_list(&engine.weekly_stats(now), format),
        ReportKind::Triggers => format_list(&engine.top_triggers(), format),
        ReportKind::NextWindow => format_single(&engine.next_best_window(&tz), format),
        ReportKind::Dashboard => format_single(&engine.dashboard(now), format),
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), TraceCliError> {
    let events = read_events(input, input_format)?;
    let failures = EventAdapter::validate_events(&events);

    let report = ValidationReport {
        schema: SCHEMA_VERSION.to_string(),
        total_events: events.len(),
        valid_events: events.len() - failures.len(),
        invalid_events: failures.len(),
        errors: failures
            .iter()
            .map(|f| ValidationErrorDetail {
                index: f.index,
                event_id: f.event_id.clone(),
                error: f.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report ({})", report.schema);
        println!("=================");
        println!("Total events:   {}", report.total_events);
        println!("Valid events:   {}", report.valid_events);
        println!("Invalid events: {}", report.invalid_events);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Event {} (index {}): {}", err.event_id, err.index, err.error);
            }
        }
    }

    if report.invalid_events > 0 {
        Err(TraceCliError::ValidationFailed(report.invalid_events))
    } else {
        Ok(())
    }
}

const DEMO_DISTRACTION_DOMAINS: &[&str] = &[
    "youtube.com",
    "tiktok.com",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "reddit.com",
    "netflix.com",
    "steamcommunity.com",
];

const DEMO_STUDY_DOMAINS: &[&str] = &[
    "coursera.org",
    "khanacademy.org",
    "docs.google.com",
    "notion.so",
    "github.com",
    "stackoverflow.com",
    "scholar.google.com",
    "library.university.edu",
];

/// Generate a synthetic event history with realistic daily rhythm: peak
/// distraction in the afternoon, focus in the morning, looser weekends.
fn cmd_demo(
    output: &Path,
    days: u32,
    seed: Option<u64>,
    output_format: OutputFormat,
) -> Result<(), TraceCliError> {
    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let today = Local::now().date_naive();
    let mut events: Vec<AttentionEvent> = Vec::new();

    for back in (0..u64::from(days)).rev() {
        let day = today.checked_sub_days(Days::new(back)).unwrap_or(today);
        let Some(day_start) = Local
            .from_local_datetime(&day.and_time(NaiveTime::MIN))
            .earliest()
        else {
            continue;
        };
        let day_start_ms = day_start.timestamp_millis();
        let dow = day.weekday().number_from_monday();

        for hour in 8..24i64 {
            let is_weekend = dow >= 6;
            let is_peak_hour = (14..=18).contains(&hour);
            let is_evening_chill = hour >= 20;
            let is_morning_focus = (9..=11).contains(&hour);

            let mut base_score: f64 = 30.0;
            if is_peak_hour {
                base_score += 25.0;
            }
            if is_evening_chill {
                base_score += 15.0;
            }
            if is_morning_focus {
                base_score -= 15.0;
            }
            if is_weekend {
                base_score += 10.0;
            }
            let score = (base_score + (rng.gen::<f64>() - 0.5) * 30.0).clamp(0.0, 100.0);

            for _ in 0..rng.gen_range(6..=12) {
                let minute = rng.gen_range(0..60i64);
                let ts = day_start_ms + (hour * 60 + minute) * 60_000;

                let is_distraction = rng.gen::<f64>() < (score / 100.0) * 0.7;
                let domain = if is_distraction {
                    DEMO_DISTRACTION_DOMAINS[rng.gen_range(0..DEMO_DISTRACTION_DOMAINS.len())]
                } else {
                    DEMO_STUDY_DOMAINS[rng.gen_range(0..DEMO_STUDY_DOMAINS.len())]
                };
                let kind = if is_distraction {
                    EventKind::Distraction
                } else {
                    EventKind::Active
                };

                let mut event = AttentionEvent::new(ts, domain, kind)
                    .with_title(format!("{domain} - Sample Page"));
                event.is_idle = rng.gen::<f64>() < 0.1;
                events.push(event);
            }
        }
    }

    events.sort_by_key(|e| e.ts);
    log::info!("generated {} demo events over {} days", events.len(), days);

    let rendered = format_list(&events, output_format)?;
    write_output(output, &rendered)
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), TraceCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("One attention event per record:");
                println!();
                println!("- id: unique event identifier (non-empty string)");
                println!("- ts: observation timestamp, epoch milliseconds (positive)");
                println!("- domain: domain the browser tab was on (may be empty)");
                println!("- title: optional page title");
                println!("- isIdle: whether the user was idle at capture time");
                println!("- kind: ACTIVE, IDLE or DISTRACTION");
                println!();
                println!("Batches may be a single object, a JSON array, or NDJSON.");
                println!("Events failing validation are rejected, never stored.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: dashboard reports");
                println!();
                println!("- buckets: 168 fingerprint cells (24 hours x 7 weekdays), each");
                println!("  {{ hour, dow, score, tabSwitchesPer5, minutesDistracted, topDomains }}");
                println!("- timeline: today's segments, each");
                println!("  {{ startHour, startMinute, endHour, endMinute, type, score, domains }}");
                println!("- weekly: 7 day summaries, each");
                println!("  {{ date, totalMinutes, focusMinutes, distractionMinutes,");
                println!("    idleMinutes, avgScore, topDistraction, focusStreakMin }}");
                println!("- triggers: up to 5 of {{ domain, minutes, percentage, trend }}");
                println!("- next-window: {{ hour, score, confidence, reason }}");
                println!("- dashboard: all of the above plus producer metadata");
            }
        }
    }

    Ok(())
}

fn cmd_doctor(events: Option<&Path>, json: bool) -> Result<(), TraceCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("tabtrace version {}", VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}", SCHEMA_VERSION),
    });

    if let Some(events_path) = events {
        if events_path.exists() {
            match fs::read_to_string(events_path) {
                Ok(content) => {
                    let parsed = EventAdapter::parse_ndjson(&content)
                        .or_else(|_| EventAdapter::parse_payload(&content));
                    match parsed {
                        Ok(parsed_events) => {
                            let failures = EventAdapter::validate_events(&parsed_events);
                            if failures.is_empty() {
                                checks.push(DoctorCheck {
                                    name: "events".to_string(),
                                    status: CheckStatus::Ok,
                                    message: format!(
                                        "Events file valid ({} events)",
                                        parsed_events.len()
                                    ),
                                });
                            } else {
                                checks.push(DoctorCheck {
                                    name: "events".to_string(),
                                    status: CheckStatus::Error,
                                    message: format!(
                                        "{} of {} events fail validation",
                                        failures.len(),
                                        parsed_events.len()
                                    ),
                                });
                            }
                        }
                        Err(e) => {
                            checks.push(DoctorCheck {
                                name: "events".to_string(),
                                status: CheckStatus::Error,
                                message: format!("Cannot parse events file: {}", e),
                            });
                        }
                    }
                }
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "events".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read events file: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "events".to_string(),
                status: CheckStatus::Warning,
                message: "Events file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("tabtrace Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(TraceCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_events(input: &Path, format: InputFormat) -> Result<Vec<AttentionEvent>, TraceCliError> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let events = match format {
        InputFormat::Ndjson => EventAdapter::parse_ndjson(&data)?,
        InputFormat::Json => EventAdapter::parse_payload(&data)?,
    };
    Ok(events)
}

fn write_output(output: &Path, data: &str) -> Result<(), TraceCliError> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn format_list<T: serde::Serialize>(
    items: &[T],
    format: OutputFormat,
) -> Result<String, TraceCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for item in items {
                lines.push(serde_json::to_string(item)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(items)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(items)?),
    }
}

fn format_single<T: serde::Serialize>(
    item: &T,
    format: OutputFormat,
) -> Result<String, TraceCliError> {
    match format {
        OutputFormat::Ndjson => Ok(serde_json::to_string(item)? + "\n"),
        OutputFormat::Json => Ok(serde_json::to_string(item)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(item)?),
    }
}

fn get_input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "tabtrace attention event schema",
        "type": "object",
        "required": ["id", "ts", "isIdle", "kind"],
        "properties": {
            "id": { "type": "string", "minLength": 1 },
            "ts": { "type": "integer", "exclusiveMinimum": 0 },
            "domain": { "type": "string" },
            "title": { "type": "string" },
            "isIdle": { "type": "boolean" },
            "kind": {
                "type": "string",
                "enum": ["ACTIVE", "IDLE", "DISTRACTION"]
            }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "tabtrace.dashboard.v1",
        "description": "tabtrace dashboard payload schema",
        "type": "object",
        "required": ["producer", "generatedAt", "snapshot"],
        "properties": {
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "generatedAt": { "type": "string" },
            "snapshot": {
                "type": "object",
                "required": ["buckets", "timeline", "weekly", "triggers", "nextWindow"],
                "properties": {
                    "buckets": { "type": "array", "minItems": 168, "maxItems": 168 },
                    "timeline": { "type": "array" },
                    "weekly": { "type": "array", "minItems": 7, "maxItems": 7 },
                    "triggers": { "type": "array", "maxItems": 5 },
                    "nextWindow": { "type": "object" }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum TraceCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoEvents,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for TraceCliError {
    fn from(e: io::Error) -> Self {
        TraceCliError::Io(e)
    }
}

impl From<ComputeError> for TraceCliError {
    fn from(e: ComputeError) -> Self {
        TraceCliError::Compute(e)
    }
}

impl From<serde_json::Error> for TraceCliError {
    fn from(e: serde_json::Error) -> Self {
        TraceCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TraceCliError> for CliError {
    fn from(e: TraceCliError) -> Self {
        match e {
            TraceCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            TraceCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {} schema", SCHEMA_VERSION)),
            },
            TraceCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            TraceCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            TraceCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} events failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            TraceCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
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
    event_id: String,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
