//! Neulish CLI - Command-line interface for the Neulish engine
//!
//! Commands:
//! - recommend: Build a plan from a check-in
//! - outlook: Frame the day from a check-in
//! - session: Cap a requested session length for a check-in
//! - weekly: Summarize a week of day records
//! - stats: Reduce a week of day records to numeric stats
//! - narrative: Render weekly stats as a paragraph
//! - corporate: Aggregate per-user weekly records
//! - features: Preprocess check-in records into feature vectors
//! - health: Report engine status

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use neulish_engine::encoder::ResponseEncoder;
use neulish_engine::pipeline::{self, parse_user_input};
use neulish_engine::summary::WeeklyAggregator;
use neulish_engine::{recommend_input, EngineError, ENGINE_VERSION};

/// Neulish - Gentle, regulation-first cognitive wellness recommendations
#[derive(Parser)]
#[command(name = "neulish")]
#[command(author = "Neulish")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Wellness recommendations and weekly summaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a recommendation plan from a check-in object
    Recommend(IoArgs),

    /// Frame the day as gentle, active or moderate
    Outlook(IoArgs),

    /// Cap a requested session length for a check-in
    Session {
        #[command(flatten)]
        args: IoArgs,

        /// Requested session length in minutes
        #[arg(long)]
        minutes: u32,
    },

    /// Summarize an array of day records
    Weekly(IoArgs),

    /// Reduce an array of day records to numeric stats
    Stats {
        #[command(flatten)]
        args: IoArgs,

        /// Half-week stress difference needed to report a trend
        #[arg(long, default_value = "0.5")]
        trend_tolerance: f64,
    },

    /// Render a weekly stats object as a paragraph
    Narrative(IoArgs),

    /// Aggregate an array of per-user weekly records
    Corporate(IoArgs),

    /// Preprocess an array of check-in records into feature vectors
    Features(IoArgs),

    /// Report engine status
    Health {
        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Output file path (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Output format
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Wrap the result with producer metadata
    #[arg(long)]
    envelope: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

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

fn run(cli: Cli) -> Result<(), NeulishCliError> {
    match cli.command {
        Commands::Recommend(args) => {
            let input = parse_user_input(&read_input(&args.input)?)?;
            emit(&args, &recommend_input(&input))
        }

        Commands::Outlook(args) => {
            let outlook = pipeline::outlook(&read_input(&args.input)?)?;
            emit(&args, &outlook)
        }

        Commands::Session { args, minutes } => {
            let capped = pipeline::session_minutes(&read_input(&args.input)?, minutes)?;
            emit(
                &args,
                &SessionLength {
                    requested_minutes: minutes,
                    minutes: capped,
                },
            )
        }

        Commands::Weekly(args) => {
            let summary = pipeline::weekly_summary(&read_input(&args.input)?)?;
            emit(&args, &summary)
        }

        Commands::Stats {
            args,
            trend_tolerance,
        } => {
            let aggregator = WeeklyAggregator::with_trend_tolerance(trend_tolerance);
            let stats = pipeline::weekly_stats(&read_input(&args.input)?, &aggregator)?;
            emit(&args, &stats)
        }

        Commands::Narrative(args) => {
            let text = pipeline::narrative_from_stats(&read_input(&args.input)?)?;
            emit(&args, &Narrative { narrative: text })
        }

        Commands::Corporate(args) => {
            let metrics = pipeline::corporate(&read_input(&args.input)?)?;
            emit(&args, &metrics)
        }

        Commands::Features(args) => {
            let vectors = pipeline::features(&read_input(&args.input)?)?;
            emit(&args, &vectors)
        }

        Commands::Health { format } => {
            println!("{}", format_output(&pipeline::health(), format)?);
            Ok(())
        }
    }
}

fn read_input(input: &Path) -> Result<String, NeulishCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            warn!("reading JSON from the terminal, end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        debug!(path = %input.display(), "reading input");
        Ok(fs::read_to_string(input)?)
    }
}

fn emit<T: Serialize>(io_args: &IoArgs, value: &T) -> Result<(), NeulishCliError> {
    let output_data = if io_args.envelope {
        let pretty = matches!(io_args.format, OutputFormat::JsonPretty);
        ResponseEncoder::new().encode_to_json(value, pretty)?
    } else {
        format_output(value, io_args.format)?
    };

    if io_args.output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(&io_args.output, format!("{output_data}\n"))?;
    }

    Ok(())
}

fn format_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<String, NeulishCliError> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    };
    Ok(output)
}

// Output types

#[derive(Serialize)]
struct SessionLength {
    requested_minutes: u32,
    minutes: u32,
}

#[derive(Serialize)]
struct Narrative {
    narrative: String,
}

// Error types

#[derive(Debug)]
enum NeulishCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
}

impl From<io::Error> for NeulishCliError {
    fn from(e: io::Error) -> Self {
        NeulishCliError::Io(e)
    }
}

impl From<EngineError> for NeulishCliError {
    fn from(e: EngineError) -> Self {
        NeulishCliError::Engine(e)
    }
}

impl From<serde_json::Error> for NeulishCliError {
    fn from(e: serde_json::Error) -> Self {
        NeulishCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<NeulishCliError> for CliError {
    fn from(e: NeulishCliError) -> Self {
        match e {
            NeulishCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            NeulishCliError::Engine(EngineError::InvalidPayload(msg)) => CliError {
                code: "INVALID_PAYLOAD".to_string(),
                message: msg,
                hint: Some(
                    "Check-ins and stats are JSON objects; record lists are JSON arrays"
                        .to_string(),
                ),
            },
            NeulishCliError::Engine(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            NeulishCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
        }
    }
}
