use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use airlens_core::{AirQuality, BufferedChannel, PollOutcome, Pms5003t, Sensor};

const FRAME_LEN: u64 = 32;

#[derive(Parser, Debug)]
#[command(name = "airlens")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("AIRLENS_BUILD_COMMIT"),
    ")"
))]
#[command(
    about = "Decoder for PMS5003T particulate-matter sensor serial captures.",
    long_about = None,
    after_help = "Examples:\n  airlens capture decode serial.bin -o report.json\n  airlens capture decode serial.bin --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw serial capture files.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode every sensor frame in a capture and emit a JSON report.
    #[command(
        after_help = "Examples:\n  airlens capture decode serial.bin -o report.json\n  airlens capture decode serial.bin --stdout"
    )]
    Decode {
        /// Path to a raw serial capture (the sensor's byte stream, as read)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any input bytes failed to decode
        #[arg(long)]
        strict: bool,

        /// Enable decoder tracing on stderr
        #[arg(short = 'v', long)]
        verbose: bool,
    },
}

/// Decode report for one capture file.
#[derive(Debug, Serialize)]
struct Report {
    tool: ToolInfo,
    input: InputInfo,
    frames_decoded: u64,
    bytes_discarded: u64,
    readings: Vec<AirQuality>,
}

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct InputInfo {
    path: String,
    bytes: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                verbose,
            } => cmd_capture_decode(
                input, report, stdout, pretty, compact, quiet, strict, verbose,
            ),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_capture_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    verbose: bool,
) -> Result<(), CliError> {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(LevelFilter::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw serial capture file".to_string()),
        ));
    }

    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let bytes = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let rep = decode_capture(&input, &bytes);
    let json = serialize_report(&rep, pretty, compact)?;

    if let Some(report_path) = report {
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report_path, json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report_path.display());
        }
    } else {
        print!("{}", json);
    }

    if strict && rep.bytes_discarded > 0 {
        return Err(CliError::new(
            format!(
                "{} of {} input bytes failed to decode",
                rep.bytes_discarded, rep.input.bytes
            ),
            Some("the capture is truncated or desynchronized".to_string()),
        ));
    }
    Ok(())
}

/// Replay a capture through the sensor, polling until the stream no longer
/// yields frames.
fn decode_capture(input: &PathBuf, bytes: &[u8]) -> Report {
    let mut channel = BufferedChannel::new();
    channel.feed(bytes);

    let readings = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&readings);
    let mut sensor = Sensor::new(channel, Pms5003t, 1);
    sensor
        .add_observer(Box::new(move |reading: &AirQuality| {
            sink.borrow_mut().push(reading.clone());
        }))
        .expect("fresh registry has capacity");

    while sensor.poll() == PollOutcome::Decoded {}
    drop(sensor); // releases the observer's handle on the readings

    let readings = Rc::try_unwrap(readings)
        .expect("observer dropped with sensor")
        .into_inner();
    let frames_decoded = readings.len() as u64;
    let bytes_total = bytes.len() as u64;

    Report {
        tool: ToolInfo {
            name: "airlens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input.display().to_string(),
            bytes: bytes_total,
        },
        frames_decoded,
        bytes_discarded: bytes_total - frames_decoded * FRAME_LEN,
        readings,
    }
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}
