use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use markeasy_core::{Pacing, PlaybackSettings, UtteranceStyle, parse};
use services::{AppServices, ReaderService, SpeechConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    MissingText,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingText => write!(f, "no answer key given on the command line or stdin"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw: value })
}

struct DesktopApp {
    reader: Arc<ReaderService>,
}

impl UiApp for DesktopApp {
    fn reader(&self) -> Arc<ReaderService> {
        Arc::clone(&self.reader)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  markeasy ui    [options]");
    eprintln!("  markeasy read  [options] [<answers>...]   # reads stdin when no answers given");
    eprintln!("  markeasy parse [<answers>...]             # prints parsed entries as JSON");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --repeat <n>          passes over the whole key (default 1)");
    eprintln!("  --delay-ms <ms>       pause after each answer (default 3000)");
    eprintln!("  --gap-ms <ms>         extra pause between passes (default 0)");
    eprintln!("  --voice <name>        voice passed to the speech command");
    eprintln!("  --rate <wpm>          speaking rate");
    eprintln!("  --tts-command <cmd>   speech command line; the answer is appended");
    eprintln!("  --wait                wait for each answer to finish speaking");
    eprintln!("  --verbatim            speak \"Number 1.A\" instead of \"Number 1, A\"");
    eprintln!("  --silent              log answers instead of speaking them");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MARKEASY_REPEAT, MARKEASY_DELAY_MS, MARKEASY_GAP_MS,");
    eprintln!("  MARKEASY_VOICE, MARKEASY_RATE, MARKEASY_TTS_COMMAND, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Read,
    Parse,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "read" => Some(Self::Read),
            "parse" => Some(Self::Parse),
            _ => None,
        }
    }
}

struct Args {
    repeat: u32,
    delay_ms: u64,
    gap_ms: u64,
    wait_for_speech: bool,
    verbatim: bool,
    silent: bool,
    speech: SpeechConfig,
    text: Vec<String>,
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring non-numeric environment value");
            None
        }
    }
}

fn env_text(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let defaults = PlaybackSettings::default();
        let mut parsed = Self {
            repeat: env_number("MARKEASY_REPEAT").unwrap_or(defaults.repeat_count()),
            delay_ms: env_number("MARKEASY_DELAY_MS")
                .unwrap_or_else(|| millis(defaults.step_delay())),
            gap_ms: env_number("MARKEASY_GAP_MS").unwrap_or_else(|| millis(defaults.pass_gap())),
            wait_for_speech: false,
            verbatim: false,
            silent: false,
            speech: SpeechConfig {
                command: env_text("MARKEASY_TTS_COMMAND"),
                voice: env_text("MARKEASY_VOICE"),
                rate: env_number("MARKEASY_RATE"),
            },
            text: Vec::new(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--repeat" => parsed.repeat = require_number(args, "--repeat")?,
                "--delay-ms" => parsed.delay_ms = require_number(args, "--delay-ms")?,
                "--gap-ms" => parsed.gap_ms = require_number(args, "--gap-ms")?,
                "--rate" => parsed.speech.rate = Some(require_number(args, "--rate")?),
                "--voice" => parsed.speech.voice = Some(require_value(args, "--voice")?),
                "--tts-command" => {
                    parsed.speech.command = Some(require_value(args, "--tts-command")?);
                }
                "--wait" => parsed.wait_for_speech = true,
                "--verbatim" => parsed.verbatim = true,
                "--silent" => parsed.silent = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => parsed.text.push(arg),
            }
        }

        Ok(parsed)
    }

    fn settings(&self) -> Result<PlaybackSettings, Box<dyn std::error::Error>> {
        let pacing = if self.wait_for_speech {
            Pacing::AwaitSpeech
        } else {
            Pacing::FixedDelay
        };
        let style = if self.verbatim {
            UtteranceStyle::Verbatim
        } else {
            UtteranceStyle::NumberAnswer
        };
        Ok(PlaybackSettings::new(
            self.repeat,
            Duration::from_millis(self.delay_ms),
            Duration::from_millis(self.gap_ms),
            pacing,
            style,
        )?)
    }

    /// Answer key from the positional arguments, or stdin when none were given.
    fn answer_key(&self) -> Result<String, Box<dyn std::error::Error>> {
        if !self.text.is_empty() {
            return Ok(self.text.join(" "));
        }
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        if buf.trim().is_empty() {
            return Err(ArgsError::MissingText.into());
        }
        Ok(buf)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Ui => run_ui(&parsed),
        Command::Read => run_read(&parsed).await,
        Command::Parse => run_parse(&parsed),
    }
}

fn run_ui(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.settings()?;
    let services = if args.silent {
        AppServices::silent(settings)
    } else {
        AppServices::system(&args.speech, settings).unwrap_or_else(|err| {
            warn!(error = %err, "speech unavailable, answers will only be logged");
            AppServices::silent(settings)
        })
    };
    info!(speech = services.speech().name(), "launching desktop ui");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        reader: services.reader(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("MarkEasy")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

async fn run_read(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.settings()?;
    let text = args.answer_key()?;
    let services = if args.silent {
        AppServices::silent(settings)
    } else {
        AppServices::system(&args.speech, settings)?
    };
    let reader = services.reader();

    let outcome = reader.add_text(&text);
    if let Some(warning) = outcome.warning {
        eprintln!("{warning} ({} skipped)", outcome.invalid);
    }

    let mut run = tokio::spawn({
        let reader = Arc::clone(&reader);
        async move { reader.start_playback().await }
    });

    let report = tokio::select! {
        joined = &mut run => joined??,
        _ = tokio::signal::ctrl_c() => {
            reader.stop();
            run.await??
        }
    };

    if report.cancelled {
        println!("Stopped after {} of {} answers.", report.spoken, report.total);
    } else {
        println!(
            "Read {} answers in {:.1}s.",
            report.spoken,
            report.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn run_parse(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.answer_key()?;
    let outcome = parse(&text);
    let json = serde_json::json!({
        "entries": outcome.entries,
        "invalid": outcome.invalid,
        "warning": outcome.warning(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
