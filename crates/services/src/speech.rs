//! Speech capability used by the playback sequencer.
//!
//! The sequencer treats `speak` as fire-and-forget. Engines that can tell when
//! audio has finished expose that through `wait_idle`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::SpeechError;

#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Starts speaking `utterance` and returns without waiting for the audio.
    async fn speak(&self, utterance: &str) -> Result<(), SpeechError>;

    /// Resolves once everything started so far has finished playing.
    async fn wait_idle(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    /// Silences any utterance still playing.
    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Engine that only logs what it would say.
#[derive(Debug, Default)]
pub struct SilentSpeech;

#[async_trait]
impl SpeechEngine for SilentSpeech {
    async fn speak(&self, utterance: &str) -> Result<(), SpeechError> {
        info!(utterance, "speak (silent)");
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

//
// ─── SYSTEM SPEECH ─────────────────────────────────────────────────────────────
//

/// Options for locating and driving the platform speech command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechConfig {
    /// Full command line to run instead of auto-detection. The utterance is
    /// appended as the last argument.
    pub command: Option<String>,
    pub voice: Option<String>,
    /// Speaking rate in words per minute.
    pub rate: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Say,
    Espeak,
    SpdSay,
}

const CANDIDATES: &[(&str, Flavor)] = &[
    ("say", Flavor::Say),
    ("espeak-ng", Flavor::Espeak),
    ("espeak", Flavor::Espeak),
    ("spd-say", Flavor::SpdSay),
];

/// Speaks through an external text-to-speech program (`say`, `espeak-ng`, ...).
///
/// Each utterance runs as its own child process. Children are reaped lazily
/// on the next call, so overlapping speech is possible under fixed pacing.
#[derive(Debug)]
pub struct SystemSpeech {
    program: String,
    args: Vec<String>,
    children: Mutex<Vec<Child>>,
}

impl SystemSpeech {
    /// Resolves the speech command from `config`, falling back to the first
    /// known program found on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::InvalidCommand` for an unparsable custom command
    /// and `SpeechError::Unavailable` when nothing usable is installed.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        if let Some(command) = config.command.as_deref() {
            let mut words = shlex::split(command)
                .filter(|words| !words.is_empty())
                .ok_or_else(|| SpeechError::InvalidCommand(command.to_string()))?;
            let program = words.remove(0);
            return Ok(Self::new(program, words));
        }

        let (program, flavor) = CANDIDATES
            .iter()
            .find(|(program, _)| on_path(program))
            .copied()
            .ok_or_else(|| SpeechError::Unavailable {
                tried: CANDIDATES
                    .iter()
                    .map(|(program, _)| *program)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        let args = flavor_args(flavor, config);
        info!(program, ?args, "using system speech");
        Ok(Self::new(program.to_string(), args))
    }

    #[must_use]
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            children: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn flavor_args(flavor: Flavor, config: &SpeechConfig) -> Vec<String> {
    let mut args = Vec::new();
    match flavor {
        Flavor::Say => {
            if let Some(voice) = &config.voice {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            if let Some(rate) = config.rate {
                args.extend(["-r".to_string(), rate.to_string()]);
            }
        }
        Flavor::Espeak => {
            if let Some(voice) = &config.voice {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            if let Some(rate) = config.rate {
                args.extend(["-s".to_string(), rate.to_string()]);
            }
        }
        Flavor::SpdSay => {
            // Without -w spd-say returns before the audio ends.
            args.push("-w".to_string());
            if let Some(voice) = &config.voice {
                args.extend(["-y".to_string(), voice.clone()]);
            }
            if config.rate.is_some() {
                warn!("spd-say does not take a words-per-minute rate; ignoring");
            }
        }
    }
    args
}

fn on_path(program: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
    })
}

#[async_trait]
impl SpeechEngine for SystemSpeech {
    async fn speak(&self, utterance: &str) -> Result<(), SpeechError> {
        let mut children = self.children.lock().await;
        children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(utterance)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        debug!(program = %self.program, utterance, in_flight = children.len(), "spawned speech");
        children.push(child);
        Ok(())
    }

    async fn wait_idle(&self) -> Result<(), SpeechError> {
        let mut children = self.children.lock().await;
        for mut child in children.drain(..) {
            let status = child.wait().await?;
            if !status.success() {
                warn!(program = %self.program, %status, "speech command exited unsuccessfully");
            }
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        let mut children = self.children.lock().await;
        for child in children.iter_mut() {
            if let Err(err) = child.start_kill() {
                debug!(%err, "speech process already gone");
            }
        }
        children.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
