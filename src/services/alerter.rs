// src/services/alerter.rs

//! Operator alert.
//!
//! Plays a sound on loop until the operator presses a key. Playback and
//! acknowledgement sit behind traits so the loop can run headless and tests
//! never touch the terminal or an audio device.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

use crate::error::{AppError, Result};
use crate::models::AlertConfig;

const PATH_PLACEHOLDER: &str = "{path}";

/// Blocks until the operator acknowledges an alert.
pub trait Acknowledger: Send + Sync {
    fn wait_for_ack(&self) -> Result<()>;
}

/// Waits for a single key press in raw terminal mode.
pub struct TerminalAcknowledger;

impl Acknowledger for TerminalAcknowledger {
    fn wait_for_ack(&self) -> Result<()> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns immediately. For headless runs and tests.
pub struct NoopAcknowledger;

impl Acknowledger for NoopAcknowledger {
    fn wait_for_ack(&self) -> Result<()> {
        Ok(())
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// A running sound that can be stopped.
pub trait Playback {
    fn stop(&mut self) -> Result<()>;
}

/// Starts looping playback of a sound file.
pub trait SoundPlayer: Send + Sync {
    fn play_looping(&self, path: &Path) -> Result<Box<dyn Playback>>;
}

/// Plays sound through an external player program.
pub struct CommandPlayer {
    command: Vec<String>,
}

impl CommandPlayer {
    /// `command[0]` is the program; `{path}` in any argument is replaced
    /// by the sound file path.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn build(&self, path: &Path) -> Result<Command> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AppError::alert("no player command configured"))?;

        let path = path.to_string_lossy();
        let mut cmd = Command::new(program);
        cmd.args(args.iter().map(|a| a.replace(PATH_PLACEHOLDER, &path)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(cmd)
    }
}

impl SoundPlayer for CommandPlayer {
    fn play_looping(&self, path: &Path) -> Result<Box<dyn Playback>> {
        let child = self
            .build(path)?
            .spawn()
            .map_err(|e| AppError::alert(format!("cannot start player: {e}")))?;
        Ok(Box::new(ChildPlayback(child)))
    }
}

struct ChildPlayback(Child);

impl Playback for ChildPlayback {
    fn stop(&mut self) -> Result<()> {
        // The player may already have exited on its own.
        if self.0.try_wait()?.is_none() {
            self.0.kill()?;
        }
        self.0.wait()?;
        Ok(())
    }
}

/// How an alert ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Sound played until the operator pressed a key
    Acknowledged,
    /// No sound file; only a visible notice was shown
    SoundMissing,
    /// Playback could not start; only a visible notice was shown
    PlaybackFailed(String),
    /// Sound played but waiting for the operator failed, e.g. no terminal
    AckFailed(String),
}

/// Audible alert with operator acknowledgement.
pub struct Alerter {
    sound_path: PathBuf,
    player: Box<dyn SoundPlayer>,
    ack: Box<dyn Acknowledger>,
}

impl Alerter {
    pub fn new(
        sound_path: impl Into<PathBuf>,
        player: Box<dyn SoundPlayer>,
        ack: Box<dyn Acknowledger>,
    ) -> Self {
        Self {
            sound_path: sound_path.into(),
            player,
            ack,
        }
    }

    /// Alerter that plays through the configured command and waits for a key.
    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(
            &config.sound_path,
            Box::new(CommandPlayer::new(config.player.clone())),
            Box::new(TerminalAcknowledger),
        )
    }

    /// Replace the acknowledgement backend.
    pub fn with_acknowledger(mut self, ack: Box<dyn Acknowledger>) -> Self {
        self.ack = ack;
        self
    }

    /// Raise the alert, writing prompts and notices to `out`.
    ///
    /// Never fails; problems degrade to a visible notice.
    pub fn alert(&self, out: &mut impl Write) -> AlertOutcome {
        if !self.sound_path.exists() {
            log::warn!("Alert sound {} not found", self.sound_path.display());
            visible_notice(out, "Alert sound file not found.");
            return AlertOutcome::SoundMissing;
        }

        let mut playback = match self.player.play_looping(&self.sound_path) {
            Ok(playback) => playback,
            Err(e) => {
                log::error!("Error playing alert sound: {}", e);
                visible_notice(out, &format!("Error playing alert sound: {e}"));
                return AlertOutcome::PlaybackFailed(e.to_string());
            }
        };

        let _ = writeln!(out, "Press any key to continue checking further...");
        let _ = out.flush();
        let outcome = match self.ack.wait_for_ack() {
            Ok(()) => AlertOutcome::Acknowledged,
            Err(e) => {
                log::warn!("Alert acknowledgement failed: {}", e);
                AlertOutcome::AckFailed(e.to_string())
            }
        };
        if let Err(e) = playback.stop() {
            log::warn!("Failed to stop alert sound: {}", e);
        }
        outcome
    }
}

fn visible_notice(out: &mut impl Write, message: &str) {
    // Terminal bell, then the message.
    let _ = writeln!(out, "\x07{message}");
    let _ = out.flush();
}
