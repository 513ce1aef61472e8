//! External sound player management

use std::{process::Stdio, sync::Mutex};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use super::AudioCue;

/// Plays the cue by running an external player command such as
/// `paplay /usr/share/sounds/freedesktop/stereo/bell.oga`.
///
/// Must be driven from within a tokio runtime.
#[derive(Debug)]
pub struct CommandCue {
    program: String,
    args: Vec<String>,
    playback: Mutex<Option<Child>>,
}

impl CommandCue {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            playback: Mutex::new(None),
        }
    }

    /// Build a cue from a full command line, split with shell quoting rules
    pub fn from_command_line(command_line: &str) -> Result<Self, String> {
        let mut words = shlex::split(command_line)
            .ok_or_else(|| format!("Unbalanced quotes in beep command: {}", command_line))?
            .into_iter();

        let program = words
            .next()
            .ok_or_else(|| "Beep command is empty".to_string())?;

        Ok(Self::new(program, words.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether a playback started by this cue is still running
    pub fn is_playing(&self) -> bool {
        match self.playback.lock() {
            Ok(mut playback) => still_running(&mut playback),
            Err(_) => false,
        }
    }

    fn spawn_player(&self) -> Result<Child, String> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to start {}: {}", self.program, e))
    }
}

/// Check whether the tracked child is alive, forgetting it once it exits
fn still_running(playback: &mut Option<Child>) -> bool {
    let Some(child) = playback.as_mut() else {
        return false;
    };

    match child.try_wait() {
        Ok(None) => true,
        Ok(Some(status)) => {
            debug!("Player exited with {}", status);
            *playback = None;
            false
        }
        Err(e) => {
            warn!("Failed to poll player: {}", e);
            *playback = None;
            false
        }
    }
}

impl AudioCue for CommandCue {
    fn play(&self) {
        let mut playback = match self.playback.lock() {
            Ok(playback) => playback,
            Err(e) => {
                warn!("Failed to lock player state: {}", e);
                return;
            }
        };

        if still_running(&mut playback) {
            debug!("Cue is already playing");
            return;
        }

        match self.spawn_player() {
            Ok(child) => {
                debug!("Started {} (pid {:?})", self.program, child.id());
                *playback = Some(child);
            }
            Err(e) => warn!("{}", e),
        }
    }

    fn stop(&self) {
        let mut playback = match self.playback.lock() {
            Ok(playback) => playback,
            Err(e) => {
                warn!("Failed to lock player state: {}", e);
                return;
            }
        };

        if let Some(child) = playback.as_mut() {
            // Already exited players report an error here, which is fine
            if let Err(e) = child.start_kill() {
                debug!("Player was not running: {}", e);
            } else {
                info!("Stopped {}", self.program);
            }
        }
    }

    fn rewind(&self) {
        // A fresh player process always starts from the beginning
        match self.playback.lock() {
            Ok(mut playback) => {
                playback.take();
            }
            Err(e) => warn!("Failed to lock player state: {}", e),
        }
    }
}

/// Check if the sound player can be launched on this system
pub async fn check_player_available(program: &str) -> Result<(), String> {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| format!("Failed to look up {}: {}", program, e))
        .and_then(|status| {
            if status.success() {
                info!("{} is available", program);
                Ok(())
            } else {
                Err(format!("{} was not found on PATH; phase changes will be silent", program))
            }
        })
}
