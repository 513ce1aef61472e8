//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::Parser;

use crate::services::{AudioCue, BellCue, CommandCue, SilentCue};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-clock")]
#[command(about = "A 25+5 interval clock served over HTTP with audible phase cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25005")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Command that plays the phase change sound, e.g. "paplay beep.wav".
    /// Without it the terminal bell is rung.
    #[arg(long, value_name = "COMMAND")]
    pub beep_command: Option<String>,

    /// Do not play any sound at phase changes
    #[arg(long, conflicts_with = "beep_command")]
    pub silent: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the audio cue selected on the command line
    pub fn audio_cue(&self) -> anyhow::Result<Arc<dyn AudioCue>> {
        if self.silent {
            return Ok(Arc::new(SilentCue));
        }

        match &self.beep_command {
            Some(command_line) => {
                let cue = CommandCue::from_command_line(command_line).map_err(anyhow::Error::msg)?;
                Ok(Arc::new(cue))
            }
            None => Ok(Arc::new(BellCue)),
        }
    }

    /// Program name of the external player, if one is configured
    pub fn player_program(&self) -> Option<String> {
        self.beep_command
            .as_deref()
            .and_then(shlex::split)
            .and_then(|words| words.into_iter().next())
    }
}
