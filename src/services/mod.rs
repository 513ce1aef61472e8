//! Audio cue module
//!
//! This module contains the notification sound capability used at phase
//! boundaries and its terminal, silent and external player implementations.

pub mod audio;
pub mod player;

// Re-export main types
pub use audio::{AudioCue, BellCue, SilentCue};
pub use player::{check_player_available, CommandCue};
