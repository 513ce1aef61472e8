//! Audio cue capability and the built-in cues

use std::io::{self, Write};
use tracing::{debug, warn};

/// Notification sound the clock plays at each phase boundary.
///
/// Implementations handle their own failures; the clock never sees them.
pub trait AudioCue: Send + Sync {
    /// Start playing the sound
    fn play(&self);
    /// Stop the sound if it is playing
    fn stop(&self);
    /// Move playback back to the start of the sound
    fn rewind(&self);
}

/// Rings the terminal bell on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct BellCue;

impl AudioCue for BellCue {
    fn play(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }

    fn stop(&self) {
        debug!("Terminal bell has nothing to stop");
    }

    fn rewind(&self) {
        debug!("Terminal bell has nothing to rewind");
    }
}

/// Plays nothing; used when sound is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) {
        debug!("Silent cue: play");
    }

    fn stop(&self) {
        debug!("Silent cue: stop");
    }

    fn rewind(&self) {
        debug!("Silent cue: rewind");
    }
}
