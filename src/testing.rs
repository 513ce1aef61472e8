//! Test doubles shared by the unit tests

use std::sync::{Arc, Mutex};

use crate::services::AudioCue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueEvent {
    Play,
    Stop,
    Rewind,
}

/// Audio cue that remembers every command it was given
#[derive(Debug, Clone, Default)]
pub struct RecordingCue {
    events: Arc<Mutex<Vec<CueEvent>>>,
}

impl RecordingCue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CueEvent> {
        self.events.lock().expect("cue events").clone()
    }

    fn record(&self, event: CueEvent) {
        self.events.lock().expect("cue events").push(event);
    }
}

impl AudioCue for RecordingCue {
    fn play(&self) {
        self.record(CueEvent::Play);
    }

    fn stop(&self) {
        self.record(CueEvent::Stop);
    }

    fn rewind(&self) {
        self.record(CueEvent::Rewind);
    }
}
