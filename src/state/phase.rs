//! Clock phase definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of the work/break cycle the clock is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Work interval
    Session,
    /// Rest interval
    Break,
}

impl Phase {
    /// Label shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Session => "Session",
            Phase::Break => "Break",
        }
    }

    /// The phase that follows this one when the countdown runs out
    pub fn next(self) -> Self {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
