use serde::{Deserialize, Serialize};

/// Correct/attempt counters. Used both for the per-session tally (reset on
/// session start) and the lifetime tally (monotonic, persisted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub attempts: u32,
}

impl Tally {
    pub fn summary(&self) -> String {
        format!("{} correct out of {} attempted", self.correct, self.attempts)
    }
}

/// Session and lifetime counters, advanced together. A word contributes one
/// attempt when it completes in quiz mode (correctly or by exhaustion/skip),
/// never per individual guess.
#[derive(Clone, Debug, Default)]
pub struct StatsTracker {
    pub session: Tally,
    pub lifetime: Tally,
}

impl StatsTracker {
    pub fn new(lifetime: Tally) -> Self {
        Self {
            session: Tally::default(),
            lifetime,
        }
    }

    /// Word spelled correctly within the allowed tries.
    pub fn record_correct(&mut self) {
        self.session.attempts += 1;
        self.session.correct += 1;
        self.lifetime.attempts += 1;
        self.lifetime.correct += 1;
    }

    /// Word missed (exhausted tries or skipped in quiz mode).
    pub fn record_missed(&mut self) {
        self.session.attempts += 1;
        self.lifetime.attempts += 1;
    }

    pub fn reset_session(&mut self) {
        self.session = Tally::default();
    }
}
