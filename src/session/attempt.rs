/// Maximum wrong guesses in quiz mode before the word is revealed and the
/// learner must re-type it to continue.
pub const MAX_TRIES: u8 = 3;

/// Where the current word is in its attempt lifecycle.
///
/// `tries` counts wrong guesses and only exists in quiz mode; once the word
/// is revealed the count no longer matters and `Confirm` carries no state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Quiz { tries: u8 },
    Confirm,
}

impl Mode {
    pub fn new() -> Self {
        Mode::Quiz { tries: 0 }
    }

    pub fn is_confirm(&self) -> bool {
        matches!(self, Mode::Confirm)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of feeding one guess into the attempt machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Spelled correctly within the allowed tries. Word is complete.
    Correct,
    /// Wrong, but tries remain. Same word, prompt re-entry.
    Retry,
    /// Third wrong guess. Word counts as missed; machine is now in Confirm.
    Exhausted,
    /// Exact re-type of the revealed spelling. Word is complete.
    Confirmed,
    /// Anything else while in Confirm. Stay there.
    ConfirmRejected,
}

impl Outcome {
    /// Whether this outcome finishes the current word.
    pub fn completes_word(&self) -> bool {
        matches!(self, Outcome::Correct | Outcome::Confirmed)
    }
}

/// Trim and lowercase a raw guess. Every input, however malformed, goes
/// through here and is then a plain match/mismatch.
pub fn normalize(guess: &str) -> String {
    guess.trim().to_lowercase()
}

/// Advance the machine by one guess against `correct` (already lowercased).
/// Mutates `mode` in place and reports what happened; stats, queueing, and
/// word advancement are the session's job.
pub fn check(mode: &mut Mode, guess: &str, correct: &str) -> Outcome {
    let guess = normalize(guess);

    match *mode {
        Mode::Confirm => {
            if guess == correct {
                Outcome::Confirmed
            } else {
                Outcome::ConfirmRejected
            }
        }
        Mode::Quiz { tries } => {
            if guess == correct {
                return Outcome::Correct;
            }
            let tries = tries + 1;
            if tries < MAX_TRIES {
                *mode = Mode::Quiz { tries };
                Outcome::Retry
            } else {
                *mode = Mode::Confirm;
                Outcome::Exhausted
            }
        }
    }
}
