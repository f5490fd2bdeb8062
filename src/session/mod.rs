pub mod attempt;
pub mod review;
pub mod selector;
pub mod stats;

use std::collections::HashSet;

use rand::Rng;

use crate::catalog::{WordCatalog, WordEntry};
use attempt::{Mode, Outcome};
use review::ReviewQueue;
use stats::{StatsTracker, Tally};

pub const DEFAULT_GOAL: usize = 20;

/// One practice session: glues the selector, the attempt machine, the
/// review queue, and the tallies into a per-turn protocol. The app layer
/// owns presentation (speech, rendering, the post-answer delay); this type
/// owns every state mutation.
#[derive(Debug, Default)]
pub struct Session {
    pub goal: usize,
    pub mastered: HashSet<String>,
    pub review: ReviewQueue,
    pub stats: StatsTracker,
    pub current: Option<WordEntry>,
    pub last_word: Option<String>,
    pub mode: Mode,
}

impl Session {
    pub fn new(goal: usize, lifetime: Tally) -> Self {
        Self {
            goal,
            mastered: HashSet::new(),
            review: ReviewQueue::new(),
            stats: StatsTracker::new(lifetime),
            current: None,
            last_word: None,
            mode: Mode::new(),
        }
    }

    /// Begin (or continue) practicing: zero the session tally and present
    /// the first word. Mastered set, review queue, and lifetime tally are
    /// left alone so a continued session picks up where it was.
    pub fn start<R: Rng>(&mut self, catalog: &WordCatalog, rng: &mut R) {
        self.stats.reset_session();
        self.advance(catalog, rng);
    }

    /// Full reset back to a pre-session state. Lifetime tally survives.
    pub fn restart(&mut self) {
        self.stats.reset_session();
        self.mastered.clear();
        self.review.clear();
        self.mode = Mode::new();
        self.last_word = None;
        self.current = None;
    }

    /// Select and install the next word. Resets the attempt machine.
    pub fn advance<R: Rng>(&mut self, catalog: &WordCatalog, rng: &mut R) {
        let next = selector::select_next(
            catalog,
            &mut self.review,
            &self.mastered,
            self.last_word.as_deref(),
            rng,
        );
        self.last_word = Some(next.key());
        self.current = Some(next);
        self.mode = Mode::new();
    }

    /// Feed one typed answer through the attempt machine and apply the
    /// outcome's side effects. The caller decides what to present and when
    /// to advance (completing outcomes advance after a short delay;
    /// `is_complete()` is checked first).
    pub fn submit(&mut self, guess: &str) -> Option<Outcome> {
        let current = self.current.clone()?;
        let outcome = attempt::check(&mut self.mode, guess, &current.key());

        match outcome {
            Outcome::Correct => {
                self.stats.record_correct();
                let key = current.key();
                self.mastered.insert(key.clone());
                self.review.remove(&key);
            }
            Outcome::Exhausted => {
                self.stats.record_missed();
                self.review.push(current, &self.mastered);
            }
            // Already counted at Exhausted, or nothing to count yet.
            Outcome::Retry | Outcome::Confirmed | Outcome::ConfirmRejected => {}
        }

        Some(outcome)
    }

    /// Manual skip. In quiz mode this counts like an exhausted word (one
    /// missed attempt, queued for review) but goes straight to the next word
    /// without entering confirm mode. In confirm mode the word was already
    /// counted, so only the advance happens (performed by the caller).
    pub fn skip(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        if !self.mode.is_confirm() {
            self.stats.record_missed();
            self.review.push(current, &self.mastered);
        }
    }

    /// Celebration condition: enough distinct words mastered this session.
    pub fn is_complete(&self) -> bool {
        self.mastered.len() >= self.goal
    }

    /// Prompt text for the current word, spoken and shown verbatim.
    pub fn prompt_text(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|e| format!("Spell {}, as in: \"{}\"", e.word, e.example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn catalog(words: &[&str]) -> WordCatalog {
        WordCatalog::from_entries(
            words
                .iter()
                .map(|w| WordEntry {
                    word: w.to_string(),
                    example: format!("Example for {w}."),
                })
                .collect(),
        )
        .unwrap()
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(1)
    }

    #[test]
    fn test_two_word_session_completes_at_goal() {
        let catalog = catalog(&["cat", "dog"]);
        let mut rng = rng();
        let mut session = Session::new(2, Tally::default());
        session.start(&catalog, &mut rng);

        let first = session.current.clone().unwrap();
        assert_eq!(session.submit(&first.word), Some(Outcome::Correct));
        assert_eq!(session.mastered.len(), 1);
        assert_eq!(session.stats.session.correct, 1);
        assert!(!session.is_complete());

        session.advance(&catalog, &mut rng);
        let second = session.current.clone().unwrap();
        assert_ne!(second.key(), first.key());
        assert_eq!(session.submit(&second.word), Some(Outcome::Correct));
        assert!(session.is_complete());
    }

    #[test]
    fn test_three_misses_then_confirm() {
        let catalog = catalog(&["apple", "dog"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally::default());
        session.start(&catalog, &mut rng);

        // Force a known current word
        session.current = Some(WordEntry {
            word: "apple".to_string(),
            example: String::new(),
        });
        session.last_word = Some("apple".to_string());
        session.mode = Mode::new();

        assert_eq!(session.submit("aple"), Some(Outcome::Retry));
        assert_eq!(session.submit("appel"), Some(Outcome::Retry));
        assert_eq!(session.submit("appl"), Some(Outcome::Exhausted));
        assert!(session.mode.is_confirm());
        // One attempt for the word, not three
        assert_eq!(session.stats.session.attempts, 1);
        assert_eq!(session.stats.session.correct, 0);
        assert!(session.review.contains("apple"));

        // Confirm requires the exact spelling, then completes without
        // touching the tallies again.
        assert_eq!(session.submit("appel"), Some(Outcome::ConfirmRejected));
        assert_eq!(session.submit("apple"), Some(Outcome::Confirmed));
        assert_eq!(session.stats.session.attempts, 1);
        assert_eq!(session.stats.session.correct, 0);
    }

    #[test]
    fn test_correct_answer_removes_word_from_review() {
        let catalog = catalog(&["apple", "dog", "cat"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally::default());
        session.start(&catalog, &mut rng);

        session.current = Some(WordEntry {
            word: "apple".to_string(),
            example: String::new(),
        });
        for guess in ["a", "b", "c"] {
            session.submit(guess);
        }
        assert!(session.review.contains("apple"));
        session.submit("apple"); // Confirmed
        session.advance(&catalog, &mut rng);

        // Later, apple is served from review and spelled correctly
        session.current = Some(WordEntry {
            word: "apple".to_string(),
            example: String::new(),
        });
        session.mode = Mode::new();
        assert_eq!(session.submit("apple"), Some(Outcome::Correct));
        assert!(!session.review.contains("apple"));
        assert!(session.mastered.contains("apple"));
    }

    #[test]
    fn test_skip_in_quiz_counts_and_queues() {
        let catalog = catalog(&["cat", "dog"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally::default());
        session.start(&catalog, &mut rng);

        let current = session.current.clone().unwrap();
        session.skip();
        assert_eq!(session.stats.session.attempts, 1);
        assert_eq!(session.stats.session.correct, 0);
        assert!(session.review.contains(&current.key()));
    }

    #[test]
    fn test_skip_in_confirm_does_not_double_count() {
        let catalog = catalog(&["cat", "dog"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally::default());
        session.start(&catalog, &mut rng);

        for guess in ["x", "y", "z"] {
            session.submit(guess);
        }
        assert!(session.mode.is_confirm());
        assert_eq!(session.stats.session.attempts, 1);
        session.skip();
        assert_eq!(session.stats.session.attempts, 1);
    }

    #[test]
    fn test_mastered_words_never_reselected() {
        let catalog = catalog(&["cat", "dog", "bee", "ant"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally::default());
        session.start(&catalog, &mut rng);

        // Master two of the four words
        for _ in 0..2 {
            let word = session.current.clone().unwrap().word;
            session.submit(&word);
            session.advance(&catalog, &mut rng);
        }
        assert_eq!(session.mastered.len(), 2);
        // With unmastered alternatives remaining, mastered words stay out
        for _ in 0..20 {
            let current = session.current.clone().unwrap();
            assert!(!session.mastered.contains(&current.key()));
            session.advance(&catalog, &mut rng);
        }
    }

    #[test]
    fn test_restart_clears_session_but_not_lifetime() {
        let catalog = catalog(&["cat", "dog"]);
        let mut rng = rng();
        let mut session = Session::new(20, Tally { correct: 9, attempts: 12 });
        session.start(&catalog, &mut rng);
        let word = session.current.clone().unwrap().word;
        session.submit(&word);

        session.restart();
        assert!(session.mastered.is_empty());
        assert!(session.review.is_empty());
        assert!(session.current.is_none());
        assert!(session.last_word.is_none());
        assert_eq!(session.stats.session, Tally::default());
        assert_eq!(session.stats.lifetime, Tally { correct: 10, attempts: 13 });
    }

    #[test]
    fn test_prompt_text_includes_word_and_example() {
        let mut session = Session::new(20, Tally::default());
        session.current = Some(WordEntry {
            word: "apple".to_string(),
            example: "An apple a day.".to_string(),
        });
        assert_eq!(
            session.prompt_text().unwrap(),
            "Spell apple, as in: \"An apple a day.\""
        );
    }
}
