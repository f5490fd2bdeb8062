use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::WordCatalog;
use crate::config::Config;
use crate::session::Session;
use crate::session::attempt::Outcome;
use crate::speech::{Speaker, make_speaker};
use crate::store::json_store::JsonStore;
use crate::ui::components::menu::Menu;
use crate::ui::components::practice::Feedback;
use crate::ui::theme::Theme;

/// Pause after a correct quiz answer before the next word is presented.
const CORRECT_ADVANCE_DELAY: Duration = Duration::from_millis(900);
/// Pause after a successful confirm re-type; slightly shorter since the
/// learner already saw the spelling.
const CONFIRM_ADVANCE_DELAY: Duration = Duration::from_millis(700);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Landing,
    Practice,
    Celebrate,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub catalog: WordCatalog,
    pub session: Session,
    pub store: Option<JsonStore>,
    pub speaker: Box<dyn Speaker>,
    pub answer: String,
    pub feedback: Feedback,
    pub last_prompt: Option<String>,
    pub pending_advance: Option<(Instant, Duration)>,
    pub settings_selected: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new() -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.validate();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let store = JsonStore::new().ok();
        let catalog = WordCatalog::load(store.as_ref(), config.words_url.as_deref());
        let lifetime = store
            .as_ref()
            .map(|s| s.load_stats())
            .unwrap_or_default();

        let session = Session::new(config.session_goal, lifetime);
        let speaker = make_speaker(config.speech_enabled, &config.speech_command);

        Self {
            screen: AppScreen::Landing,
            config,
            theme,
            menu,
            catalog,
            session,
            store,
            speaker,
            answer: String::new(),
            feedback: Feedback::None,
            last_prompt: None,
            pending_advance: None,
            settings_selected: 0,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// One discrete turn per user action; nothing is processed while the
    /// post-answer pause is running.
    pub fn is_waiting(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn start_session(&mut self) {
        self.session.stats.reset_session();
        self.screen = AppScreen::Practice;
        self.next_word();
    }

    /// Back to the landing screen with all session-scoped state cleared.
    /// Lifetime stats are untouched.
    pub fn restart_session(&mut self) {
        self.speaker.cancel();
        self.session.restart();
        self.answer.clear();
        self.feedback = Feedback::None;
        self.last_prompt = None;
        self.pending_advance = None;
        self.screen = AppScreen::Landing;
    }

    fn next_word(&mut self) {
        self.session.advance(&self.catalog, &mut self.rng);
        self.answer.clear();
        self.feedback = Feedback::None;
        self.present_current();
    }

    fn present_current(&mut self) {
        if let Some(prompt) = self.session.prompt_text() {
            self.last_prompt = Some(prompt.clone());
            let _ = self.speaker.speak(&prompt);
        }
    }

    /// Re-speak the current prompt without changing any session state.
    pub fn repeat_prompt(&mut self) {
        if self.is_waiting() {
            return;
        }
        match self.last_prompt.clone() {
            Some(prompt) => {
                let _ = self.speaker.speak(&prompt);
            }
            None => self.present_current(),
        }
    }

    pub fn submit_answer(&mut self) {
        if self.is_waiting() || self.screen != AppScreen::Practice {
            return;
        }
        let guess = self.answer.clone();
        let Some(outcome) = self.session.submit(&guess) else {
            return;
        };

        match outcome {
            Outcome::Correct => {
                self.feedback = Feedback::Ok("Correct! Great job.".to_string());
                let _ = self.speaker.speak("Correct! Great job.");
                self.save_stats();
                self.finish_word(CORRECT_ADVANCE_DELAY);
            }
            Outcome::Retry => {
                self.feedback = Feedback::Err("Not quite. Try again.".to_string());
                let _ = self.speaker.speak("Not quite. Try again.");
                // Keep the typed answer so the learner can edit it.
            }
            Outcome::Exhausted => {
                let word = self
                    .session
                    .current
                    .as_ref()
                    .map(|e| e.word.clone())
                    .unwrap_or_default();
                let msg =
                    format!("The correct spelling is \"{word}\". Please type it to continue.");
                self.feedback = Feedback::Err(msg);
                let _ = self
                    .speaker
                    .speak(&format!("The correct spelling is {word}. Please type it to continue."));
                self.save_stats();
                self.answer.clear();
            }
            Outcome::Confirmed => {
                self.feedback = Feedback::Ok("Correct. Let's try the next word.".to_string());
                let _ = self.speaker.speak("Correct. Great job.");
                self.finish_word(CONFIRM_ADVANCE_DELAY);
            }
            Outcome::ConfirmRejected => {
                let word = self
                    .session
                    .current
                    .as_ref()
                    .map(|e| e.word.clone())
                    .unwrap_or_default();
                self.feedback =
                    Feedback::Err(format!("Please type the correct spelling shown: \"{word}\"."));
                let _ = self.speaker.speak("Please type the correct spelling shown.");
                self.answer.clear();
            }
        }
    }

    /// After a completing outcome: celebrate if the goal is reached,
    /// otherwise schedule the delayed advance.
    fn finish_word(&mut self, delay: Duration) {
        if self.session.is_complete() {
            self.screen = AppScreen::Celebrate;
            let _ = self.speaker.speak(&format!(
                "Fantastic work! You spelled {} words correctly!",
                self.session.mastered.len()
            ));
        } else {
            self.pending_advance = Some((Instant::now(), delay));
        }
    }

    pub fn skip_word(&mut self) {
        if self.is_waiting() || self.screen != AppScreen::Practice {
            return;
        }
        let counted = !self.session.mode.is_confirm();
        self.session.skip();
        if counted {
            self.save_stats();
        }
        self.feedback = Feedback::Err("Skipped. Try the next word.".to_string());
        self.next_word();
    }

    /// Tick handler: fire the scheduled advance once its pause has elapsed.
    pub fn on_tick(&mut self) {
        if let Some((since, delay)) = self.pending_advance {
            if since.elapsed() >= delay {
                self.pending_advance = None;
                if self.screen == AppScreen::Practice {
                    self.next_word();
                }
            }
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if self.is_waiting() {
            return;
        }
        self.answer.push(ch);
    }

    pub fn backspace(&mut self) {
        if self.is_waiting() {
            return;
        }
        self.answer.pop();
    }

    /// Best effort: a failed write never interrupts the session.
    fn save_stats(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_stats(self.session.stats.lifetime);
        }
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.session_goal = (self.config.session_goal + 5).min(50);
                self.session.goal = self.config.session_goal;
            }
            1 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = (idx + 1) % themes.len();
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
            }
            2 => {
                self.config.speech_enabled = !self.config.speech_enabled;
                self.speaker =
                    make_speaker(self.config.speech_enabled, &self.config.speech_command);
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.session_goal = self.config.session_goal.saturating_sub(5).max(5);
                self.session.goal = self.config.session_goal;
            }
            1 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if idx == 0 { themes.len() - 1 } else { idx - 1 };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
            }
            2 => {
                self.config.speech_enabled = !self.config.speech_enabled;
                self.speaker =
                    make_speaker(self.config.speech_enabled, &self.config.speech_command);
            }
            _ => {}
        }
    }

    fn reload_theme(&mut self) {
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}
