use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Session;
use crate::ui::theme::Theme;

/// User-visible answer feedback for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    None,
    Ok(String),
    Err(String),
}

/// The practice screen: masked example sentence (or the revealed spelling in
/// confirm mode), the answer input line, feedback, and the session tally.
pub struct PracticeView<'a> {
    session: &'a Session,
    answer: &'a str,
    feedback: &'a Feedback,
    audio_available: bool,
    theme: &'a Theme,
}

impl<'a> PracticeView<'a> {
    pub fn new(
        session: &'a Session,
        answer: &'a str,
        feedback: &'a Feedback,
        audio_available: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            answer,
            feedback,
            audio_available,
            theme,
        }
    }
}

/// Replace each occurrence of `word` in `sentence` with underscores so the
/// learner can read the context without seeing the spelling.
pub fn mask_word(sentence: &str, word: &str) -> String {
    if word.is_empty() {
        return sentence.to_string();
    }
    let blank = "_".repeat(word.chars().count());
    let lower_sentence = sentence.to_lowercase();
    let lower_word = word.to_lowercase();
    // Lowercasing can shift byte offsets for some scripts; skip masking then
    if lower_sentence.len() != sentence.len() {
        return sentence.to_string();
    }

    let mut out = String::with_capacity(sentence.len());
    let mut pos = 0;
    while let Some(found) = lower_sentence[pos..].find(&lower_word) {
        let start = pos + found;
        out.push_str(&sentence[pos..start]);
        out.push_str(&blank);
        pos = start + lower_word.len();
    }
    out.push_str(&sentence[pos..]);
    out
}

impl Widget for PracticeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Practice ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // hint
                Constraint::Length(3), // sentence / reveal
                Constraint::Length(2), // answer input
                Constraint::Length(2), // feedback
                Constraint::Min(0),
                Constraint::Length(1), // stats
            ])
            .split(inner);

        let hint = if self.audio_available {
            "Listen to the word and example sentence."
        } else {
            "Audio unavailable. Use the sentence below."
        };
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        if let Some(current) = &self.session.current {
            let sentence_line = if self.session.mode.is_confirm() {
                Line::from(vec![
                    Span::styled(
                        "The correct spelling is ",
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled(
                        format!("\"{}\"", current.word),
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        ". Type it to continue.",
                        Style::default().fg(colors.fg()),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    mask_word(&current.example, &current.word),
                    Style::default().fg(colors.fg()),
                ))
            };
            Paragraph::new(sentence_line)
                .alignment(Alignment::Center)
                .render(layout[1], buf);
        }

        let answer_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.accent())),
            Span::styled(self.answer, Style::default().fg(colors.fg())),
            Span::styled(
                "█",
                Style::default().fg(colors.accent()),
            ),
        ]);
        Paragraph::new(answer_line)
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        let feedback_line = match self.feedback {
            Feedback::None => Line::from(""),
            Feedback::Ok(msg) => Line::from(Span::styled(
                msg.as_str(),
                Style::default()
                    .fg(colors.ok())
                    .add_modifier(Modifier::BOLD),
            )),
            Feedback::Err(msg) => Line::from(Span::styled(
                msg.as_str(),
                Style::default().fg(colors.err()),
            )),
        };
        Paragraph::new(feedback_line)
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        let stats_text = format!(
            " {} | mastered {}/{} ",
            self.session.stats.session.summary(),
            self.session.mastered.len(),
            self.session.goal,
        );
        Paragraph::new(Line::from(Span::styled(
            stats_text,
            Style::default().fg(colors.muted()),
        )))
        .render(layout[5], buf);
    }
}
