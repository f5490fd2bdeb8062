use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::Session;
use crate::ui::theme::Theme;

/// Terminal screen shown once the session goal is reached.
pub struct CelebrateView<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> CelebrateView<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for CelebrateView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.celebrate()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(6),
                Constraint::Min(1),
            ])
            .split(inner);

        let lines = vec![
            Line::from(Span::styled(
                "Fantastic work!",
                Style::default()
                    .fg(colors.celebrate())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "You spelled {} words correctly!",
                    self.session.mastered.len()
                ),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                self.session.stats.session.summary(),
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[r] Practice again  [q] Back to menu",
                Style::default().fg(colors.muted()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);
    }
}
