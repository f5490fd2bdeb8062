mod app;
mod catalog;
mod config;
mod event;
mod session;
mod speech;
mod store;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::celebrate::CelebrateView;
use ui::components::practice::PracticeView;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "spellstr", version, about = "Terminal spelling practice with spoken prompts")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Words to master before the session completes")]
    goal: Option<usize>,

    #[arg(long, help = "Disable spoken prompts")]
    no_speech: bool,

    #[arg(long, help = "URL of a remote word list")]
    words_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(goal) = cli.goal {
        app.config.session_goal = goal.clamp(1, 100);
        app.session.goal = app.config.session_goal;
    }
    if cli.no_speech {
        app.config.speech_enabled = false;
        app.speaker = speech::make_speaker(false, &app.config.speech_command);
    }
    if let Some(url) = cli.words_url {
        app.config.words_url = Some(url);
        app.catalog = catalog::WordCatalog::load(
            app.store.as_ref(),
            app.config.words_url.as_deref(),
        );
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Landing => handle_landing_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Celebrate => handle_celebrate_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_landing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => app.start_session(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.start_session(),
            1 => app.go_to_settings(),
            2 => app.should_quit = true,
            _ => {}
        },
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    // Repeat and skip are control chords so plain letters stay typeable
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => app.repeat_prompt(),
            KeyCode::Char('s') => app.skip_word(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.restart_session(),
        KeyCode::Enter => app.submit_answer(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_celebrate_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => {
            app.restart_session();
            app.start_session();
        }
        KeyCode::Char('q') | KeyCode::Esc => app.restart_session(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.screen = AppScreen::Landing;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 2 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Landing => render_landing(frame, app),
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Celebrate => render_celebrate(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_landing(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header_info = format!(" All time: {}", app.session.stats.lifetime.summary());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " spellstr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " [s/Enter] Start  [c] Settings  [q] Quit ",
        Style::default().fg(colors.muted()),
    )]));
    frame.render_widget(footer, layout[2]);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let app_layout = AppLayout::new(area);

    let header_text = format!(
        " Practice | goal {} words | {} ",
        app.session.goal,
        app.session.stats.session.summary(),
    );
    let header = Paragraph::new(Line::from(Span::styled(
        &*header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let practice = PracticeView::new(
        &app.session,
        &app.answer,
        &app.feedback,
        app.speaker.is_available(),
        app.theme,
    );
    frame.render_widget(practice, app_layout.main);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Enter] Submit  [Ctrl+R] Hear again  [Ctrl+S] Skip  [Esc] End session ",
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_celebrate(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let centered = ui::layout::centered_rect(60, 60, area);
    let view = CelebrateView::new(&app.session, app.theme);
    frame.render_widget(view, centered);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Session Goal".to_string(),
            format!("{} words", app.config.session_goal),
        ),
        ("Theme".to_string(), app.config.theme.clone()),
        (
            "Speech".to_string(),
            if app.config.speech_enabled { "on" } else { "off" }.to_string(),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });

        let value_style = Style::default().fg(if is_selected {
            colors.celebrate()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
