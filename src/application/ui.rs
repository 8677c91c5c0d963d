#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Margin;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Banner;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Theme;
use crate::domain::services::Themes;

const TITLE: &str = "Medical Health Assistant";
const SUBTITLE: &str = "Ask me anything about health and wellness.";
const DISCLAIMER: &str = "General information only, not medical advice. Consult a healthcare professional.";
const MAX_INPUT_LINES: u16 = 5;

fn render_header(frame: &mut Frame, rect: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {TITLE}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" · {SUBTITLE}"), Style::default().fg(theme.muted)),
    ]);

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_footer(frame: &mut Frame, rect: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            DISCLAIMER,
            Style::default().fg(theme.muted),
        )))
        .centered(),
        rect,
    );
}

/// Draws the whole chat screen from the session state, top to bottom:
/// header, error banner, transcript, loading indicator, input row and
/// disclaimer.
pub fn render(
    frame: &mut Frame,
    app_state: &mut AppState,
    textarea: &mut tui_textarea::TextArea,
    loading: &Loading,
) {
    let theme = app_state.theme.clone();
    let area = frame.area();

    TextArea::sync(
        textarea,
        app_state.waiting_for_answer,
        app_state.can_submit(),
        &theme,
    );

    let mut banner_height = 0;
    if let Some(last_error) = &app_state.last_error {
        banner_height = Banner::height(last_error, area.width);
    }

    let mut loading_height = 0;
    if app_state.waiting_for_answer {
        loading_height = 1;
    }

    let input_height = u16::try_from(textarea.lines().len())
        .unwrap_or(MAX_INPUT_LINES)
        .clamp(1, MAX_INPUT_LINES)
        + 2;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(loading_height),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, layout[0], &theme);

    if let Some(last_error) = &app_state.last_error {
        Banner::render(frame, layout[1], last_error, &theme);
    }

    // Last column is kept for the scrollbar.
    let transcript = Rect {
        width: layout[2].width.saturating_sub(1),
        ..layout[2]
    };
    if transcript.width != app_state.last_known_width
        || transcript.height != app_state.last_known_height
    {
        app_state.set_rect(transcript);
    }

    app_state
        .bubble_list
        .render(frame, transcript, app_state.scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[2].inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );

    if app_state.waiting_for_answer {
        loading.render(frame, layout[3], &theme);
    }

    frame.render_widget(&*textarea, layout[4]);
    render_footer(frame, layout[5], &theme);
}

fn sync_draft(app_state: &mut AppState, textarea: &tui_textarea::TextArea) {
    app_state.update_draft(&textarea.lines().join("\n"));
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let mut loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str("What is fever?");
        sync_draft(app_state, &textarea);
    }

    tx.send(Action::HealthCheck())?;

    loop {
        terminal.draw(|frame| {
            render(frame, app_state, &mut textarea, &loading);
        })?;

        match events.next().await? {
            Event::AnswerReceived(answer) => {
                app_state.handle_answer(answer);
            }
            Event::AnswerFailed(reason) => {
                app_state.handle_failure(&reason);
            }
            Event::ServiceUnavailable(url) => {
                app_state.handle_service_unavailable(&url);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEsc() => {
                app_state.dismiss_error();
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                if app_state.submit(&input_str, &tx)? {
                    textarea = TextArea::default();
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_answer {
                    textarea.input(input);
                    sync_draft(app_state, &textarea);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_answer {
                    textarea.insert_str(text.replace('\r', "\n"));
                    sync_draft(app_state, &textarea);
                }
            }
            Event::UIResize() => {}
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                loading.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let theme = Themes::get(&Config::get(ConfigKey::Theme))?;
    let mut app_state = AppState::new(theme);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
