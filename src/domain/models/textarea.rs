use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

use crate::domain::services::Theme;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Ask your health question...");
        textarea.set_block(TextArea::block("Ask a question", Style::default()));

        return textarea;
    }

    /// Restyles the input row from the session state. While an answer is
    /// pending the row is dimmed and the cursor hidden.
    pub fn sync(
        textarea: &mut tui_textarea::TextArea<'a>,
        waiting_for_answer: bool,
        can_submit: bool,
        theme: &Theme,
    ) {
        if waiting_for_answer {
            let muted = Style::default().fg(theme.muted);
            textarea.set_block(TextArea::block("Waiting for an answer", muted));
            textarea.set_style(muted);
            textarea.set_cursor_style(Style::default());
            return;
        }

        let mut title = "Ask a question";
        if can_submit {
            title = "Press Enter to send";
        }

        textarea.set_block(TextArea::block(title, Style::default().fg(theme.accent)));
        textarea.set_style(Style::default().fg(theme.text));
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    }

    fn block(title: &'a str, border_style: Style) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }
}
