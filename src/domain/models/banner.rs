use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use crate::domain::services::wrap_text;
use crate::domain::services::Theme;

const ICON: &str = "⚠ ";

/// Dismissable error banner drawn above the transcript.
pub struct Banner {}

impl Banner {
    /// Rows needed to draw `text` inside the banner borders at `width`.
    pub fn height(text: &str, width: u16) -> u16 {
        let inner_width = usize::from(width.saturating_sub(2)).max(1);
        let rows = wrap_text(&format!("{ICON}{text}"), inner_width).len();

        return u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    }

    pub fn render(frame: &mut Frame, rect: Rect, text: &str, theme: &Theme) {
        let style = Style::default().fg(theme.error);
        let line = Line::from(vec![
            Span::styled(ICON, style.add_modifier(Modifier::BOLD)),
            Span::styled(text.to_string(), style),
        ]);

        frame.render_widget(
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Thick)
                        .border_style(style)
                        .title_bottom(Line::from(" Esc to dismiss ").alignment(Alignment::Right)),
                ),
            rect,
        );
    }
}
