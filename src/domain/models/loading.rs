use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::services::Theme;

const FRAMES: [&str; 3] = ["● ○ ○", "○ ● ○", "○ ○ ●"];

/// Typing indicator shown while an answer is pending.
#[derive(Default)]
pub struct Loading {
    frame: usize,
}

impl Loading {
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn dots(&self) -> &'static str {
        return FRAMES[self.frame];
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, theme: &Theme) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.dots(), Style::default().fg(theme.accent)),
            Span::styled(" Thinking...", Style::default().fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line), rect);
    }
}
