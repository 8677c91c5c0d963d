#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use super::Theme;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    theme: &'a Theme,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut res = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        res.push(c);
    }

    return res;
}

fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    let mut current = String::new();
    let mut started = false;

    for word in line.split(' ') {
        if started && current.width() + 1 + word.width() > max_width {
            lines.push(current.trim_end().to_string());
            current = String::new();
            started = false;
        }

        if started {
            current.push(' ');
        }
        current.push_str(word);
        started = true;

        // Words longer than a full line are hard broken.
        while current.width() > max_width {
            let mut head = truncate_to_width(&current, max_width);
            if head.is_empty() {
                head = current
                    .chars()
                    .next()
                    .map(|c| return c.to_string())
                    .unwrap_or_default();
            }
            current = current[head.len()..].to_string();
            lines.push(head);
        }
    }

    lines.push(current.trim_end().to_string());

    return lines;
}

/// Word wraps `text` so that no line is wider than `max_width` columns.
/// Blank lines are kept.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);

    return text
        .split('\n')
        .flat_map(|line| {
            return wrap_line(line.trim_end_matches('\r'), max_width);
        })
        .collect();
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        theme: &'a Theme,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            theme,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // left border + left padding + (text, not counted) + right padding + right border.
            border_elements_length: 4,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let text_style = self.text_style();

        let lines = wrap_text(&self.message.text, max_line_length)
            .into_iter()
            .map(|line| {
                return self.spans_to_line(vec![Span::styled(line, text_style)], max_line_length);
            })
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let line_width: usize = spans.iter().map(|e| return e.width()).sum();
        let fill = " ".repeat(max_line_length.saturating_sub(line_width));

        let mut wrapped_spans = vec![self.border_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.border_span(format!("{fill} │")));

        return self.align(wrapped_spans, max_line_length);
    }

    fn align(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let bubble_width = max_line_length + Bubble::style_config().border_elements_length;
        let outer_bubble_padding =
            Span::from(" ".repeat(self.window_max_width.saturating_sub(bubble_width)));

        if self.alignment == BubbleAlignment::Left {
            spans.push(outer_bubble_padding);
            return Line::from(spans);
        }

        let mut line_spans = vec![outer_bubble_padding];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available_length = self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(1);

        let longest_line = self
            .message
            .text
            .split('\n')
            .map(|line| {
                return line.trim_end_matches('\r').width();
            })
            .max()
            .unwrap_or(0);

        // The title sits in the top border, which is 2 columns wider than the text.
        let title_length = self.title_width().saturating_sub(2);

        return longest_line.max(title_length).clamp(1, available_length);
    }

    fn title_segments(&self) -> Vec<(String, Style)> {
        let mut segments = vec![
            (
                self.message.author.to_string(),
                self.border_style().add_modifier(Modifier::BOLD),
            ),
            (
                format!(" · {}", self.message.formatted_time()),
                Style::default().fg(self.theme.muted),
            ),
        ];

        if let Some(label) = self.message.confidence_label() {
            segments.push((
                format!(" · {label}"),
                Style::default().fg(self.theme.badge),
            ));
        }

        return segments;
    }

    fn title_width(&self) -> usize {
        return self
            .title_segments()
            .iter()
            .map(|(text, _)| return text.width())
            .sum();
    }

    fn title_spans(&self, max_width: usize) -> Vec<Span<'static>> {
        let mut remaining = max_width;
        let mut spans = vec![];
        for (text, style) in self.title_segments() {
            let truncated = truncate_to_width(&text, remaining);
            if truncated.is_empty() {
                break;
            }
            remaining -= truncated.width();
            spans.push(Span::styled(truncated, style));
        }

        return spans;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the padding next to the vertical bars.
        let inner_length = max_line_length + 2;

        let mut top_bar = vec![self.border_span("╭".to_string())];
        let title_spans = self.title_spans(inner_length);
        let title_width: usize = title_spans.iter().map(|e| return e.width()).sum();
        top_bar.extend(title_spans);
        top_bar.push(self.border_span(format!(
            "{}╮",
            "─".repeat(inner_length.saturating_sub(title_width))
        )));

        let bottom_bar = vec![self.border_span(format!("╰{}╯", "─".repeat(inner_length)))];

        let mut res = vec![self.align(top_bar, max_line_length)];
        res.extend(lines);
        res.push(self.align(bottom_bar, max_line_length));

        return res;
    }

    fn border_style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style::default().fg(self.theme.error);
        }
        if self.message.author == Author::User {
            return Style::default().fg(self.theme.user);
        }

        return Style::default().fg(self.theme.bot);
    }

    fn text_style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style::default().fg(self.theme.error);
        }

        return Style::default().fg(self.theme.text);
    }

    fn border_span(&self, text: String) -> Span<'static> {
        return Span::styled(text, self.border_style());
    }
}
