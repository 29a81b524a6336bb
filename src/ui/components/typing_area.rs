use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::drill::DrillState;
use crate::session::input::CharStatus;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    drill: &'a DrillState,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(drill: &'a DrillState, theme: &'a Theme) -> Self {
        Self { drill, theme }
    }
}

/// One target character as drawn on screen.
struct RenderToken {
    target_idx: usize,
    display: String,
    is_line_break: bool,
}

fn build_render_tokens(target: &[char]) -> Vec<RenderToken> {
    target
        .iter()
        .enumerate()
        .map(|(i, &ch)| match ch {
            '\n' => RenderToken {
                target_idx: i,
                display: "\u{21b5}".to_string(),
                is_line_break: true,
            },
            // Ideographic space is invisible on most terminals.
            '\u{3000}' => RenderToken {
                target_idx: i,
                display: "\u{00b7}\u{00b7}".to_string(),
                is_line_break: false,
            },
            _ => RenderToken {
                target_idx: i,
                display: ch.to_string(),
                is_line_break: false,
            },
        })
        .collect()
}

/// Mistyped whitespace keeps its marker so line breaks stay where they are.
fn is_whitespace_marker(ch: char) -> bool {
    matches!(ch, '\n' | '\u{3000}' | ' ')
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let drill = self.drill;
        let tokens = build_render_tokens(&drill.target);

        let mut lines: Vec<Vec<Span>> = vec![Vec::new()];
        for token in &tokens {
            let idx = token.target_idx;
            let status = drill.input.get(idx).filter(|_| idx < drill.cursor);

            let style = match status {
                Some(CharStatus::Correct) => Style::default().fg(colors.text_correct()),
                Some(CharStatus::Incorrect(_)) => Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
                None if idx == drill.cursor => Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
                None => Style::default().fg(colors.text_pending()),
            };

            let display = match status {
                Some(CharStatus::Incorrect(actual))
                    if !is_whitespace_marker(drill.target[idx]) && !actual.is_control() =>
                {
                    actual.to_string()
                }
                _ => token.display.clone(),
            };

            if let Some(line) = lines.last_mut() {
                line.push(Span::styled(display, style));
            }
            if token.is_line_break {
                lines.push(Vec::new());
            }
        }

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
