use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct FormField<'a> {
    pub label: String,
    pub input: &'a LineInput,
}

/// Bordered box of labelled single-line fields with an error line and a hint row.
pub struct Form<'a> {
    title: String,
    fields: Vec<FormField<'a>>,
    focused: usize,
    error: Option<String>,
    hint: String,
    theme: &'a Theme,
}

impl<'a> Form<'a> {
    pub fn new(title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            focused: 0,
            error: None,
            hint: String::new(),
            theme,
        }
    }

    pub fn field(mut self, label: impl Into<String>, input: &'a LineInput) -> Self {
        self.fields.push(FormField {
            label: label.into(),
            input,
        });
        self
    }

    pub fn focused(mut self, idx: usize) -> Self {
        self.focused = idx;
        self
    }

    pub fn error(mut self, message: Option<&str>) -> Self {
        self.error = message.map(str::to_string);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

impl Widget for Form<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(4)).collect();
        constraints.push(Constraint::Min(2));
        constraints.push(Constraint::Length(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focused;
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(3)])
                .split(rows[i]);

            let label_style = if focused {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            Paragraph::new(Line::from(Span::styled(format!(" {}", field.label), label_style)))
                .render(parts[0], buf);

            let (before, at, after) = field.input.display_parts();
            let mut spans = vec![Span::styled(before, Style::default().fg(colors.fg()))];
            if focused {
                spans.push(Span::styled(
                    at.map(String::from).unwrap_or_else(|| " ".to_string()),
                    Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                ));
            } else if let Some(ch) = at {
                spans.push(Span::styled(ch.to_string(), Style::default().fg(colors.fg())));
            }
            spans.push(Span::styled(after, Style::default().fg(colors.fg())));

            let border = if focused {
                colors.border_focused()
            } else {
                colors.border()
            };
            Paragraph::new(Line::from(spans))
                .block(Block::bordered().border_style(Style::default().fg(border)))
                .render(parts[1], buf);
        }

        let message_row = rows[self.fields.len()];
        if let Some(message) = &self.error {
            Paragraph::new(Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(colors.error()),
            )))
            .wrap(Wrap { trim: false })
            .render(message_row, buf);
        }

        Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.hint),
            Style::default().fg(colors.text_pending()),
        )))
        .render(rows[self.fields.len() + 1], buf);
    }
}
