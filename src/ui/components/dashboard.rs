use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::content::PracticeCategory;
use crate::session::result::{DrillResult, PracticeResults};
use crate::ui::theme::{Theme, ThemeColors};

/// Localized unit for the speed figure of `category`.
pub fn speed_unit(category: Option<PracticeCategory>) -> String {
    match category {
        Some(c) if c.measures_words() => t!("unit.wpm").to_string(),
        _ => t!("unit.cpm").to_string(),
    }
}

pub fn accuracy_color(colors: &ThemeColors, accuracy: f64) -> Color {
    if accuracy >= 95.0 {
        colors.success()
    } else if accuracy >= 85.0 {
        colors.warning()
    } else {
        colors.error()
    }
}

/// Results screen shown after a drill ends.
pub struct Dashboard<'a> {
    pub result: &'a DrillResult,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a DrillResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;
        let summary = PracticeResults::from_drill(result);

        let block = Block::bordered()
            .title(t!("results.title").to_string())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let mut title_spans = vec![Span::styled(
            t!("results.heading").to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if result.partial {
            title_spans.push(Span::styled(
                t!("results.partial", percent = format!("{:.0}", result.completion_percent))
                    .to_string(),
                Style::default().fg(colors.text_pending()),
            ));
        }
        Paragraph::new(Line::from(title_spans))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let label = |key: String| Span::styled(format!("  {key:<10}"), Style::default().fg(colors.fg()));

        Paragraph::new(Line::from(vec![
            label(t!("stats.speed").to_string()),
            Span::styled(
                format!("{:.0} {}", summary.speed, speed_unit(result.category)),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            label(t!("stats.accuracy").to_string()),
            Span::styled(
                format!("{:.1}%", summary.accuracy),
                Style::default()
                    .fg(accuracy_color(colors, summary.accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{})", result.correct, result.total_chars),
                Style::default().fg(colors.text_pending()),
            ),
        ]))
        .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            label(t!("stats.time").to_string()),
            Span::styled(format!("{:.1}s", summary.time), Style::default().fg(colors.fg())),
        ]))
        .render(layout[3], buf);

        Paragraph::new(Line::from(vec![
            label(t!("stats.errors").to_string()),
            Span::styled(
                result.incorrect.to_string(),
                Style::default().fg(if result.incorrect == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]))
        .render(layout[4], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", t!("results.help")),
            Style::default().fg(colors.accent()),
        )))
        .render(layout[6], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::drill::DrillState;
    use crate::session::input;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn unit_follows_category() {
        rust_i18n::set_locale("en");
        assert_eq!(speed_unit(Some(PracticeCategory::English)), "WPM");
        assert_eq!(speed_unit(Some(PracticeCategory::Wubi)), "CPM");
        assert_eq!(speed_unit(None), "CPM");
    }

    #[test]
    fn renders_error_count() {
        rust_i18n::set_locale("en");
        let mut drill = DrillState::new("ab");
        input::process_char(&mut drill, 'x');
        input::process_char(&mut drill, 'b');
        let result = DrillResult::from_drill(&drill, Some(PracticeCategory::English), false);

        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        Dashboard::new(&result, &theme).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Errors"));
        assert!(text.contains("50.0%"));
    }
}
