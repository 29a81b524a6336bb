use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::content::PracticeCategory;
use crate::session::drill::DrillState;
use crate::session::result::{DrillResult, PracticeResults};
use crate::ui::components::dashboard::{accuracy_color, speed_unit};
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    drill: &'a DrillState,
    category: Option<PracticeCategory>,
    previous: Option<&'a DrillResult>,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        drill: &'a DrillState,
        category: Option<PracticeCategory>,
        previous: Option<&'a DrillResult>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            drill,
            category,
            previous,
            theme,
        }
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let unit = speed_unit(self.category);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(if self.previous.is_some() { 8 } else { 0 }),
            ])
            .split(area);

        let row = |label: String, value: String, color: Color| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(colors.fg())),
                Span::styled(value, Style::default().fg(color)),
            ])
        };

        let accuracy = self.drill.accuracy();
        let lines = vec![
            row(
                t!("stats.speed").to_string(),
                format!("{:.0} {unit}", self.drill.speed(self.category)),
                colors.accent(),
            ),
            Line::from(""),
            row(
                t!("stats.accuracy").to_string(),
                format!("{accuracy:.1}%"),
                accuracy_color(colors, accuracy),
            ),
            Line::from(""),
            row(
                t!("stats.progress").to_string(),
                format!("{:.0}%", self.drill.progress() * 100.0),
                colors.accent(),
            ),
            row(
                t!("stats.errors").to_string(),
                self.drill.typo_count().to_string(),
                colors.error(),
            ),
            Line::from(""),
            row(
                t!("stats.time").to_string(),
                format!("{:.1}s", self.drill.elapsed_secs()),
                colors.fg(),
            ),
        ];
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(t!("stats.title").to_string())
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(sections[0], buf);

        if let Some(last) = self.previous {
            let prev = PracticeResults::from_drill(last);
            let lines = vec![
                row(
                    t!("stats.speed").to_string(),
                    format!("{:.0} {}", prev.speed, speed_unit(last.category)),
                    colors.accent(),
                ),
                row(
                    t!("stats.accuracy").to_string(),
                    format!("{:.1}%", prev.accuracy),
                    accuracy_color(colors, prev.accuracy),
                ),
                row(
                    t!("stats.time").to_string(),
                    format!("{:.1}s", prev.time),
                    colors.fg(),
                ),
            ];
            Paragraph::new(lines)
                .block(
                    Block::bordered()
                        .title(t!("stats.previous").to_string())
                        .border_style(Style::default().fg(colors.border()))
                        .style(Style::default().bg(colors.bg())),
                )
                .render(sections[1], buf);
        }
    }
}
