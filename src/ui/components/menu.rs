use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::content::PracticeCategory;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Practice(PracticeCategory),
    CustomText,
    FileUpload,
    ToggleLanguage,
    Logout,
}

impl MenuAction {
    fn label_key(self) -> &'static str {
        match self {
            MenuAction::Practice(PracticeCategory::Chinese) => "menu.chinese",
            MenuAction::Practice(PracticeCategory::English) => "menu.english",
            MenuAction::Practice(PracticeCategory::Wubi) => "menu.wubi",
            MenuAction::CustomText => "menu.custom",
            MenuAction::FileUpload => "menu.upload",
            MenuAction::ToggleLanguage => "menu.language",
            MenuAction::Logout => "menu.logout",
        }
    }

    fn desc_key(self) -> &'static str {
        match self {
            MenuAction::Practice(PracticeCategory::Chinese) => "menu.chinese_desc",
            MenuAction::Practice(PracticeCategory::English) => "menu.english_desc",
            MenuAction::Practice(PracticeCategory::Wubi) => "menu.wubi_desc",
            MenuAction::CustomText => "menu.custom_desc",
            MenuAction::FileUpload => "menu.upload_desc",
            MenuAction::ToggleLanguage => "menu.language_desc",
            MenuAction::Logout => "menu.logout_desc",
        }
    }

    fn shortcut(self) -> char {
        match self {
            MenuAction::Practice(PracticeCategory::Chinese) => '1',
            MenuAction::Practice(PracticeCategory::English) => '2',
            MenuAction::Practice(PracticeCategory::Wubi) => '3',
            MenuAction::CustomText => 't',
            MenuAction::FileUpload => 'f',
            MenuAction::ToggleLanguage => 'l',
            MenuAction::Logout => 'o',
        }
    }
}

/// Localized display name of a practice mode.
pub fn mode_label(category: PracticeCategory) -> String {
    t!(MenuAction::Practice(category).label_key()).to_string()
}

pub struct Menu {
    pub items: Vec<MenuAction>,
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            items: vec![
                MenuAction::Practice(PracticeCategory::Chinese),
                MenuAction::Practice(PracticeCategory::English),
                MenuAction::Practice(PracticeCategory::Wubi),
                MenuAction::CustomText,
                MenuAction::FileUpload,
                MenuAction::ToggleLanguage,
                MenuAction::Logout,
            ],
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected]
    }

    pub fn action_for_key(&self, ch: char) -> Option<MenuAction> {
        self.items.iter().copied().find(|a| a.shortcut() == ch)
    }

    /// Move the highlight onto `category`'s entry.
    pub fn select_mode(&mut self, category: PracticeCategory) {
        if let Some(idx) = self
            .items
            .iter()
            .position(|a| *a == MenuAction::Practice(category))
        {
            self.selected = idx;
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MenuView<'a> {
    pub menu: &'a Menu,
    pub theme: &'a Theme,
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(self.menu.items.iter().map(|_| Constraint::Length(2)))
            .split(layout[1]);

        for (i, (action, row)) in self.menu.items.iter().zip(rows.iter()).enumerate() {
            let is_selected = i == self.menu.selected;
            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let lines = vec![
                Line::from(Span::styled(
                    format!(
                        " {} [{}] {}",
                        if is_selected { ">" } else { " " },
                        action.shortcut(),
                        t!(action.label_key())
                    ),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("       {}", t!(action.desc_key())),
                    Style::default().fg(colors.text_pending()),
                )),
            ];
            Paragraph::new(lines).render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_directions() {
        let mut menu = Menu::new();
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Logout);
        menu.next();
        assert_eq!(menu.selected_action(), MenuAction::Practice(PracticeCategory::Chinese));
    }

    #[test]
    fn shortcuts_are_unique() {
        let menu = Menu::new();
        for (i, a) in menu.items.iter().enumerate() {
            for b in &menu.items[i + 1..] {
                assert_ne!(a.shortcut(), b.shortcut());
            }
        }
        assert_eq!(
            menu.action_for_key('3'),
            Some(MenuAction::Practice(PracticeCategory::Wubi))
        );
        assert_eq!(menu.action_for_key('z'), None);
    }

    #[test]
    fn select_mode_moves_highlight() {
        let mut menu = Menu::new();
        menu.select_mode(PracticeCategory::English);
        assert_eq!(menu.selected_action(), MenuAction::Practice(PracticeCategory::English));
    }
}
