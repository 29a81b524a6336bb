use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // >=100 cols: text + sidebar, progress bar
    Medium, // 60-99 cols: full-width text, progress bar
    Narrow, // <60 cols: full-width text only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else if area.width >= 60 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_progress_bar(&self, height: u16) -> bool {
        height >= 16 && *self != LayoutTier::Narrow
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                footer: vertical[2],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                sidebar: None,
                footer: vertical[2],
                tier,
            }
        }
    }
}

/// Greedily packs hints into indented rows no wider than `width` chars.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const INDENT: &str = "  ";
    if width == 0 {
        return Vec::new();
    }

    let mut rows: Vec<String> = Vec::new();
    let mut row = String::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let fits = row.is_empty()
            || row.chars().count() + INDENT.len() + hint.chars().count() <= width;
        if !fits {
            rows.push(std::mem::take(&mut row));
        }
        row.push_str(INDENT);
        row.push_str(hint);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Popup of `percent_x` by `percent_y` of `area`, grown to a readable minimum
/// and never larger than `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 56;
    const MIN_HEIGHT: u16 = 14;

    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    let width = width.max(MIN_WIDTH).min(area.width);
    let height = height.max(MIN_HEIGHT).min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_only_when_wide() {
        assert!(AppLayout::new(Rect::new(0, 0, 120, 30)).sidebar.is_some());
        assert!(AppLayout::new(Rect::new(0, 0, 80, 30)).sidebar.is_none());
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 40, 30)), LayoutTier::Narrow);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[Enter] Start", "[Esc] Back", "[Tab] Next"], 28);
        assert_eq!(lines, vec!["  [Enter] Start  [Esc] Back", "  [Tab] Next"]);
        assert!(pack_hint_lines(&["x"], 0).is_empty());
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 50, 10);
        let r = centered_rect(60, 60, area);
        assert_eq!(r, area);
    }
}
