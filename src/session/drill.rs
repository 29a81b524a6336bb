use std::collections::HashSet;
use std::time::Instant;

use icu_normalizer::ComposingNormalizerBorrowed;

use crate::content::PracticeCategory;
use crate::session::input::CharStatus;

/// Positions skipped in one keystroke by a mistyped Enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticSpan {
    pub start: usize,
    pub end: usize,
}

/// Typing progress over one practice text.
pub struct DrillState {
    pub target: Vec<char>,
    pub input: Vec<CharStatus>,
    pub cursor: usize,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    /// Positions that were ever typed wrong, even if corrected later.
    pub typo_flags: HashSet<usize>,
    pub synthetic_spans: Vec<SyntheticSpan>,
}

impl DrillState {
    /// The target is NFC-normalized so IME-composed input matches decomposed source text.
    pub fn new(text: &str) -> Self {
        let target = ComposingNormalizerBorrowed::new_nfc()
            .normalize(text)
            .chars()
            .collect();
        Self {
            target,
            input: Vec::new(),
            cursor: 0,
            started_at: None,
            finished_at: None,
            typo_flags: HashSet::new(),
            synthetic_spans: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.target.len()
    }

    pub fn elapsed_secs(&self) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let end = self.finished_at.unwrap_or_else(Instant::now);
        end.saturating_duration_since(start).as_secs_f64()
    }

    pub fn correct_count(&self) -> usize {
        self.input
            .iter()
            .filter(|s| matches!(s, CharStatus::Correct))
            .count()
    }

    /// `units` scaled to a per-minute rate; zero during the first tenth of a second.
    fn per_minute(&self, units: f64) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed < 0.1 {
            0.0
        } else {
            units * 60.0 / elapsed
        }
    }

    /// Five correct characters make a word.
    pub fn wpm(&self) -> f64 {
        self.per_minute(self.correct_count() as f64 / 5.0)
    }

    pub fn cpm(&self) -> f64 {
        self.per_minute(self.correct_count() as f64)
    }

    /// WPM for English, CPM for the Chinese modes and unknown modes.
    pub fn speed(&self, category: Option<PracticeCategory>) -> f64 {
        match category {
            Some(c) if c.measures_words() => self.wpm(),
            _ => self.cpm(),
        }
    }

    pub fn typo_count(&self) -> usize {
        self.typo_flags.len()
    }

    /// Share of typed positions never typed wrong.
    pub fn accuracy(&self) -> f64 {
        if self.cursor == 0 {
            return 100.0;
        }
        let clean = (0..self.cursor)
            .filter(|pos| !self.typo_flags.contains(pos))
            .count();
        clean as f64 * 100.0 / self.cursor as f64
    }

    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.target.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input;

    #[test]
    fn test_new_drill() {
        let drill = DrillState::new("你好");
        assert_eq!(drill.target.len(), 2);
        assert_eq!(drill.cursor, 0);
        assert!(!drill.is_complete());
        assert_eq!(drill.progress(), 0.0);
    }

    #[test]
    fn test_target_is_nfc_normalized() {
        // "e" + combining acute composes to a single char.
        let drill = DrillState::new("cafe\u{0301}");
        assert_eq!(drill.target, vec!['c', 'a', 'f', '\u{00e9}']);
    }

    #[test]
    fn test_speed_unit_depends_on_category() {
        let mut drill = DrillState::new("0123456789");
        let now = Instant::now();
        drill.started_at = Some(now);
        drill.finished_at = Some(now + std::time::Duration::from_secs(60));
        drill.input = vec![CharStatus::Correct; 10];
        drill.cursor = 10;
        assert!((drill.speed(Some(PracticeCategory::English)) - 2.0).abs() < 1e-9);
        assert!((drill.speed(Some(PracticeCategory::Chinese)) - 10.0).abs() < 1e-9);
        assert_eq!(drill.speed(None), drill.cpm());
    }

    #[test]
    fn test_accuracy_starts_at_100() {
        let drill = DrillState::new("test");
        assert_eq!(drill.accuracy(), 100.0);
    }

    #[test]
    fn test_empty_drill_progress() {
        let drill = DrillState::new("");
        assert!(drill.is_complete());
        assert_eq!(drill.progress(), 0.0);
    }

    #[test]
    fn test_correct_typing_no_typos() {
        let mut drill = DrillState::new("北国风光");
        for ch in "北国风光".chars() {
            input::process_char(&mut drill, ch);
        }
        assert!(drill.typo_flags.is_empty());
        assert_eq!(drill.accuracy(), 100.0);
        assert!(drill.is_complete());
        assert!(drill.finished_at.is_some());
    }

    #[test]
    fn test_wrong_then_backspace_then_correct_counts_as_error() {
        let mut drill = DrillState::new("abc");
        input::process_char(&mut drill, 'x');
        assert!(drill.typo_flags.contains(&0));
        input::process_backspace(&mut drill);
        assert!(drill.typo_flags.contains(&0));
        input::process_char(&mut drill, 'a');
        assert_eq!(drill.typo_count(), 1);
        assert!(drill.accuracy() < 100.0);
    }

    #[test]
    fn test_multiple_errors_same_position_counts_as_one() {
        let mut drill = DrillState::new("abc");
        input::process_char(&mut drill, 'x');
        input::process_backspace(&mut drill);
        input::process_char(&mut drill, 'y');
        input::process_backspace(&mut drill);
        input::process_char(&mut drill, 'a');
        assert_eq!(drill.typo_count(), 1);
    }

    #[test]
    fn test_wrong_enter_skips_line_and_backspace_collapses() {
        let mut drill = DrillState::new("abcd\nef");
        input::process_char(&mut drill, 'a');

        input::process_char(&mut drill, '\n');
        assert_eq!(drill.cursor, 5);
        for pos in 1..5 {
            assert!(drill.typo_flags.contains(&pos));
        }

        input::process_backspace(&mut drill);
        assert_eq!(drill.cursor, 1);
        assert_eq!(drill.typo_count(), 1);
        assert!(drill.typo_flags.contains(&1));
    }

    #[test]
    fn test_wrong_enter_on_last_line_runs_to_end() {
        let mut drill = DrillState::new("abc");
        input::process_char(&mut drill, '\n');
        assert!(drill.is_complete());
        assert_eq!(drill.typo_count(), 3);
    }

    #[test]
    fn test_correct_enter_skips_blank_lines_and_indent() {
        let mut drill = DrillState::new("end.\n\n\u{3000}\u{3000}next");
        for ch in "end.".chars() {
            input::process_char(&mut drill, ch);
        }
        input::process_char(&mut drill, '\n');
        assert_eq!(drill.target[drill.cursor], 'n');
        assert_eq!(drill.typo_count(), 0);
        assert_eq!(drill.accuracy(), 100.0);
    }
}
