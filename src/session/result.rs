use chrono::{DateTime, Utc};

use crate::content::PracticeCategory;
use crate::session::drill::DrillState;

#[derive(Clone, Debug)]
pub struct DrillResult {
    pub wpm: f64,
    pub cpm: f64,
    pub accuracy: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub total_chars: usize,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
    pub category: Option<PracticeCategory>,
    pub partial: bool,
    pub completion_percent: f64,
}

impl DrillResult {
    pub fn from_drill(drill: &DrillState, category: Option<PracticeCategory>, partial: bool) -> Self {
        // A partial drill is scored over what was typed, a full one over the whole text.
        let total_chars = if partial {
            drill.cursor
        } else {
            drill.target.len()
        };
        let typo_count = drill
            .typo_flags
            .iter()
            .filter(|&&pos| pos < total_chars)
            .count();
        let accuracy = if total_chars > 0 {
            ((total_chars - typo_count) as f64 / total_chars as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        Self {
            wpm: drill.wpm(),
            cpm: drill.cpm(),
            accuracy,
            correct: total_chars - typo_count,
            incorrect: typo_count,
            total_chars,
            elapsed_secs: drill.elapsed_secs(),
            timestamp: Utc::now(),
            category,
            partial,
            completion_percent: (drill.progress() * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Summary kept in the session after each drill.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PracticeResults {
    /// WPM for English, characters per minute for the Chinese modes.
    pub speed: f64,
    pub accuracy: f64,
    /// Elapsed seconds.
    pub time: f64,
}

impl PracticeResults {
    pub fn from_drill(result: &DrillResult) -> Self {
        let speed = match result.category {
            Some(category) if category.measures_words() => result.wpm,
            _ => result.cpm,
        };
        Self {
            speed,
            accuracy: result.accuracy,
            time: result.elapsed_secs,
        }
    }
}
