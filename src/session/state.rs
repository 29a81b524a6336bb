use crate::content::PracticeCategory;
use crate::content::selector::{ContentRequest, ContentSelector, RandomSource, Selection};
use crate::session::result::PracticeResults;

/// Per-run session data. Nothing here outlives the process.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub selected_mode: Option<PracticeCategory>,
    pub practice_content: Option<String>,
    pub practice_results: PracticeResults,
    /// Single value shared by all categories.
    pub last_used_text: Option<String>,
    pub user: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: PracticeCategory) {
        self.selected_mode = Some(mode);
    }

    pub fn set_practice_content(&mut self, content: String) {
        self.practice_content = Some(content);
    }

    pub fn set_last_used_text(&mut self, text: String) {
        self.last_used_text = Some(text);
    }

    pub fn update_results(&mut self, results: PracticeResults) {
        self.practice_results = results;
    }

    pub fn set_user(&mut self, user: String) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Asks `selector` for the next text and records it as both the current
    /// content and the last served text, whatever its source.
    pub fn load_practice_content(
        &mut self,
        selector: &ContentSelector,
        request: ContentRequest<'_>,
        rng: &mut dyn RandomSource,
    ) -> Selection {
        let selection = selector.select(request, self.last_used_text.as_deref(), rng);
        self.set_practice_content(selection.text.clone());
        self.set_last_used_text(selection.text.clone());
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DEFAULT_TEXT;
    use crate::content::pool::{PoolTable, TextPool};
    use crate::content::selector::ScriptedSource;

    fn selector() -> ContentSelector {
        ContentSelector::new(PoolTable::new(
            TextPool::from_texts(["甲", "乙", "丙"]),
            TextPool::from_texts(["one", "two"]),
        ))
    }

    #[test]
    fn fresh_session_is_empty() {
        let state = SessionState::new();
        assert!(state.selected_mode.is_none());
        assert!(state.practice_content.is_none());
        assert!(state.last_used_text.is_none());
        assert!(!state.is_logged_in());
        assert_eq!(state.practice_results, PracticeResults::default());
    }

    #[test]
    fn load_records_content_and_last_used() {
        let mut state = SessionState::new();
        let mut rng = ScriptedSource::new(vec![0]);
        let sel = state.load_practice_content(&selector(), ContentRequest::new("chinese"), &mut rng);
        assert_eq!(sel.text, "甲");
        assert_eq!(state.practice_content.as_deref(), Some("甲"));
        assert_eq!(state.last_used_text.as_deref(), Some("甲"));
    }

    #[test]
    fn consecutive_loads_never_repeat() {
        let mut state = SessionState::new();
        let selector = selector();
        // Always asking for index 0 would repeat without the exclusion rule.
        let mut rng = ScriptedSource::new(vec![0]);
        let mut previous = String::new();
        for _ in 0..10 {
            let sel = state.load_practice_content(&selector, ContentRequest::new("wubi"), &mut rng);
            assert_ne!(sel.text, previous);
            previous = sel.text;
        }
    }

    #[test]
    fn custom_and_placeholder_are_recorded_too() {
        let mut state = SessionState::new();
        let selector = selector();
        let mut rng = ScriptedSource::new(vec![0]);

        state.load_practice_content(
            &selector,
            ContentRequest::new("english").with_custom_text(" mine "),
            &mut rng,
        );
        assert_eq!(state.last_used_text.as_deref(), Some("mine"));

        state.load_practice_content(&selector, ContentRequest::new("nope"), &mut rng);
        assert_eq!(state.practice_content.as_deref(), Some(DEFAULT_TEXT));
        assert_eq!(state.last_used_text.as_deref(), Some(DEFAULT_TEXT));
    }

    #[test]
    fn setters_overwrite() {
        let mut state = SessionState::new();
        state.set_mode(PracticeCategory::English);
        state.set_mode(PracticeCategory::Wubi);
        assert_eq!(state.selected_mode, Some(PracticeCategory::Wubi));

        state.update_results(PracticeResults {
            speed: 42.0,
            accuracy: 99.0,
            time: 12.5,
        });
        assert_eq!(state.practice_results.speed, 42.0);

        state.set_user("小明".to_string());
        assert!(state.is_logged_in());
        state.clear_user();
        assert!(!state.is_logged_in());
    }
}
