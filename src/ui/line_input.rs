use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Plain,
    /// Rendered as bullets.
    Secret,
    /// Tab completes filesystem paths.
    Path,
}

/// Single-line text field used by the login, custom text and upload screens.
pub struct LineInput {
    text: String,
    /// Char index; 0 is before the first char.
    cursor: usize,
    kind: InputKind,
    completions: Vec<String>,
    completion_index: Option<usize>,
    pub completion_error: bool,
}

impl LineInput {
    pub fn new(kind: InputKind) -> Self {
        Self::with_text("", kind)
    }

    pub fn with_text(text: &str, kind: InputKind) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            kind,
            completions: Vec::new(),
            completion_index: None,
            completion_error: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.reset_completion();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Text as shown on screen, split around the cursor.
    pub fn display_parts(&self) -> (String, Option<char>, String) {
        let shown: Vec<char> = match self.kind {
            InputKind::Secret => vec!['\u{2022}'; self.char_len()],
            _ => self.text.chars().collect(),
        };
        let before: String = shown[..self.cursor].iter().collect();
        let at = shown.get(self.cursor).copied();
        let after: String = shown.iter().skip(self.cursor + 1).collect();
        (before, at, after)
    }

    pub fn insert_str(&mut self, s: &str) {
        self.reset_completion();
        for ch in s.chars().filter(|c| !c.is_control() || *c == '\n') {
            // Newlines from a paste become spaces in a single-line field.
            let ch = if ch == '\n' { ' ' } else { ch };
            let at = self.byte_at(self.cursor);
            self.text.insert(at, ch);
            self.cursor += 1;
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.reset_completion();
        }
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.remove_char(self.cursor - 1);
                self.cursor -= 1;
            }
            KeyCode::Delete if self.cursor < self.char_len() => self.remove_char(self.cursor),
            KeyCode::Tab if self.kind == InputKind::Path => self.cycle_completion(true),
            KeyCode::BackTab if self.kind == InputKind::Path => self.cycle_completion(false),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.char_len(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char(&mut self, char_idx: usize) {
        let at = self.byte_at(char_idx);
        if let Some(ch) = self.text[at..].chars().next() {
            self.text.replace_range(at..at + ch.len_utf8(), "");
        }
    }

    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let (from, to) = (self.byte_at(start), self.byte_at(self.cursor));
        self.text.replace_range(from..to, "");
        self.cursor = start;
    }

    fn reset_completion(&mut self) {
        self.completions.clear();
        self.completion_index = None;
        self.completion_error = false;
    }

    fn cycle_completion(&mut self, forward: bool) {
        if self.cursor < self.char_len() {
            return;
        }
        let next = match self.completion_index {
            None => {
                self.completion_error = false;
                self.completions = self.scan_completions();
                if self.completions.is_empty() {
                    return;
                }
                0
            }
            Some(idx) => {
                let n = self.completions.len();
                if forward { (idx + 1) % n } else { (idx + n - 1) % n }
            }
        };
        self.completion_index = Some(next);
        self.text = self.completions[next].clone();
        self.cursor = self.char_len();
    }

    fn scan_completions(&mut self) -> Vec<String> {
        let seed = self.text.clone();
        let split = seed.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
        let (dir, partial) = seed.split_at(split);

        let read_from = if dir.is_empty() {
            std::path::PathBuf::from(".")
        } else {
            crate::upload::expand_home(dir)
        };
        let entries = match std::fs::read_dir(&read_from) {
            Ok(rd) => rd.map(|res| {
                res.map(|e| {
                    let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    (e.file_name().to_string_lossy().into_owned(), is_dir)
                })
            }),
            Err(_) => {
                self.completion_error = true;
                return Vec::new();
            }
        };
        self.collect_completions(entries, dir, partial)
    }

    /// Directories first, then files, each sorted by name. Hidden entries only
    /// when `partial` starts with a dot.
    fn collect_completions(
        &mut self,
        entries: impl Iterator<Item = std::io::Result<(String, bool)>>,
        dir: &str,
        partial: &str,
    ) -> Vec<String> {
        let show_hidden = partial.starts_with('.');
        let mut found: Vec<(bool, String)> = Vec::new();
        for entry in entries.take(1000) {
            let Ok((name, is_dir)) = entry else {
                self.completion_error = true;
                return Vec::new();
            };
            if (!show_hidden && name.starts_with('.')) || !name.starts_with(partial) {
                continue;
            }
            let mut full = format!("{dir}{name}");
            if is_dir {
                full.push(std::path::MAIN_SEPARATOR);
            }
            found.push((is_dir, full));
        }
        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        found.into_iter().take(100).map(|(_, p)| p).collect()
    }
}
