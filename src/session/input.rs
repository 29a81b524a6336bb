use std::time::Instant;

use icu_normalizer::ComposingNormalizerBorrowed;

use crate::session::drill::{DrillState, SyntheticSpan};

#[derive(Clone, Debug)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
}

fn is_line_padding(ch: char) -> bool {
    // Ideographic space indents Chinese paragraphs.
    matches!(ch, '\n' | ' ' | '\u{3000}')
}

/// Composes a typed char the way the drill target was composed. Chars whose
/// NFC form spans several chars are compared as typed.
fn compose_typed(ch: char) -> char {
    let mut buf = [0u8; 4];
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(ch.encode_utf8(&mut buf));
    let mut chars = composed.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

pub fn process_char(drill: &mut DrillState, ch: char) {
    if drill.is_complete() {
        return;
    }

    if drill.started_at.is_none() {
        drill.started_at = Some(Instant::now());
    }

    let ch = compose_typed(ch);
    if ch == drill.target[drill.cursor] {
        drill.input.push(CharStatus::Correct);
        drill.cursor += 1;
        if ch == '\n' {
            // Blank lines and paragraph indent after a correct Enter are typed for the user.
            while drill.cursor < drill.target.len() && is_line_padding(drill.target[drill.cursor]) {
                drill.input.push(CharStatus::Correct);
                drill.cursor += 1;
            }
        }
    } else if ch == '\n' {
        // Mistyped Enter abandons the rest of the line.
        let start = drill.cursor;
        let end = drill.target[start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|offset| start + offset + 1)
            .unwrap_or(drill.target.len());
        for pos in start..end {
            drill.input.push(CharStatus::Incorrect(ch));
            drill.typo_flags.insert(pos);
        }
        drill.cursor = end;
        if end - start > 1 {
            drill.synthetic_spans.push(SyntheticSpan { start, end });
        }
    } else {
        drill.input.push(CharStatus::Incorrect(ch));
        drill.typo_flags.insert(drill.cursor);
        drill.cursor += 1;
    }

    if drill.is_complete() {
        drill.finished_at = Some(Instant::now());
    }
}

pub fn process_backspace(drill: &mut DrillState) {
    if drill.cursor == 0 {
        return;
    }

    if let Some(span) = drill.synthetic_spans.last().copied()
        && span.end == drill.cursor
    {
        // Undo the whole skipped span, keeping one error at its start.
        drill.synthetic_spans.pop();
        for pos in span.start..span.end {
            drill.typo_flags.remove(&pos);
        }
        drill.typo_flags.insert(span.start);
        drill.input.truncate(span.start);
        drill.cursor = span.start;
        return;
    }

    drill.cursor -= 1;
    drill.input.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_chars_are_composed_before_comparison() {
        // Angstrom sign and a CJK compatibility ideograph both compose to the target chars.
        let mut drill = DrillState::new("\u{00C5}\u{8C48}");
        process_char(&mut drill, '\u{212B}');
        process_char(&mut drill, '\u{F900}');
        assert!(drill.is_complete());
        assert!(drill.input.iter().all(|s| matches!(s, CharStatus::Correct)));
        assert_eq!(drill.typo_count(), 0);
    }

    #[test]
    fn wrong_char_is_recorded_and_backspace_steps_back() {
        let mut drill = DrillState::new("ab");
        process_char(&mut drill, 'x');
        assert!(matches!(drill.input[0], CharStatus::Incorrect('x')));
        assert_eq!(drill.cursor, 1);

        process_backspace(&mut drill);
        assert_eq!(drill.cursor, 0);
        process_char(&mut drill, 'a');
        assert!(matches!(drill.input[0], CharStatus::Correct));
        // The corrected position still counts as a typo.
        assert_eq!(drill.typo_count(), 1);
    }

    #[test]
    fn input_after_completion_is_ignored() {
        let mut drill = DrillState::new("a");
        process_char(&mut drill, 'a');
        process_char(&mut drill, 'b');
        assert_eq!(drill.input.len(), 1);
        assert_eq!(drill.cursor, 1);
    }
}
