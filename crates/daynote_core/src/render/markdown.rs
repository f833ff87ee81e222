//! Note → Markdown bullet block.
//!
//! # Responsibility
//! - Produce the heading bullet (title, or edit time when untitled).
//! - Flatten note content into one sub-bullet per line/item.
//!
//! # Invariants
//! - Output always starts with `"- "` and ends with `"\n"`.
//! - Plain text bodies are folded to ASCII before rendering.

use crate::model::note::{ListItem, Note, NoteBody};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

const HEADING_PREFIX: &str = "- ";
const SUB_BULLET: &str = "\n    - ";
const TIME_FORMAT: &str = "%I:%M %p";

static NEWLINE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("valid newline run regex"));

/// Renders one note as a Markdown bullet block.
///
/// Callers are expected to filter `Note::is_empty` notes first; an empty
/// note still renders, as a bare time heading.
pub fn to_markdown(note: &Note) -> String {
    let mut rendered = String::from(HEADING_PREFIX);
    if note.title.is_empty() {
        rendered.push_str(&time_label(note));
    } else {
        rendered.push_str(&note.title);
    }

    match &note.body {
        NoteBody::Plain { text } => rendered.push_str(&text_body(text)),
        NoteBody::Checklist { items } => rendered.push_str(&checklist_body(items)),
    }

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}

/// Edit time as a 12-hour clock label, e.g. `07:00 PM` (UTC).
pub fn time_label(note: &Note) -> String {
    note.edited_at.format(TIME_FORMAT).to_string()
}

fn checklist_body(items: &[ListItem]) -> String {
    items
        .iter()
        .map(|item| format!("{SUB_BULLET}{}", item.text))
        .collect()
}

/// Folds text to ASCII and emits one sub-bullet per non-blank line.
fn text_body(text: &str) -> String {
    let ascii = text.nfkd().filter(char::is_ascii).collect::<String>();
    let collapsed = NEWLINE_RUN_RE.replace_all(&ascii, "\n");

    collapsed
        .trim_matches(is_space)
        .split('\n')
        .map(|line| squeeze_line(line.trim_matches(is_space)))
        .filter(|line| !line.is_empty())
        .map(|line| format!("{SUB_BULLET}{line}"))
        .collect()
}

/// Collapses each run of horizontal whitespace to its last character.
///
/// A run directly followed by a carriage return is dropped entirely.
fn squeeze_line(line: &str) -> String {
    let mut squeezed = String::with_capacity(line.len());
    let mut pending = None;
    for c in line.chars() {
        if is_space(c) && c != '\r' {
            pending = Some(c);
            continue;
        }
        if let Some(space) = pending.take() {
            if c != '\r' {
                squeezed.push(space);
            }
        }
        squeezed.push(c);
    }
    squeezed
}

fn is_space(c: char) -> bool {
    // U+001C..=U+001F (information separators) also count as whitespace.
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::{squeeze_line, text_body};

    #[test]
    fn text_body_folds_accents_and_drops_symbols() {
        assert_eq!(text_body("Café ☕ crème"), "\n    - Cafe creme");
        assert_eq!(text_body("🎉"), "");
    }

    #[test]
    fn text_body_flattens_paragraphs_into_sub_bullets() {
        assert_eq!(
            text_body("  first line  \n\n\n   second\tline \n"),
            "\n    - first line\n    - second\tline"
        );
    }

    #[test]
    fn text_body_drops_whitespace_only_lines() {
        assert_eq!(text_body("a\n   \nb"), "\n    - a\n    - b");
        assert_eq!(text_body("a\r\nb"), "\n    - a\n    - b");
    }

    #[test]
    fn squeeze_line_keeps_last_space_of_each_run() {
        assert_eq!(squeeze_line("a  b"), "a b");
        assert_eq!(squeeze_line("a \t b"), "a b");
        assert_eq!(squeeze_line("a\t b"), "a b");
        assert_eq!(squeeze_line("a  \rb"), "a\rb");
    }
}
