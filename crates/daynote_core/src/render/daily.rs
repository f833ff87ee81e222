//! Daily journal file naming.
//!
//! Notes are grouped into one Markdown file per UTC calendar day, named the
//! way journal apps title their daily pages: `January 1st, 2020.md`.

use super::markdown::to_markdown;
use crate::model::note::Note;
use chrono::{DateTime, Datelike, Utc};

/// File extension of daily journal files, without the dot.
pub const DAILY_NOTE_EXTENSION: &str = "md";

/// Rendered note paired with the daily file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    /// Bare file name, e.g. `January 1st, 2020.md`.
    pub file_name: String,
    /// Markdown block to append to that file.
    pub markdown: String,
}

/// Returns the English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Formats a date as `<Month> <Day><suffix>, <Year>`.
pub fn daily_note_name(date: DateTime<Utc>) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// Renders a note and derives its destination file name.
pub fn daily_entry(note: &Note) -> DailyEntry {
    DailyEntry {
        file_name: format!(
            "{}.{DAILY_NOTE_EXTENSION}",
            daily_note_name(note.edited_at)
        ),
        markdown: to_markdown(note),
    }
}
