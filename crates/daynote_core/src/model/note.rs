//! Normalized note record.
//!
//! # Responsibility
//! - Represent one exported note after validation.
//! - Provide the emptiness rule used to filter notes before rendering.
//!
//! # Invariants
//! - `edited_at` is derived from `edited_at_usec` and is always UTC.
//! - `body` is either plain text or a checklist, never both, never neither.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub text: String,
    /// Missing in some exports; treated as unchecked.
    #[serde(default)]
    pub is_checked: bool,
}

impl ListItem {
    pub fn new(text: impl Into<String>, is_checked: bool) -> Self {
        Self {
            text: text.into(),
            is_checked,
        }
    }
}

/// Link annotation attached to a note. Carried through, never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub source: String,
    pub url: String,
    pub description: String,
    pub title: String,
}

/// Note content, decided once when the record is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBody {
    /// Free-form text note.
    Plain { text: String },
    /// Checklist note with ordered items.
    Checklist { items: Vec<ListItem> },
}

/// Export metadata that does not affect rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMeta {
    pub is_pinned: Option<bool>,
    pub is_trashed: Option<bool>,
    pub is_archived: Option<bool>,
    pub color: Option<String>,
    pub annotations: Vec<Annotation>,
}

/// Validated note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// May be empty; the renderer falls back to the edit time.
    pub title: String,
    /// Raw export timestamp, microseconds since the Unix epoch.
    pub edited_at_usec: i64,
    /// `edited_at_usec` as a UTC date-time.
    pub edited_at: DateTime<Utc>,
    pub body: NoteBody,
    pub meta: NoteMeta,
}

impl Note {
    /// Builds a plain-text note.
    ///
    /// Returns `None` when `edited_at_usec` is outside the supported date range.
    pub fn plain(
        title: impl Into<String>,
        text: impl Into<String>,
        edited_at_usec: i64,
    ) -> Option<Self> {
        Self::with_body(
            title,
            NoteBody::Plain { text: text.into() },
            edited_at_usec,
        )
    }

    /// Builds a checklist note.
    ///
    /// Returns `None` when `edited_at_usec` is outside the supported date range.
    pub fn checklist(
        title: impl Into<String>,
        items: Vec<ListItem>,
        edited_at_usec: i64,
    ) -> Option<Self> {
        Self::with_body(title, NoteBody::Checklist { items }, edited_at_usec)
    }

    fn with_body(title: impl Into<String>, body: NoteBody, edited_at_usec: i64) -> Option<Self> {
        let edited_at = DateTime::<Utc>::from_timestamp_micros(edited_at_usec)?;
        Some(Self {
            title: title.into(),
            edited_at_usec,
            edited_at,
            body,
            meta: NoteMeta::default(),
        })
    }

    pub fn is_checklist(&self) -> bool {
        matches!(self.body, NoteBody::Checklist { .. })
    }

    /// Returns whether the note has nothing worth writing.
    ///
    /// A note is empty only when its title is `""` and its body is empty for
    /// its kind (`""` text or zero checklist items).
    pub fn is_empty(&self) -> bool {
        if !self.title.is_empty() {
            return false;
        }
        match &self.body {
            NoteBody::Plain { text } => text.is_empty(),
            NoteBody::Checklist { items } => items.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListItem, Note};
    use chrono::{Datelike, Timelike};

    const NEW_YEAR_2020_USEC: i64 = 1_577_836_800_000_000;

    #[test]
    fn edit_time_is_utc() {
        let note = Note::plain("t", "body", NEW_YEAR_2020_USEC).unwrap();
        assert_eq!(note.edited_at.year(), 2020);
        assert_eq!(note.edited_at.month(), 1);
        assert_eq!(note.edited_at.day(), 1);
        assert_eq!(note.edited_at.hour(), 0);
    }

    #[test]
    fn plain_note_is_empty_only_without_title_and_text() {
        let mut note = Note::plain("Title", "Text", NEW_YEAR_2020_USEC).unwrap();
        assert!(!note.is_empty());
        assert!(!note.is_checklist());

        note.title.clear();
        assert!(!note.is_empty());

        let note = Note::plain("", "", NEW_YEAR_2020_USEC).unwrap();
        assert!(note.is_empty());

        let note = Note::plain("Title", "", NEW_YEAR_2020_USEC).unwrap();
        assert!(!note.is_empty());
    }

    #[test]
    fn checklist_note_is_empty_only_without_title_and_items() {
        let items = vec![ListItem::new("one", false)];
        let note = Note::checklist("", items, NEW_YEAR_2020_USEC).unwrap();
        assert!(note.is_checklist());
        assert!(!note.is_empty());

        let note = Note::checklist("", Vec::new(), NEW_YEAR_2020_USEC).unwrap();
        assert!(note.is_empty());

        let note = Note::checklist("Groceries", Vec::new(), NEW_YEAR_2020_USEC).unwrap();
        assert!(!note.is_empty());
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        assert!(Note::plain("t", "x", i64::MAX).is_none());
    }
}
