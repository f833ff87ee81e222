//! Core conversion logic for daynote.
//!
//! Turns a directory of exported note records into daily-journal Markdown
//! files, one per UTC calendar day.

pub mod import;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;

pub use import::record::{
    parse_note, validate, FieldShape, FieldSpec, ValidationError, NOTE_FIELDS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Annotation, ListItem, Note, NoteBody, NoteMeta};
pub use render::daily::{daily_entry, daily_note_name, ordinal_suffix, DailyEntry};
pub use render::markdown::{time_label, to_markdown};
pub use service::convert_service::{
    convert, convert_with_progress, list_note_files, ConvertError, ConvertReport,
    ConvertService, DirectoryJournal, FileOutcome, JournalSink, SkipReason, SkippedFile,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
