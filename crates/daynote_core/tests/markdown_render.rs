use daynote_core::{daily_entry, time_label, to_markdown, ListItem, Note, NoteBody};

const NEW_YEAR_2020_USEC: i64 = 1_577_836_800_000_000;
// 2019-12-31T19:00:00Z
const NEW_YEARS_EVE_7PM_USEC: i64 = 1_577_818_800_000_000;

fn test_items() -> Vec<ListItem> {
    (1..=3)
        .map(|i| ListItem::new(format!("Test Item {i}"), false))
        .collect()
}

#[test]
fn titled_plain_note_renders_title_heading() {
    let note = Note::plain("Test Note Title", "Test Note", NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(to_markdown(&note), "- Test Note Title\n    - Test Note\n");
}

#[test]
fn untitled_plain_note_falls_back_to_utc_time() {
    let note = Note::plain("", "Test Note", NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(to_markdown(&note), "- 12:00 AM\n    - Test Note\n");

    let note = Note::plain("", "Test Note", NEW_YEARS_EVE_7PM_USEC).unwrap();
    assert_eq!(time_label(&note), "07:00 PM");
    assert_eq!(to_markdown(&note), "- 07:00 PM\n    - Test Note\n");
}

#[test]
fn checklist_renders_one_sub_bullet_per_item() {
    let note = Note::checklist("Test Note Title", test_items(), NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(
        to_markdown(&note),
        "- Test Note Title\n    - Test Item 1\n    - Test Item 2\n    - Test Item 3\n"
    );

    let note = Note::checklist("", test_items(), NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(
        to_markdown(&note),
        "- 12:00 AM\n    - Test Item 1\n    - Test Item 2\n    - Test Item 3\n"
    );
}

#[test]
fn checklist_line_count_matches_item_count() {
    for count in 0..5 {
        let items = (0..count)
            .map(|i| ListItem::new(format!("item {i}"), i % 2 == 0))
            .collect();
        let note = Note::checklist("Title", items, NEW_YEAR_2020_USEC).unwrap();
        let rendered = to_markdown(&note);

        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), count + 1, "rendered: {rendered:?}");
        assert_eq!(lines[0], "- Title");
        assert_eq!(
            lines.iter().filter(|line| line.starts_with("    - ")).count(),
            count
        );
    }
}

#[test]
fn titled_note_with_empty_body_renders_heading_only() {
    let note = Note::plain("Just a title", "", NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(to_markdown(&note), "- Just a title\n");

    let note = Note::plain("Just a title", " \n\n \t", NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(to_markdown(&note), "- Just a title\n");
}

#[test]
fn plain_text_is_flattened_and_folded_to_ascii() {
    let text = "Première ligne  \n\n\n  deuxième   ligne 🎉\n\tfin";
    let note = Note::plain("Notes", text, NEW_YEAR_2020_USEC).unwrap();
    assert_eq!(
        to_markdown(&note),
        "- Notes\n    - Premiere ligne\n    - deuxieme ligne\n    - fin\n"
    );
}

#[test]
fn plain_output_is_a_deterministic_bullet_block() {
    let samples = ["", "x", "a\nb", "  spaced  out  ", "ünïcödé\r\n\r\nline", "☃"];
    for text in samples {
        for title in ["", "Title"] {
            let note = Note::plain(title, text, NEW_YEAR_2020_USEC).unwrap();
            let first = to_markdown(&note);
            assert!(first.starts_with("- "), "{first:?}");
            assert!(first.ends_with('\n'), "{first:?}");
            assert_eq!(first, to_markdown(&note));
        }
    }
}

#[test]
fn daily_entry_names_file_after_utc_edit_date() {
    let note = Note::plain("Test Note Title", "Test Note", NEW_YEAR_2020_USEC).unwrap();
    let entry = daily_entry(&note);
    assert_eq!(entry.file_name, "January 1st, 2020.md");
    assert_eq!(entry.markdown, "- Test Note Title\n    - Test Note\n");

    let note = Note::plain("late", "x", NEW_YEARS_EVE_7PM_USEC).unwrap();
    assert_eq!(daily_entry(&note).file_name, "December 31st, 2019.md");
}

#[test]
fn checklist_text_is_not_ascii_folded() {
    let note = Note::checklist("", vec![ListItem::new("café", true)], NEW_YEAR_2020_USEC).unwrap();
    assert!(matches!(note.body, NoteBody::Checklist { .. }));
    assert_eq!(to_markdown(&note), "- 12:00 AM\n    - café\n");
}
