//! Row hydration: reassembling flat join rows into nested notes.
//!
//! The note list/get queries left-join folders and tags, so a note with N
//! tags fans out to N rows (or one row with null tag fields when it has
//! none). Hydration is an explicit grouping-by-id reduction over the row
//! sequence: single pass, stable, no reliance on incidental row ordering
//! beyond first-seen note order.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use noteful_core::{FolderRef, Note, TagRef};

/// One flat row from the joined note read queries.
///
/// `folder_id`/`folder_name` and `tag_id`/`tag_name` are null together: a
/// join miss leaves both fields of the pair null.
#[derive(Debug, Clone)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
    pub folder_id: Option<i64>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_name: Option<String>,
}

/// Collapse an ordered sequence of flat join rows into hydrated notes.
///
/// Produces exactly one `Note` per distinct note id, preserving the
/// first-seen order of note ids. Folder fields are attached on the first
/// occurrence of a note id (they are identical across a note's fan-out
/// rows). Tag entries are appended in row order, deduplicated by tag id.
pub fn hydrate_notes(rows: Vec<NoteRow>) -> Vec<Note> {
    let mut notes: Vec<Note> = Vec::new();
    let mut index_by_id: HashMap<i64, usize> = HashMap::new();
    let mut seen_tags: HashMap<i64, HashSet<i64>> = HashMap::new();

    for row in rows {
        let idx = match index_by_id.get(&row.id) {
            Some(&idx) => idx,
            None => {
                let folder = match (row.folder_id, row.folder_name) {
                    (Some(id), Some(name)) => Some(FolderRef { id, name }),
                    _ => None,
                };
                notes.push(Note {
                    id: row.id,
                    title: row.title,
                    content: row.content,
                    created: row.created,
                    folder,
                    tags: Vec::new(),
                });
                index_by_id.insert(row.id, notes.len() - 1);
                notes.len() - 1
            }
        };

        if let (Some(tag_id), Some(tag_name)) = (row.tag_id, row.tag_name) {
            let seen = seen_tags.entry(row.id).or_default();
            if seen.insert(tag_id) {
                notes[idx].tags.push(TagRef {
                    id: tag_id,
                    name: tag_name,
                });
            }
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, tag: Option<(i64, &str)>) -> NoteRow {
        NoteRow {
            id,
            title: format!("note-{}", id),
            content: Some("body".to_string()),
            created: Utc::now(),
            folder_id: None,
            folder_name: None,
            tag_id: tag.map(|(t, _)| t),
            tag_name: tag.map(|(_, n)| n.to_string()),
        }
    }

    fn row_in_folder(id: i64, folder: (i64, &str), tag: Option<(i64, &str)>) -> NoteRow {
        NoteRow {
            folder_id: Some(folder.0),
            folder_name: Some(folder.1.to_string()),
            ..row(id, tag)
        }
    }

    #[test]
    fn test_fan_out_collapses_to_one_note() {
        let rows = vec![
            row(1, Some((5, "urgent"))),
            row(1, Some((6, "draft"))),
            row(1, Some((7, "work"))),
        ];

        let notes = hydrate_notes(rows);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 1);
        assert_eq!(
            notes[0].tags.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![5, 6, 7]
        );
    }

    #[test]
    fn test_note_without_tags_gets_empty_vec() {
        let notes = hydrate_notes(vec![row(1, None)]);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].tags.is_empty());
        assert!(notes[0].folder.is_none());
    }

    #[test]
    fn test_folder_attached_once() {
        let rows = vec![
            row_in_folder(1, (2, "Work"), Some((5, "urgent"))),
            row_in_folder(1, (2, "Work"), Some((6, "draft"))),
        ];

        let notes = hydrate_notes(rows);
        assert_eq!(notes.len(), 1);
        let folder = notes[0].folder.as_ref().expect("folder should be set");
        assert_eq!(folder.id, 2);
        assert_eq!(folder.name, "Work");
    }

    #[test]
    fn test_join_miss_folder_is_none() {
        // folder_id points at a deleted folder: the left join leaves both
        // folder fields null and hydration yields folder: None.
        let notes = hydrate_notes(vec![row(1, Some((5, "urgent")))]);
        assert!(notes[0].folder.is_none());
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let rows = vec![
            row(3, Some((1, "a"))),
            row(1, Some((1, "a"))),
            row(3, Some((2, "b"))),
            row(2, None),
            row(1, Some((2, "b"))),
        ];

        let notes = hydrate_notes(rows);
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_tag_rows_deduplicated() {
        // An unexpected extra fan-out row for the same tag must not produce
        // a duplicate entry.
        let rows = vec![
            row(1, Some((5, "urgent"))),
            row(1, Some((5, "urgent"))),
            row(1, Some((6, "draft"))),
        ];

        let notes = hydrate_notes(rows);
        assert_eq!(
            notes[0].tags.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![5, 6]
        );
    }

    #[test]
    fn test_tag_dedup_is_per_note() {
        let rows = vec![row(1, Some((5, "urgent"))), row(2, Some((5, "urgent")))];

        let notes = hydrate_notes(rows);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tags.len(), 1);
        assert_eq!(notes[1].tags.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(hydrate_notes(Vec::new()).is_empty());
    }

    #[test]
    fn test_scalar_fields_come_from_first_row() {
        let created = Utc::now();
        let mut first = row(1, Some((5, "urgent")));
        first.created = created;
        first.content = Some("B".to_string());
        let second = row(1, Some((6, "draft")));

        let notes = hydrate_notes(vec![first, second]);
        assert_eq!(notes[0].content.as_deref(), Some("B"));
        assert_eq!(notes[0].created, created);
    }
}
