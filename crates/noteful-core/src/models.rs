//! Domain models for noteful.
//!
//! The read model for notes is the *hydrated* shape: a note carries its
//! folder (if any) and its full tag set, reassembled from the flat rows a
//! joined query returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A folder. Notes reference folders by id; a folder may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// A tag. Notes reference tags through the `notes_tags` join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Folder fields embedded in a hydrated note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    pub id: i64,
    pub name: String,
}

/// Tag fields embedded in a hydrated note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

/// A fully hydrated note: scalar fields plus embedded folder and tag set.
///
/// `folder` is `None` when the note has no folder, or when its `folder_id`
/// points at a folder that no longer exists (join miss on read).
/// `tags` is ordered and unique by tag id; a note with no tags serializes
/// as `"tags": []`, never a one-element list with a null placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
    pub folder: Option<FolderRef>,
    pub tags: Vec<TagRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_null_folder_and_empty_tags() {
        let note = Note {
            id: 7,
            title: "A".to_string(),
            content: None,
            created: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            folder: None,
            tags: Vec::new(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["folder"], serde_json::Value::Null);
        assert_eq!(json["tags"], serde_json::json!([]));
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_note_serializes_embedded_folder_and_tags() {
        let note = Note {
            id: 1,
            title: "A".to_string(),
            content: Some("B".to_string()),
            created: Utc::now(),
            folder: Some(FolderRef {
                id: 1,
                name: "Work".to_string(),
            }),
            tags: vec![
                TagRef {
                    id: 5,
                    name: "urgent".to_string(),
                },
                TagRef {
                    id: 6,
                    name: "draft".to_string(),
                },
            ],
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["folder"]["id"], 1);
        assert_eq!(json["folder"]["name"], "Work");
        assert_eq!(json["tags"][0]["id"], 5);
        assert_eq!(json["tags"][1]["id"], 6);
    }

    #[test]
    fn test_folder_round_trips_through_json() {
        let folder = Folder {
            id: 1,
            name: "Work".to_string(),
        };
        let json = serde_json::to_string(&folder).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Work"}"#);

        let back: Folder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, folder);
    }
}
