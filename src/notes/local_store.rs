//! Local note store — a flat JSON array on disk.
//!
//! Primary persistence when no GitHub token is configured, and always a
//! merge source during aggregation (local records represent writes not yet
//! reflected remotely). The file is read and rewritten wholesale on every
//! append; concurrent writers are last-writer-wins.

use std::fs;
use std::path::PathBuf;

use crate::error::NoteError;
use crate::notes::Note;

pub struct LocalNoteStore {
    path: PathBuf,
}

impl LocalNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the full collection. A missing or corrupt file yields an empty
    /// list — local storage is best-effort and never fails a read.
    pub fn load_all(&self) -> Vec<Note> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                log::warn!(
                    "[LocalStore] Corrupt notes file {:?}, treating as empty: {}",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Append a record and rewrite the file. Creates parent directories on
    /// first write. No uniqueness enforcement beyond the caller's id.
    pub fn append(&self, note: Note) -> Result<(), NoteError> {
        let mut notes = self.load_all();
        notes.push(note);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&notes)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::note::local_note_id;
    use tempfile::tempdir;

    fn sample_note(category: &str, content: &str) -> Note {
        Note::from_file(local_note_id(), "idea.md", category, content.to_string(), None)
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalNoteStore::new(dir.path().join("local-notes.json"));

        store.append(sample_note("ideas", "# Hi")).unwrap();
        let notes = store.load_all();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "# Hi");
        assert_eq!(notes[0].category, "ideas");
        assert_eq!(notes[0].title, "Idea");
        assert!(notes[0].url.is_none());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = LocalNoteStore::new(dir.path().join("nope.json"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local-notes.json");
        std::fs::write(&path, "{ not json ]").unwrap();

        let store = LocalNoteStore::new(path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = LocalNoteStore::new(dir.path().join("data/nested/notes.json"));
        store.append(sample_note("work", "text")).unwrap();
        assert_eq!(store.load_all().len(), 1);
    }
}
