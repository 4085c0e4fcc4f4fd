//! Note aggregator — walks the remote folder-per-category layout, fetches
//! each Markdown file, and merges the result with the local JSON store.
//!
//! External contract: best-effort, never errors. Per-file failures are
//! skipped, and a total remote failure degrades to local-only results.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::defaults::NOTES_ROOT;
use crate::notes::github::GitHubStore;
use crate::notes::local_store::LocalNoteStore;
use crate::notes::Note;

pub struct NoteAggregator {
    remote: Option<Arc<GitHubStore>>,
    local: Arc<LocalNoteStore>,
}

impl NoteAggregator {
    pub fn new(remote: Option<Arc<GitHubStore>>, local: Arc<LocalNoteStore>) -> Self {
        Self { remote, local }
    }

    /// Produce the unified note collection. Ordering is unspecified; the
    /// presentation layer sorts.
    pub async fn collect(&self) -> Vec<Note> {
        let local_notes = self.local.load_all();

        let store = match &self.remote {
            Some(store) => store,
            None => return local_notes,
        };

        match self.collect_remote(store).await {
            Ok(remote_notes) => {
                log::info!(
                    "[Aggregator] Merging {} remote with {} local notes",
                    remote_notes.len(),
                    local_notes.len()
                );
                merge(remote_notes, local_notes)
            }
            Err(e) => {
                log::warn!("[Aggregator] Remote listing failed, serving local only: {}", e);
                local_notes
            }
        }
    }

    /// Walk `notes/<category>/*.md`, fetching and decoding each file.
    /// A failed category listing or file fetch skips that entry and moves on.
    async fn collect_remote(
        &self,
        store: &GitHubStore,
    ) -> Result<Vec<Note>, crate::error::NoteError> {
        let categories = store.list_dir(NOTES_ROOT).await?;
        let mut notes = Vec::new();

        for category in categories.iter().filter(|e| e.is_dir()) {
            let files = match store.list_dir(&category.path).await {
                Ok(files) => files,
                Err(e) => {
                    log::warn!("[Aggregator] Skipping category {}: {}", category.name, e);
                    continue;
                }
            };

            for file in files.iter().filter(|f| f.is_note_file()) {
                let content = match store.fetch_content(file).await {
                    Ok(content) => content,
                    Err(e) => {
                        log::warn!("[Aggregator] Skipping file {}: {}", file.path, e);
                        continue;
                    }
                };

                // Blob SHA is stable across fetches of the same file; fall
                // back to the filename if the API ever omits it
                let id = if file.sha.is_empty() {
                    file.name.clone()
                } else {
                    file.sha.clone()
                };

                notes.push(Note::from_file(
                    id,
                    &file.name,
                    &category.name,
                    content,
                    file.html_url.clone(),
                ));
            }
        }

        Ok(notes)
    }
}

/// Merge remote and local collections keyed by id. On collision the local
/// entry wins: local records are either fallback-mode writes or writes not
/// yet reflected remotely, so they are assumed more recent.
fn merge(remote: Vec<Note>, local: Vec<Note>) -> Vec<Note> {
    let mut by_id: HashMap<String, Note> = HashMap::new();
    for note in remote.into_iter().chain(local) {
        by_id.insert(note.id.clone(), note);
    }
    by_id.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::notes::note::local_note_id;
    use tempfile::tempdir;

    fn note(id: &str, content: &str) -> Note {
        Note::from_file(id.to_string(), "idea.md", "ideas", content.to_string(), None)
    }

    #[test]
    fn test_merge_local_wins_on_collision() {
        let remote = vec![note("shared", "remote version"), note("remote-only", "r")];
        let local = vec![note("shared", "local version"), note("local-only", "l")];

        let merged = merge(remote, local);
        assert_eq!(merged.len(), 3);

        let shared = merged.iter().find(|n| n.id == "shared").unwrap();
        assert_eq!(shared.content, "local version");
    }

    #[test]
    fn test_merge_empty_remote_is_local() {
        let local = vec![note("a", "x"), note("b", "y")];
        let merged = merge(Vec::new(), local);
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn test_collect_without_remote_returns_local() {
        let dir = tempdir().unwrap();
        let local = Arc::new(LocalNoteStore::new(dir.path().join("notes.json")));
        local
            .append(Note::from_file(
                local_note_id(),
                "idea.md",
                "ideas",
                "# Hi".to_string(),
                None,
            ))
            .unwrap();

        let aggregator = NoteAggregator::new(None, local);
        let notes = aggregator.collect().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "# Hi");
    }

    #[tokio::test]
    async fn test_collect_with_unreachable_remote_degrades_to_local() {
        let dir = tempdir().unwrap();
        let local = Arc::new(LocalNoteStore::new(dir.path().join("notes.json")));
        local
            .append(Note::from_file(
                local_note_id(),
                "fallback.md",
                "work",
                "still here".to_string(),
                None,
            ))
            .unwrap();

        let cfg = RemoteConfig {
            token: "t".to_string(),
            owner: "o".to_string(),
            repo: "r".to_string(),
            branch: "main".to_string(),
        };
        let store = Arc::new(GitHubStore::new(cfg).with_api_base("http://127.0.0.1:1"));

        let aggregator = NoteAggregator::new(Some(store), local);
        let notes = aggregator.collect().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "still here");
    }
}
