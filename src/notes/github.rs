//! GitHub Contents API adapter — directory listings, raw file fetches and
//! create-or-update writes with blob SHA tracking.
//!
//! Writes are not transactional: the pre-write SHA lookup and the PUT are
//! separate requests, so a concurrent external modification between them is
//! silently overwritten. Accepted for a single-operator tool.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::error::NoteError;
use crate::http::shared_client;

const API_BASE: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// One entry from a Contents API directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub download_url: Option<String>,
    pub html_url: Option<String>,
}

impl RepoEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == "dir"
    }

    /// Markdown note files only — the README placeholder that materializes
    /// an otherwise-empty category directory is not a note.
    pub fn is_note_file(&self) -> bool {
        self.entry_type == "file" && self.name.ends_with(".md") && self.name != "README.md"
    }
}

/// Result of a create-or-update write
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub html_url: Option<String>,
    pub sha: Option<String>,
}

#[derive(Deserialize)]
struct ContentObject {
    sha: String,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct PutResponse {
    content: Option<ContentObject>,
}

pub struct GitHubStore {
    cfg: RemoteConfig,
    api_base: String,
}

impl GitHubStore {
    pub fn new(cfg: RemoteConfig) -> Self {
        Self {
            cfg,
            api_base: API_BASE.to_string(),
        }
    }

    /// Override the API base URL (used by tests to simulate outages).
    #[cfg(test)]
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.cfg.owner, self.cfg.repo, path
        )
    }

    /// List a directory (category dirs under the root, or files within one).
    pub async fn list_dir(&self, path: &str) -> Result<Vec<RepoEntry>, NoteError> {
        let url = self.contents_url(path);
        let resp = shared_client()
            .get(&url)
            .query(&[("ref", self.cfg.branch.as_str())])
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.cfg.token))
            .send()
            .await
            .map_err(|e| NoteError::RemoteUnavailable(format!("list {} failed: {}", path, e)))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(NoteError::NotFound(path.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(NoteError::Unauthorized);
            }
            status if !status.is_success() => {
                return Err(NoteError::RemoteUnavailable(format!(
                    "list {} returned {}",
                    path, status
                )));
            }
            _ => {}
        }

        resp.json::<Vec<RepoEntry>>()
            .await
            .map_err(|e| NoteError::RemoteUnavailable(format!("list {} decode failed: {}", path, e)))
    }

    /// Fetch raw file content via the entry's download URL. Failures here
    /// are per-file and non-fatal to aggregation.
    pub async fn fetch_content(&self, entry: &RepoEntry) -> Result<String, NoteError> {
        let url = entry
            .download_url
            .as_deref()
            .ok_or_else(|| NoteError::ContentUnavailable(format!("{} has no download URL", entry.path)))?;

        let resp = shared_client()
            .get(url)
            .send()
            .await
            .map_err(|e| NoteError::ContentUnavailable(format!("fetch {} failed: {}", entry.path, e)))?;

        if !resp.status().is_success() {
            return Err(NoteError::ContentUnavailable(format!(
                "fetch {} returned {}",
                entry.path,
                resp.status()
            )));
        }

        resp.text()
            .await
            .map_err(|e| NoteError::ContentUnavailable(format!("read {} failed: {}", entry.path, e)))
    }

    /// Look up the current blob SHA for a path. `None` means the file does
    /// not exist yet, which signals "create" to the subsequent write.
    async fn current_sha(&self, path: &str) -> Result<Option<String>, NoteError> {
        let url = self.contents_url(path);
        let resp = shared_client()
            .get(&url)
            .query(&[("ref", self.cfg.branch.as_str())])
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.cfg.token))
            .send()
            .await
            .map_err(|e| NoteError::RemoteUnavailable(format!("lookup {} failed: {}", path, e)))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NoteError::Unauthorized),
            status if status.is_success() => {
                let obj = resp.json::<ContentObject>().await.map_err(|e| {
                    NoteError::RemoteUnavailable(format!("lookup {} decode failed: {}", path, e))
                })?;
                Ok(Some(obj.sha))
            }
            status => Err(NoteError::RemoteUnavailable(format!(
                "lookup {} returned {}",
                path, status
            ))),
        }
    }

    /// Create or update a file. An existing SHA is carried forward so the
    /// API treats the write as an update-in-place.
    pub async fn put_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<WriteOutcome, NoteError> {
        let sha = self.current_sha(path).await?;
        if sha.is_some() {
            log::info!("[GitHub] Updating existing file {}", path);
        } else {
            log::info!("[GitHub] Creating new file {}", path);
        }

        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content.as_bytes()),
            "branch": self.cfg.branch,
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::Value::String(sha);
        }

        let url = self.contents_url(path);
        let resp = shared_client()
            .put(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.cfg.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| NoteError::RemoteUnavailable(format!("write {} failed: {}", path, e)))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(NoteError::Unauthorized),
            status if !status.is_success() => {
                let detail = resp.text().await.unwrap_or_default();
                return Err(NoteError::RemoteUnavailable(format!(
                    "write {} returned {}: {}",
                    path, status, detail
                )));
            }
            _ => {}
        }

        let parsed = resp.json::<PutResponse>().await.map_err(|e| {
            NoteError::RemoteUnavailable(format!("write {} decode failed: {}", path, e))
        })?;

        Ok(WriteOutcome {
            html_url: parsed.content.as_ref().and_then(|c| c.html_url.clone()),
            sha: parsed.content.map(|c| c.sha),
        })
    }

    /// Materialize a category directory by committing a README placeholder.
    /// A 422 from the API means the file already exists, which is fine.
    pub async fn ensure_category(&self, category: &str) -> Result<(), NoteError> {
        let path = format!("{}/{}/README.md", crate::config::defaults::NOTES_ROOT, category);
        let body = serde_json::json!({
            "message": format!("Create {} directory", category),
            "content": BASE64.encode(format!("# {}\n\nThis directory contains notes.\n", category)),
            "branch": self.cfg.branch,
        });

        let url = self.contents_url(&path);
        let resp = shared_client()
            .put(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.cfg.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| NoteError::RemoteUnavailable(format!("setup {} failed: {}", path, e)))?;

        match resp.status() {
            StatusCode::UNPROCESSABLE_ENTITY => {
                log::debug!("[GitHub] Category {} already exists", category);
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NoteError::Unauthorized),
            status if status.is_success() => {
                log::info!("[GitHub] Created category directory {}", category);
                Ok(())
            }
            status => Err(NoteError::RemoteUnavailable(format!(
                "setup {} returned {}",
                path, status
            ))),
        }
    }

    /// Repository path for a note file within a category.
    pub fn note_path(category: &str, file_name: &str) -> String {
        format!("{}/{}/{}", crate::config::defaults::NOTES_ROOT, category, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RemoteConfig {
        RemoteConfig {
            token: "ghp_test".to_string(),
            owner: "someone".to_string(),
            repo: "notes-repo".to_string(),
            branch: "main".to_string(),
        }
    }

    #[test]
    fn test_contents_url() {
        let store = GitHubStore::new(test_config());
        assert_eq!(
            store.contents_url("notes/ideas/idea.md"),
            "https://api.github.com/repos/someone/notes-repo/contents/notes/ideas/idea.md"
        );
    }

    #[test]
    fn test_note_path() {
        assert_eq!(GitHubStore::note_path("ideas", "idea.md"), "notes/ideas/idea.md");
    }

    #[test]
    fn test_entry_filtering() {
        let entry = |name: &str, entry_type: &str| RepoEntry {
            name: name.to_string(),
            path: format!("notes/ideas/{}", name),
            sha: "abc".to_string(),
            entry_type: entry_type.to_string(),
            download_url: None,
            html_url: None,
        };

        assert!(entry("idea.md", "file").is_note_file());
        assert!(!entry("README.md", "file").is_note_file());
        assert!(!entry("photo.png", "file").is_note_file());
        assert!(!entry("subdir", "dir").is_note_file());
        assert!(entry("subdir", "dir").is_dir());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_remote_unavailable() {
        // Nothing listens on this port; the request fails at connect time
        let store = GitHubStore::new(test_config()).with_api_base("http://127.0.0.1:1");
        match store.list_dir("notes").await {
            Err(NoteError::RemoteUnavailable(_)) => {}
            other => panic!("expected RemoteUnavailable, got {:?}", other.map(|v| v.len())),
        }
    }
}
