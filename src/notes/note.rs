//! Note model and the filename/content derivation heuristics.
//!
//! A note's title, preview and date are never stored separately — they are
//! derived from the filename and the Markdown body whenever a note record
//! is built from a file.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum preview length before the ellipsis is appended
const PREVIEW_LEN: usize = 150;

static DATE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-").unwrap());
static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 _.-]+\.md$").unwrap());
static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 _-]+$").unwrap());

/// A Markdown note as served to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// GitHub blob SHA for remote notes, `local-<millis>` token for local ones
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub preview: String,
    /// RFC 3339; from a `YYYY-MM-DD-` filename prefix if present, else write time
    pub date: String,
    pub last_modified: String,
    /// Permalink to the hosted file; `None` means no remote location
    pub url: Option<String>,
}

impl Note {
    /// Build a note from a fetched or submitted Markdown file.
    pub fn from_file(
        id: String,
        file_name: &str,
        category: &str,
        content: String,
        url: Option<String>,
    ) -> Self {
        let date = derive_date(file_name)
            .unwrap_or_else(Utc::now)
            .to_rfc3339();
        Self {
            id,
            title: derive_title(file_name),
            category: category.to_string(),
            preview: derive_preview(&content),
            content,
            last_modified: date.clone(),
            date,
            url,
        }
    }
}

/// Generate a locally unique, timestamp-based note id.
pub fn local_note_id() -> String {
    format!("local-{}", Utc::now().timestamp_millis())
}

/// Derive a display title from a filename: date prefix and `.md` extension
/// stripped, `-`/`_` replaced with spaces, each word capitalized.
pub fn derive_title(file_name: &str) -> String {
    let stem = DATE_PREFIX_RE.replace(file_name, "");
    let stem = stem.as_ref();
    let stem = stem.strip_suffix(".md").unwrap_or(stem);

    let title = stem
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ");

    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a plain-text preview: Markdown punctuation stripped, whitespace
/// collapsed, truncated to 150 characters with a trailing ellipsis.
pub fn derive_preview(content: &str) -> String {
    let stripped: String = content
        .chars()
        .map(|c| match c {
            '#' | '*' | '`' | '[' | ']' | '(' | ')' | '>' | '_' | '~' => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<&str>>().join(" ");

    if collapsed.chars().count() > PREVIEW_LEN {
        let truncated: String = collapsed.chars().take(PREVIEW_LEN).collect();
        format!("{}...", truncated.trim_end())
    } else {
        collapsed
    }
}

/// Extract a date from a `YYYY-MM-DD-` filename prefix, if present and valid.
pub fn derive_date(file_name: &str) -> Option<DateTime<Utc>> {
    let caps = DATE_PREFIX_RE.captures(file_name)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Filenames must be plain Markdown files with no path separators.
pub fn is_valid_file_name(file_name: &str) -> bool {
    FILE_NAME_RE.is_match(file_name)
}

/// Categories become directory names, so they are restricted to a safe set.
pub fn is_valid_category(category: &str) -> bool {
    CATEGORY_RE.is_match(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("idea.md"), "Idea");
        assert_eq!(derive_title("my_project-notes.md"), "My Project Notes");
        assert_eq!(derive_title("2024-01-15-rust-ownership.md"), "Rust Ownership");
        assert_eq!(derive_title(".md"), "Untitled");
    }

    #[test]
    fn test_derive_date_from_prefix() {
        let date = derive_date("2024-01-15-rust-ownership.md").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-15T00:00:00+00:00");

        // No prefix, or an invalid calendar date
        assert!(derive_date("idea.md").is_none());
        assert!(derive_date("2024-13-99-bad.md").is_none());
    }

    #[test]
    fn test_preview_strips_markdown_and_truncates() {
        let preview = derive_preview("# Heading\n\nSome **bold** and `code` and [a link](http://x)");
        for forbidden in ['#', '*', '`', '[', ']'] {
            assert!(!preview.contains(forbidden), "preview contains {}", forbidden);
        }
        assert!(preview.contains("Heading"));
        assert!(preview.contains("bold"));

        let long = "word ".repeat(100);
        let preview = derive_preview(&long);
        assert!(preview.chars().count() <= 153);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_short_content_unchanged() {
        assert_eq!(derive_preview("just plain text"), "just plain text");
    }

    #[test]
    fn test_file_name_validation() {
        assert!(is_valid_file_name("idea.md"));
        assert!(is_valid_file_name("2024-01-15 My Note.md"));
        assert!(!is_valid_file_name("idea.txt"));
        assert!(!is_valid_file_name("../escape.md"));
        assert!(!is_valid_file_name("notes/idea.md"));
        assert!(!is_valid_file_name(".md"));
    }

    #[test]
    fn test_category_validation() {
        assert!(is_valid_category("ideas"));
        assert!(is_valid_category("Work Stuff"));
        assert!(!is_valid_category("a/b"));
        assert!(!is_valid_category(""));
    }

    #[test]
    fn test_from_file_uses_filename_date() {
        let note = Note::from_file(
            "sha123".to_string(),
            "2023-06-01-standup.md",
            "work",
            "# Standup\nnotes".to_string(),
            Some("https://github.com/o/r/blob/main/notes/work/2023-06-01-standup.md".to_string()),
        );
        assert_eq!(note.title, "Standup");
        assert_eq!(note.date, "2023-06-01T00:00:00+00:00");
        assert_eq!(note.date, note.last_modified);
        assert!(note.url.is_some());
    }
}
