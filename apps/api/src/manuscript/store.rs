//! Local store: the single-user persistence file that stands in for browser
//! local storage.
//!
//! The file is a JSON object of string values keyed exactly like the editor's
//! local-storage entries, so an exported local storage can be dropped in as-is:
//! `manuscript_chapters` holds a JSON-encoded chapter array, `gemini_api_key`
//! the raw key. Loaded once at startup, written through on every mutation.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context};
use chrono::Local;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::manuscript::models::{word_count, Chapter, ChapterStatus};

pub const CHAPTERS_KEY: &str = "manuscript_chapters";
pub const API_KEY_KEY: &str = "gemini_api_key";

#[derive(Debug, Deserialize)]
pub struct NewChapter {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterUpdate {
    pub title: String,
    pub content: String,
    pub status: ChapterStatus,
}

struct StoreState {
    entries: BTreeMap<String, String>,
    chapters: Vec<Chapter>,
}

pub struct LocalStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is a startup error rather than something to overwrite.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries: BTreeMap<String, String> = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Store file {} is not valid JSON", path.display()))?
        } else {
            BTreeMap::new()
        };

        let chapters: Vec<Chapter> = match entries.get(CHAPTERS_KEY) {
            Some(raw) => serde_json::from_str(raw)
                .with_context(|| format!("'{CHAPTERS_KEY}' in {} is malformed", path.display()))?,
            None => Vec::new(),
        };

        info!(
            "Local store loaded from {} ({} chapters)",
            path.display(),
            chapters.len()
        );

        Ok(Self {
            path,
            state: Mutex::new(StoreState { entries, chapters }),
        })
    }

    pub fn chapters(&self) -> Result<Vec<Chapter>, AppError> {
        Ok(self.lock()?.chapters.clone())
    }

    pub fn add_chapter(&self, new: NewChapter) -> Result<Chapter, AppError> {
        validate_chapter(&new.title, &new.content)?;

        let mut state = self.lock()?;
        let now = Local::now();
        // Timestamp ids, bumped past the newest one so two adds in the same
        // millisecond stay distinct.
        let newest = state.chapters.iter().map(|c| c.id).max().unwrap_or(0);
        let id = now.timestamp_millis().max(newest + 1);

        let chapter = Chapter {
            id,
            word_count: word_count(&new.content),
            title: new.title,
            content: new.content,
            created_at: now.format("%-m/%-d/%Y").to_string(),
            status: ChapterStatus::Draft,
        };
        let mut chapters = state.chapters.clone();
        chapters.push(chapter.clone());
        self.commit_chapters(&mut state, chapters)?;

        info!("Added chapter {id} ({} words)", chapter.word_count);
        Ok(chapter)
    }

    pub fn update_chapter(&self, id: i64, update: ChapterUpdate) -> Result<Chapter, AppError> {
        validate_chapter(&update.title, &update.content)?;

        let mut state = self.lock()?;
        let mut chapters = state.chapters.clone();
        let chapter = chapters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Chapter {id} not found")))?;

        chapter.word_count = word_count(&update.content);
        chapter.title = update.title;
        chapter.content = update.content;
        chapter.status = update.status;
        let updated = chapter.clone();

        self.commit_chapters(&mut state, chapters)?;
        debug!("Updated chapter {id}");
        Ok(updated)
    }

    pub fn delete_chapter(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let chapters: Vec<Chapter> = state
            .chapters
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        if chapters.len() == state.chapters.len() {
            return Err(AppError::NotFound(format!("Chapter {id} not found")));
        }
        self.commit_chapters(&mut state, chapters)?;
        info!("Deleted chapter {id}");
        Ok(())
    }

    pub fn api_key(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .lock()?
            .entries
            .get(API_KEY_KEY)
            .filter(|k| !k.trim().is_empty())
            .cloned())
    }

    pub fn set_api_key(&self, api_key: &str) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let mut entries = state.entries.clone();
        entries.insert(API_KEY_KEY.to_string(), api_key.to_string());
        self.write(&entries)?;
        state.entries = entries;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("local store lock poisoned")))
    }

    /// Writes `chapters` through to disk and only then installs them, so a
    /// failed write leaves the in-memory state as it was.
    fn commit_chapters(
        &self,
        state: &mut StoreState,
        chapters: Vec<Chapter>,
    ) -> Result<(), AppError> {
        let encoded = serde_json::to_string(&chapters).context("Failed to encode chapters")?;
        let mut entries = state.entries.clone();
        entries.insert(CHAPTERS_KEY.to_string(), encoded);
        self.write(&entries)?;

        state.entries = entries;
        state.chapters = chapters;
        Ok(())
    }

    /// Rewrites the whole file.
    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(entries).context("Failed to encode store")?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("Failed to write store file {}", self.path.display()))?;
        Ok(())
    }
}

fn validate_chapter(title: &str, content: &str) -> Result<(), AppError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::Validation(
            "Chapter title and content are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_chapter(title: &str, content: &str) -> NewChapter {
        NewChapter {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        assert!(store.chapters().unwrap().is_empty());
        assert_eq!(store.api_key().unwrap(), None);
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = LocalStore::open(&path).unwrap();

        let first = store.add_chapter(new_chapter("One", "It  began here.")).unwrap();
        let second = store.add_chapter(new_chapter("Two", "And went on")).unwrap();
        assert_eq!(first.word_count, 3);
        assert_eq!(first.status, ChapterStatus::Draft);
        assert!(second.id > first.id);

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.chapters().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_file_uses_local_storage_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = LocalStore::open(&path).unwrap();
        store.add_chapter(new_chapter("One", "words")).unwrap();
        store.set_api_key("secret").unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[API_KEY_KEY], "secret");
        let chapters: Vec<serde_json::Value> = serde_json::from_str(&raw[CHAPTERS_KEY]).unwrap();
        assert_eq!(chapters[0]["title"], "One");
        assert_eq!(chapters[0]["wordCount"], 1);
        assert_eq!(chapters[0]["status"], "draft");
    }

    #[test]
    fn test_blank_chapter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        let err = store.add_chapter(new_chapter("  ", "content")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!dir.path().join("store.json").exists());
    }

    #[test]
    fn test_update_recomputes_word_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        let chapter = store.add_chapter(new_chapter("One", "short")).unwrap();

        let updated = store
            .update_chapter(
                chapter.id,
                ChapterUpdate {
                    title: "One, revised".to_string(),
                    content: "a much longer body now".to_string(),
                    status: ChapterStatus::Final,
                },
            )
            .unwrap();
        assert_eq!(updated.word_count, 5);
        assert_eq!(updated.status, ChapterStatus::Final);
        assert_eq!(updated.created_at, chapter.created_at);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        let update = ChapterUpdate {
            title: "t".to_string(),
            content: "c".to_string(),
            status: ChapterStatus::Review,
        };
        assert!(matches!(
            store.update_chapter(42, update),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete_chapter(42), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_chapter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = LocalStore::open(&path).unwrap();
        let chapter = store.add_chapter(new_chapter("One", "text")).unwrap();
        store.delete_chapter(chapter.id).unwrap();
        assert!(LocalStore::open(&path).unwrap().chapters().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_chapters_fail_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"manuscript_chapters": "not json"}"#).unwrap();
        assert!(LocalStore::open(&path).is_err());
    }

    #[test]
    fn test_blank_api_key_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        store.set_api_key("").unwrap();
        assert_eq!(store.api_key().unwrap(), None);
    }

    #[test]
    fn test_blank_update_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        let chapter = store.add_chapter(new_chapter("One", "text")).unwrap();
        let update = ChapterUpdate {
            title: "One".to_string(),
            content: "   ".to_string(),
            status: ChapterStatus::Review,
        };
        assert!(matches!(
            store.update_chapter(chapter.id, update),
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.chapters().unwrap(), vec![chapter]);
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = LocalStore::open(&path).unwrap();
        let kept = store.add_chapter(new_chapter("One", "text")).unwrap();

        // A directory where the file should be makes every write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.add_chapter(new_chapter("Two", "more")).is_err());
        let update = ChapterUpdate {
            title: "Changed".to_string(),
            content: "changed".to_string(),
            status: ChapterStatus::Final,
        };
        assert!(store.update_chapter(kept.id, update).is_err());
        assert!(store.delete_chapter(kept.id).is_err());
        assert!(store.set_api_key("secret").is_err());

        assert_eq!(store.chapters().unwrap(), vec![kept]);
        assert_eq!(store.api_key().unwrap(), None);
    }
}
