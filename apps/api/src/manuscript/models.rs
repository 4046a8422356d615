use serde::{Deserialize, Serialize};

/// First N characters of each chapter sent along with a manuscript analysis.
pub const SUMMARY_CONTENT_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    #[default]
    Draft,
    Review,
    Final,
}

/// A chapter as persisted under `manuscript_chapters`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Millisecond timestamp of creation.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub word_count: u64,
    /// Creation date as `M/D/YYYY`.
    pub created_at: String,
    #[serde(default)]
    pub status: ChapterStatus,
}

/// What the manuscript analysis sees of a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub title: String,
    pub word_count: u64,
    pub content: String,
}

impl ChapterSummary {
    /// Caps `content` at `SUMMARY_CONTENT_CHARS` characters.
    pub fn bounded(mut self) -> Self {
        if self.content.chars().count() > SUMMARY_CONTENT_CHARS {
            self.content = self.content.chars().take(SUMMARY_CONTENT_CHARS).collect();
        }
        self
    }
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            title: chapter.title.clone(),
            word_count: chapter.word_count,
            content: chapter.content.clone(),
        }
        .bounded()
    }
}

/// Counts non-empty space-separated tokens.
pub fn word_count(content: &str) -> u64 {
    content.split(' ').filter(|w| !w.is_empty()).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_ignores_repeated_spaces() {
        assert_eq!(word_count("  one  two three "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_chapter_json_shape() {
        let json = r#"{
            "id": 1718000000000,
            "title": "Prologue",
            "content": "It was a dark night.",
            "wordCount": 5,
            "createdAt": "6/10/2024",
            "status": "review"
        }"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.status, ChapterStatus::Review);
        assert_eq!(chapter.word_count, 5);

        let back = serde_json::to_value(&chapter).unwrap();
        assert_eq!(back["createdAt"], "6/10/2024");
        assert_eq!(back["status"], "review");
    }

    #[test]
    fn test_missing_status_defaults_to_draft() {
        let json = r#"{"id": 1, "title": "t", "content": "c", "wordCount": 1, "createdAt": "1/1/2024"}"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.status, ChapterStatus::Draft);
    }

    #[test]
    fn test_summary_truncates_content_by_chars() {
        let chapter = Chapter {
            id: 1,
            title: "Long".to_string(),
            content: "é".repeat(600),
            word_count: 1,
            created_at: "1/1/2024".to_string(),
            status: ChapterStatus::Draft,
        };
        let summary = ChapterSummary::from(&chapter);
        assert_eq!(summary.content.chars().count(), SUMMARY_CONTENT_CHARS);
    }

    #[test]
    fn test_supplied_summary_is_bounded() {
        let summary = ChapterSummary {
            title: "Long".to_string(),
            word_count: 1,
            content: "é".repeat(SUMMARY_CONTENT_CHARS + 20),
        }
        .bounded();
        assert_eq!(summary.content.chars().count(), SUMMARY_CONTENT_CHARS);

        let short = ChapterSummary {
            title: "Short".to_string(),
            word_count: 2,
            content: "two words".to_string(),
        }
        .bounded();
        assert_eq!(short.content, "two words");
    }
}
