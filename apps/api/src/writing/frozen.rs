//! Frozen words: terms the user has pinned so a paraphrase must not touch them.
//!
//! Before the call each whole-word occurrence is wrapped as `[FROZEN]word[/FROZEN]`;
//! after the call the markers are removed and the word restored in its
//! canonical spelling.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;

const OPEN: &str = "[FROZEN]";
const CLOSE: &str = "[/FROZEN]";

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        RegexBuilder::new(r"\[FROZEN\](.*?)\[/FROZEN\]")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("marker pattern is valid")
    })
}

pub struct FrozenWords {
    /// One alternation over every word, longest first, so overlapping words
    /// are wrapped once by the longest match.
    pattern: Option<Regex>,
    /// Lowercased word to the spelling the user typed.
    canonical: HashMap<String, String>,
}

impl FrozenWords {
    /// Blank entries are ignored. If the combined pattern cannot be compiled
    /// the words are left unprotected with a warning rather than failing the
    /// request.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = HashMap::new();
        for w in words {
            let word = w.as_ref().trim();
            if !word.is_empty() {
                canonical
                    .entry(word.to_lowercase())
                    .or_insert_with(|| word.to_string());
            }
        }

        let mut ordered: Vec<&String> = canonical.values().collect();
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let pattern = if ordered.is_empty() {
            None
        } else {
            let alternation = ordered
                .iter()
                .map(|w| word_pattern(w))
                .collect::<Vec<_>>()
                .join("|");
            match RegexBuilder::new(&format!("(?:{alternation})"))
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Frozen words left unprotected: {e}");
                    None
                }
            }
        };

        Self { pattern, canonical }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Wraps every occurrence of a frozen word in markers, in a single pass.
    pub fn protect(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &regex::Captures| {
                    format!("{OPEN}{}{CLOSE}", &caps[0])
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Strips every marker pair. A marked frozen word comes back as the user
    /// typed it; anything else inside markers is kept as the model wrote it.
    pub fn restore(&self, text: &str) -> String {
        marker_regex()
            .replace_all(text, |caps: &regex::Captures| {
                let inner = &caps[1];
                self.canonical
                    .get(&inner.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| inner.to_string())
            })
            .into_owned()
    }
}

/// `\b` is only meaningful next to a word character, so it is added on a side
/// only when the word starts or ends with one.
fn word_pattern(word: &str) -> String {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
    let leading = word.chars().next().is_some_and(is_word_char);
    let trailing = word.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(word),
        if trailing { r"\b" } else { "" }
    )
}
