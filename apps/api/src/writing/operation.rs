//! Operation: the tagged request type that selects a prompt template and the
//! shape the model's reply must be normalized into.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::manuscript::models::ChapterSummary;

/// Options for the literary paraphraser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteraryOptions {
    pub mode: String,
    pub writing_style: String,
    pub target_audience: String,
    pub preserve_dialogue: bool,
}

#[derive(Debug, Clone)]
pub enum Operation {
    Paraphrase {
        mode: String,
        custom_instruction: Option<String>,
    },
    LiteraryParaphrase(LiteraryOptions),
    Summarize {
        length: String,
    },
    AnalyzeTone,
    CheckGrammar {
        level: String,
    },
    AnalyzeCharacter {
        name: String,
        focus: String,
    },
    CharacterSuggestions {
        name: String,
        traits: Vec<String>,
        focus_area: String,
    },
    AnalyzePlot {
        structure: String,
    },
    AnalyzeScene {
        scene_kind: String,
    },
    AnalyzeReadability {
        target_audience: String,
    },
    AnalyzeManuscript {
        chapter_summaries: Vec<ChapterSummary>,
    },
    Humanize,
    Synonyms {
        word: String,
        context: String,
    },
}

/// Which shape the caller expects back. Fixed per operation, never sniffed
/// from the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    PlainText,
    Record,
    List,
}

impl Operation {
    pub fn expected_shape(&self) -> ExpectedShape {
        match self {
            Operation::Paraphrase { .. }
            | Operation::LiteraryParaphrase(_)
            | Operation::Summarize { .. }
            | Operation::Humanize => ExpectedShape::PlainText,
            Operation::Synonyms { .. } | Operation::CharacterSuggestions { .. } => {
                ExpectedShape::List
            }
            Operation::AnalyzeTone
            | Operation::CheckGrammar { .. }
            | Operation::AnalyzeCharacter { .. }
            | Operation::AnalyzePlot { .. }
            | Operation::AnalyzeScene { .. }
            | Operation::AnalyzeReadability { .. }
            | Operation::AnalyzeManuscript { .. } => ExpectedShape::Record,
        }
    }

    /// Human-readable name used in logs and error banners.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Paraphrase { .. } => "Paraphrasing",
            Operation::LiteraryParaphrase(_) => "Advanced paraphrasing",
            Operation::Summarize { .. } => "Summarization",
            Operation::AnalyzeTone => "Tone analysis",
            Operation::CheckGrammar { .. } => "Grammar check",
            Operation::AnalyzeCharacter { .. } => "Character analysis",
            Operation::CharacterSuggestions { .. } => "Character suggestions",
            Operation::AnalyzePlot { .. } => "Plot analysis",
            Operation::AnalyzeScene { .. } => "Scene analysis",
            Operation::AnalyzeReadability { .. } => "Readability analysis",
            Operation::AnalyzeManuscript { .. } => "Manuscript analysis",
            Operation::Humanize => "Humanization",
            Operation::Synonyms { .. } => "Synonyms",
        }
    }
}

/// A single instruction bound for the model. Built per call, never stored.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub instruction_text: String,
}

/// The model's raw reply. Passed by value into the normalizer, which consumes it.
#[derive(Debug)]
pub struct ModelReply {
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    PlainText(String),
    Record(Map<String, Value>),
    List(Vec<Value>),
}

impl NormalizedResult {
    pub fn into_value(self) -> Value {
        match self {
            NormalizedResult::PlainText(s) => Value::String(s),
            NormalizedResult::Record(map) => Value::Object(map),
            NormalizedResult::List(items) => Value::Array(items),
        }
    }
}

#[cfg(test)]
impl NormalizedResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NormalizedResult::PlainText(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            NormalizedResult::Record(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            NormalizedResult::List(items) => Some(items),
            _ => None,
        }
    }
}
