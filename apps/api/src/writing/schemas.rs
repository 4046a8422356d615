//! Structured-reply schemas and the per-operation fallback table.
//!
//! Field names are the public contract toward the editor UI, which renders by
//! key. They must stay camelCase and match the instructions in `prompts.rs`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::manuscript::models::ChapterSummary;
use crate::writing::operation::{NormalizedResult, Operation};
use crate::writing::prompt_builder::SYNONYM_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneAnalysis {
    pub overall_tone: String,
    pub sentiment: String,
    pub confidence: String,
    pub emotions: Vec<String>,
    pub suggestions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: String,
    pub original_text: String,
    pub description: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarAnalysis {
    pub overall_score: u32,
    pub issues: Vec<GrammarIssue>,
    pub readability: String,
    pub sentence_variety: String,
    pub vocabulary_level: String,
    pub passive_voice_usage: u32,
    pub style_notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAnalysis {
    pub traits: Vec<String>,
    pub voice_tone: String,
    pub speech_pattern: String,
    pub vocabulary_level: String,
    pub emotional_range: String,
    pub development_notes: String,
    pub inconsistencies: Vec<String>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSuggestion {
    pub category: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotStage {
    pub name: String,
    pub completion: u32,
    pub description: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotRecommendation {
    pub priority: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotAnalysis {
    pub overall_score: u32,
    pub stages: Vec<PlotStage>,
    pub pacing: String,
    pub conflict: String,
    pub character_arc: String,
    pub theme_development: String,
    pub recommendations: Vec<PlotRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSuggestion {
    #[serde(rename = "type")]
    pub suggestion_type: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneAnalysis {
    pub conflict_level: u32,
    pub tension_rating: u32,
    pub pace_rating: u32,
    pub dialogue_quality: u32,
    pub character_development: u32,
    pub conflict_types: Vec<String>,
    pub tension_techniques: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<SceneSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadabilityImprovement {
    pub issue: String,
    pub suggestion: String,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityAnalysis {
    pub readability_score: u32,
    pub grade_level: String,
    pub target_match: bool,
    pub word_complexity: String,
    pub sentence_length: String,
    pub vocabulary_level: String,
    pub improvements: Vec<ReadabilityImprovement>,
    pub strengths: Vec<String>,
    pub optimized_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInsight {
    pub chapter_number: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub pace_rating: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManuscriptAnalysis {
    pub overall_progress: u32,
    pub total_word_count: u64,
    pub average_chapter_length: u64,
    pub pace_analysis: String,
    pub consistency_issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub readability_score: u32,
    pub chapter_insights: Vec<ChapterInsight>,
}

/// The value substituted when a structured reply cannot be recovered.
/// Pure: depends only on the operation, the raw reply and the subject text.
pub fn fallback(operation: &Operation, raw: &str, subject: &str) -> NormalizedResult {
    match operation {
        Operation::Paraphrase { .. }
        | Operation::LiteraryParaphrase(_)
        | Operation::Summarize { .. }
        | Operation::Humanize => NormalizedResult::PlainText(raw.trim().to_string()),
        Operation::AnalyzeTone => record(&ToneAnalysis {
            overall_tone: raw.trim().to_string(),
            sentiment: "neutral".to_string(),
            confidence: "medium".to_string(),
            emotions: vec![],
            suggestions: String::new(),
        }),
        Operation::CheckGrammar { .. } => record(&GrammarAnalysis {
            overall_score: 75,
            issues: vec![],
            readability: "Analysis completed successfully".to_string(),
            sentence_variety: "Standard variety observed".to_string(),
            vocabulary_level: "Appropriate for intended audience".to_string(),
            passive_voice_usage: 0,
            style_notes: "Text analyzed for style and structure".to_string(),
        }),
        Operation::AnalyzeCharacter { .. } => record(&CharacterAnalysis {
            traits: vec!["Character analyzed".to_string()],
            voice_tone: "Analysis completed successfully".to_string(),
            speech_pattern: "Patterns identified".to_string(),
            vocabulary_level: "Appropriate level".to_string(),
            emotional_range: "Emotions observed".to_string(),
            development_notes: "Character development noted".to_string(),
            inconsistencies: vec![],
            strengths: vec!["Character strengths identified".to_string()],
            improvement_areas: vec!["Areas for development noted".to_string()],
        }),
        Operation::CharacterSuggestions { .. } => list(&[CharacterSuggestion {
            category: "General Development".to_string(),
            description: "Character enhancement suggestions generated".to_string(),
            example: "See detailed analysis for specific recommendations".to_string(),
        }]),
        Operation::AnalyzePlot { .. } => record(&PlotAnalysis {
            overall_score: 75,
            stages: vec![PlotStage {
                name: "Structure Analysis".to_string(),
                completion: 75,
                description: "Plot structure analyzed successfully".to_string(),
                suggestions: vec!["Continue developing your story structure".to_string()],
            }],
            pacing: "Pacing analysis completed".to_string(),
            conflict: "Conflict development noted".to_string(),
            character_arc: "Character development observed".to_string(),
            theme_development: "Themes identified".to_string(),
            recommendations: vec![PlotRecommendation {
                priority: "medium".to_string(),
                title: "General Development".to_string(),
                description: "Continue refining your plot structure".to_string(),
            }],
        }),
        Operation::AnalyzeScene { .. } => record(&SceneAnalysis {
            conflict_level: 50,
            tension_rating: 50,
            pace_rating: 50,
            dialogue_quality: 50,
            character_development: 50,
            conflict_types: vec!["general".to_string()],
            tension_techniques: vec!["basic tension".to_string()],
            strengths: vec!["Scene analyzed".to_string()],
            improvements: vec!["Continue developing".to_string()],
            suggestions: vec![SceneSuggestion {
                suggestion_type: "General".to_string(),
                description: "Scene analysis completed".to_string(),
                example: "Continue refining your scene".to_string(),
            }],
        }),
        Operation::AnalyzeReadability { .. } => record(&ReadabilityAnalysis {
            readability_score: 75,
            grade_level: "General Adult".to_string(),
            target_match: true,
            word_complexity: "appropriate".to_string(),
            sentence_length: "good".to_string(),
            vocabulary_level: "suitable".to_string(),
            improvements: vec![ReadabilityImprovement {
                issue: "Analysis completed".to_string(),
                suggestion: "Continue refining text".to_string(),
                example: "Keep developing your writing".to_string(),
            }],
            strengths: vec!["Text analyzed successfully".to_string()],
            optimized_version: subject.to_string(),
        }),
        Operation::AnalyzeManuscript { chapter_summaries } => {
            record(&manuscript_fallback(chapter_summaries))
        }
        Operation::Synonyms { .. } => NormalizedResult::List(
            split_synonyms(raw)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    }
}

/// Totals are still computable locally when the model reply is unusable.
fn manuscript_fallback(chapters: &[ChapterSummary]) -> ManuscriptAnalysis {
    let total_word_count: u64 = chapters.iter().map(|c| c.word_count).sum();
    let average_chapter_length = match chapters.len() as u64 {
        0 => 0,
        n => (total_word_count + n / 2) / n,
    };
    ManuscriptAnalysis {
        overall_progress: 0,
        total_word_count,
        average_chapter_length,
        pace_analysis: "Analysis in progress".to_string(),
        consistency_issues: vec![],
        suggestions: vec!["Continue writing your manuscript".to_string()],
        readability_score: 75,
        chapter_insights: vec![],
    }
}

/// Comma-split recovery for synonym replies that are not a JSON array.
pub fn split_synonyms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().replace(['"', '\''], ""))
        .filter(|s| !s.is_empty())
        .take(SYNONYM_LIMIT)
        .collect()
}

fn record<T: Serialize>(value: &T) -> NormalizedResult {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => NormalizedResult::Record(map),
        _ => NormalizedResult::Record(Map::new()),
    }
}

fn list<T: Serialize>(items: &[T]) -> NormalizedResult {
    match serde_json::to_value(items) {
        Ok(Value::Array(items)) => NormalizedResult::List(items),
        _ => NormalizedResult::List(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tone_fallback_matches_contract() {
        let out = fallback(&Operation::AnalyzeTone, " Mostly calm. ", "");
        assert_eq!(
            out.into_value(),
            json!({
                "overallTone": "Mostly calm.",
                "sentiment": "neutral",
                "confidence": "medium",
                "emotions": [],
                "suggestions": ""
            })
        );
    }

    #[test]
    fn test_grammar_fallback_field_names() {
        let op = Operation::CheckGrammar {
            level: "basic".to_string(),
        };
        let value = fallback(&op, "", "").into_value();
        for field in [
            "overallScore",
            "issues",
            "readability",
            "sentenceVariety",
            "vocabularyLevel",
            "passiveVoiceUsage",
            "styleNotes",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn test_scene_suggestion_serializes_type_key() {
        let op = Operation::AnalyzeScene {
            scene_kind: "dialogue".to_string(),
        };
        let value = fallback(&op, "", "").into_value();
        assert_eq!(value["suggestions"][0]["type"], "General");
        assert_eq!(value["conflictLevel"], 50);
    }

    #[test]
    fn test_readability_fallback_echoes_subject() {
        let op = Operation::AnalyzeReadability {
            target_audience: "children".to_string(),
        };
        let value = fallback(&op, "garbled", "Once upon a time.").into_value();
        assert_eq!(value["optimizedVersion"], "Once upon a time.");
        assert_eq!(value["targetMatch"], true);
    }

    #[test]
    fn test_manuscript_fallback_totals_chapters() {
        let op = Operation::AnalyzeManuscript {
            chapter_summaries: vec![
                ChapterSummary {
                    title: "One".to_string(),
                    word_count: 1000,
                    content: String::new(),
                },
                ChapterSummary {
                    title: "Two".to_string(),
                    word_count: 2001,
                    content: String::new(),
                },
            ],
        };
        let value = fallback(&op, "", "").into_value();
        assert_eq!(value["totalWordCount"], 3001);
        assert_eq!(value["averageChapterLength"], 1501);
        assert_eq!(value["chapterInsights"], json!([]));
    }

    #[test]
    fn test_manuscript_fallback_without_chapters() {
        let op = Operation::AnalyzeManuscript {
            chapter_summaries: vec![],
        };
        let value = fallback(&op, "", "").into_value();
        assert_eq!(value["averageChapterLength"], 0);
    }

    #[test]
    fn test_character_suggestions_fallback_is_list() {
        let op = Operation::CharacterSuggestions {
            name: "Ada".to_string(),
            traits: vec![],
            focus_area: "dialogue".to_string(),
        };
        let out = fallback(&op, "", "");
        let items = out.as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["category"], "General Development");
    }

    #[test]
    fn test_split_synonyms_strips_quotes_and_caps() {
        let raw = r#""a", 'b', c, d, e, f, g, h, i, j"#;
        let out = split_synonyms(raw);
        assert_eq!(out.len(), SYNONYM_LIMIT);
        assert_eq!(out[0], "a");
        assert_eq!(out[1], "b");
    }

    #[test]
    fn test_split_synonyms_drops_empty_entries() {
        assert_eq!(split_synonyms("glad,, ,cheerful"), vec!["glad", "cheerful"]);
        assert!(split_synonyms("").is_empty());
    }

    #[test]
    fn test_well_formed_grammar_reply_deserializes() {
        let json = r#"{
            "overallScore": 88,
            "issues": [{
                "type": "Grammar",
                "severity": "minor",
                "originalText": "Their going",
                "description": "Wrong homophone",
                "suggestion": "They're going"
            }],
            "readability": "Grade 7",
            "sentenceVariety": "Good",
            "vocabularyLevel": "Moderate",
            "passiveVoiceUsage": 10,
            "styleNotes": "Clear"
        }"#;
        let parsed: GrammarAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.issues[0].issue_type, "Grammar");
        assert_eq!(parsed.issues[0].original_text, "Their going");
    }
}
