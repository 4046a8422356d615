//! Axum route handlers for the writing operations.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::manuscript::models::ChapterSummary;
use crate::state::AppState;
use crate::writing::frozen::FrozenWords;
use crate::writing::operation::{LiteraryOptions, Operation};
use crate::writing::service::{self, ComparedParaphrase};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParaphraseRequest {
    pub text: String,
    #[serde(default)]
    pub mode: String,
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub frozen_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteraryParaphraseRequest {
    pub text: String,
    #[serde(flatten)]
    pub options: LiteraryOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub text: String,
    pub modes: Vec<String>,
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub frozen_words: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub success: bool,
    pub result: String,
    pub original_length: usize,
    pub new_length: usize,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub success: bool,
    pub results: Vec<ComparedParaphrase>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_length")]
    pub length: String,
}

fn default_length() -> String {
    "medium".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub compression_ratio: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct HumanizeResponse {
    pub success: bool,
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct SynonymsRequest {
    pub word: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct SynonymsResponse {
    pub success: bool,
    pub synonyms: Value,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: Value,
}

#[derive(Debug, Deserialize)]
pub struct GrammarRequest {
    pub text: String,
    #[serde(default = "default_grammar_level")]
    pub level: String,
}

fn default_grammar_level() -> String {
    "standard".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRequest {
    pub text: String,
    pub character_name: String,
    #[serde(default)]
    pub analysis_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSuggestionsRequest {
    pub character_name: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub focus_area: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterSuggestionsResponse {
    pub success: bool,
    pub suggestions: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotRequest {
    pub text: String,
    #[serde(default)]
    pub plot_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRequest {
    pub text: String,
    #[serde(default)]
    pub scene_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityRequest {
    pub text: String,
    #[serde(default = "default_audience")]
    pub target_audience: String,
}

fn default_audience() -> String {
    "general".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct ManuscriptRequest {
    /// Defaults to the chapters in the local store.
    pub chapters: Option<Vec<ChapterSummary>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/paraphrase
pub async fn handle_paraphrase(
    State(state): State<AppState>,
    Json(request): Json<ParaphraseRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    require_text("text", &request.text)?;

    let frozen = FrozenWords::new(&request.frozen_words);
    let result = service::paraphrase(
        state.llm.as_ref(),
        &request.mode,
        request.custom_prompt.as_deref(),
        &frozen,
        &request.text,
    )
    .await?;

    Ok(Json(rewrite_response(&request.text, result)))
}

/// POST /api/v1/paraphrase/literary
pub async fn handle_literary_paraphrase(
    State(state): State<AppState>,
    Json(request): Json<LiteraryParaphraseRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    require_text("text", &request.text)?;

    let operation = Operation::LiteraryParaphrase(request.options);
    let result = service::execute_text(state.llm.as_ref(), &operation, &request.text).await?;

    Ok(Json(rewrite_response(&request.text, result)))
}

/// POST /api/v1/paraphrase/compare
///
/// Runs several modes at once. Results arrive in completion order; match them
/// to modes by the `mode` tag, not by position.
pub async fn handle_compare_paraphrase(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    require_text("text", &request.text)?;
    if request.modes.is_empty() {
        return Err(AppError::Validation("modes cannot be empty".to_string()));
    }

    let results = service::compare_paraphrases(
        state.llm.clone(),
        request.text,
        request.modes,
        request.custom_prompt,
        request.frozen_words,
    )
    .await;

    Ok(Json(CompareResponse {
        success: true,
        results,
    }))
}

/// POST /api/v1/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    require_text("text", &request.text)?;

    let operation = Operation::Summarize {
        length: request.length,
    };
    let summary = service::execute_text(state.llm.as_ref(), &operation, &request.text).await?;

    let original_length = request.text.chars().count();
    let summary_length = summary.chars().count();
    Ok(Json(SummarizeResponse {
        success: true,
        compression_ratio: compression_ratio(original_length, summary_length),
        summary,
        original_length,
        summary_length,
    }))
}

/// POST /api/v1/humanize
pub async fn handle_humanize(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<HumanizeResponse>, AppError> {
    require_text("text", &request.text)?;
    let result =
        service::execute_text(state.llm.as_ref(), &Operation::Humanize, &request.text).await?;
    Ok(Json(HumanizeResponse {
        success: true,
        result,
    }))
}

/// POST /api/v1/synonyms
pub async fn handle_synonyms(
    State(state): State<AppState>,
    Json(request): Json<SynonymsRequest>,
) -> Result<Json<SynonymsResponse>, AppError> {
    require_text("word", &request.word)?;

    let operation = Operation::Synonyms {
        word: request.word.trim().to_string(),
        context: request.context,
    };
    let synonyms = service::execute(state.llm.as_ref(), &operation, "").await?;
    Ok(Json(SynonymsResponse {
        success: true,
        synonyms: synonyms.into_value(),
    }))
}

/// POST /api/v1/analyze/tone
pub async fn handle_analyze_tone(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    analyze(&state, Operation::AnalyzeTone, &request.text).await
}

/// POST /api/v1/analyze/grammar
pub async fn handle_check_grammar(
    State(state): State<AppState>,
    Json(request): Json<GrammarRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let operation = Operation::CheckGrammar {
        level: request.level,
    };
    analyze(&state, operation, &request.text).await
}

/// POST /api/v1/analyze/character
pub async fn handle_analyze_character(
    State(state): State<AppState>,
    Json(request): Json<CharacterRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    require_text("characterName", &request.character_name)?;
    let operation = Operation::AnalyzeCharacter {
        name: request.character_name,
        focus: request.analysis_type,
    };
    analyze(&state, operation, &request.text).await
}

/// POST /api/v1/analyze/character/suggestions
pub async fn handle_character_suggestions(
    State(state): State<AppState>,
    Json(request): Json<CharacterSuggestionsRequest>,
) -> Result<Json<CharacterSuggestionsResponse>, AppError> {
    require_text("characterName", &request.character_name)?;
    let operation = Operation::CharacterSuggestions {
        name: request.character_name,
        traits: request.traits,
        focus_area: request.focus_area,
    };
    let suggestions = service::execute(state.llm.as_ref(), &operation, "").await?;
    Ok(Json(CharacterSuggestionsResponse {
        success: true,
        suggestions: suggestions.into_value(),
    }))
}

/// POST /api/v1/analyze/plot
pub async fn handle_analyze_plot(
    State(state): State<AppState>,
    Json(request): Json<PlotRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let operation = Operation::AnalyzePlot {
        structure: request.plot_type,
    };
    analyze(&state, operation, &request.text).await
}

/// POST /api/v1/analyze/scene
pub async fn handle_analyze_scene(
    State(state): State<AppState>,
    Json(request): Json<SceneRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let operation = Operation::AnalyzeScene {
        scene_kind: request.scene_type,
    };
    analyze(&state, operation, &request.text).await
}

/// POST /api/v1/analyze/readability
pub async fn handle_analyze_readability(
    State(state): State<AppState>,
    Json(request): Json<ReadabilityRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let operation = Operation::AnalyzeReadability {
        target_audience: request.target_audience,
    };
    analyze(&state, operation, &request.text).await
}

/// POST /api/v1/analyze/manuscript
pub async fn handle_analyze_manuscript(
    State(state): State<AppState>,
    Json(request): Json<ManuscriptRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let chapter_summaries: Vec<ChapterSummary> = match request.chapters {
        Some(chapters) => chapters.into_iter().map(ChapterSummary::bounded).collect(),
        None => state
            .store
            .chapters()?
            .iter()
            .map(ChapterSummary::from)
            .collect(),
    };
    if chapter_summaries.is_empty() {
        return Err(AppError::Validation(
            "Add at least one chapter before analyzing the manuscript".to_string(),
        ));
    }

    let operation = Operation::AnalyzeManuscript { chapter_summaries };
    let analysis = service::execute(state.llm.as_ref(), &operation, "").await?;
    Ok(Json(AnalysisResponse {
        success: true,
        analysis: analysis.into_value(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn analyze(
    state: &AppState,
    operation: Operation,
    text: &str,
) -> Result<Json<AnalysisResponse>, AppError> {
    require_text("text", text)?;
    let analysis = service::execute(state.llm.as_ref(), &operation, text).await?;
    Ok(Json(AnalysisResponse {
        success: true,
        analysis: analysis.into_value(),
    }))
}

/// The model is never called on blank input.
fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn rewrite_response(original: &str, result: String) -> RewriteResponse {
    RewriteResponse {
        success: true,
        original_length: original.chars().count(),
        new_length: result.chars().count(),
        result,
    }
}

/// Percentage saved, one decimal place. Negative when the summary is longer.
pub fn compression_ratio(original_length: usize, summary_length: usize) -> String {
    if original_length == 0 {
        return "0.0".to_string();
    }
    let ratio = (original_length as f64 - summary_length as f64) / original_length as f64 * 100.0;
    format!("{ratio:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio_one_decimal() {
        assert_eq!(compression_ratio(200, 50), "75.0");
        assert_eq!(compression_ratio(3, 2), "33.3");
        assert_eq!(compression_ratio(10, 15), "-50.0");
        assert_eq!(compression_ratio(0, 5), "0.0");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("text", "   \n").is_err());
        assert!(require_text("text", "ok").is_ok());
    }

    #[test]
    fn test_literary_request_flattens_options() {
        let json = r#"{
            "text": "It was night.",
            "mode": "Gothic",
            "writingStyle": "dickens",
            "targetAudience": "general",
            "preserveDialogue": false
        }"#;
        let request: LiteraryParaphraseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.options.writing_style, "dickens");
        assert!(!request.options.preserve_dialogue);
    }

    #[test]
    fn test_paraphrase_request_defaults() {
        let request: ParaphraseRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert!(request.mode.is_empty());
        assert!(request.frozen_words.is_empty());
        assert!(request.custom_prompt.is_none());
    }
}
