pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::manuscript::handlers as manuscript;
use crate::state::AppState;
use crate::writing::handlers as writing;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rewriting
        .route("/api/v1/paraphrase", post(writing::handle_paraphrase))
        .route(
            "/api/v1/paraphrase/literary",
            post(writing::handle_literary_paraphrase),
        )
        .route(
            "/api/v1/paraphrase/compare",
            post(writing::handle_compare_paraphrase),
        )
        .route("/api/v1/summarize", post(writing::handle_summarize))
        .route("/api/v1/humanize", post(writing::handle_humanize))
        .route("/api/v1/synonyms", post(writing::handle_synonyms))
        // Analyses
        .route("/api/v1/analyze/tone", post(writing::handle_analyze_tone))
        .route("/api/v1/analyze/grammar", post(writing::handle_check_grammar))
        .route(
            "/api/v1/analyze/character",
            post(writing::handle_analyze_character),
        )
        .route(
            "/api/v1/analyze/character/suggestions",
            post(writing::handle_character_suggestions),
        )
        .route("/api/v1/analyze/plot", post(writing::handle_analyze_plot))
        .route("/api/v1/analyze/scene", post(writing::handle_analyze_scene))
        .route(
            "/api/v1/analyze/readability",
            post(writing::handle_analyze_readability),
        )
        .route(
            "/api/v1/analyze/manuscript",
            post(writing::handle_analyze_manuscript),
        )
        // Manuscript
        .route(
            "/api/v1/chapters",
            get(manuscript::handle_list_chapters).post(manuscript::handle_create_chapter),
        )
        .route(
            "/api/v1/chapters/:id",
            put(manuscript::handle_update_chapter).delete(manuscript::handle_delete_chapter),
        )
        .route(
            "/api/v1/settings/api-key",
            get(manuscript::handle_api_key_status).put(manuscript::handle_set_api_key),
        )
        .with_state(state)
}
