//! One model call per operation: build the instruction, send it once,
//! normalize the reply.
//!
//! Transport failures propagate as `AppError::Llm`; unusable replies do not,
//! the normalizer substitutes a fallback instead.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmError, ModelTransport};
use crate::writing::frozen::FrozenWords;
use crate::writing::normalizer::normalize;
use crate::writing::operation::{ModelReply, NormalizedResult, Operation};
use crate::writing::prompt_builder::build_request;

/// Runs `operation` over `subject` against the model.
pub async fn execute(
    llm: &dyn ModelTransport,
    operation: &Operation,
    subject: &str,
) -> Result<NormalizedResult, AppError> {
    let request = build_request(operation, subject);
    debug!(
        "{}: sending instruction ({} chars)",
        operation.label(),
        request.instruction_text.len()
    );

    let raw_text = llm
        .send(&request.instruction_text)
        .await
        .map_err(|e| llm_failure(operation, e))?;

    Ok(normalize(operation, ModelReply { raw_text }, subject))
}

/// Like `execute` for plain-text operations, returning the text directly.
pub async fn execute_text(
    llm: &dyn ModelTransport,
    operation: &Operation,
    subject: &str,
) -> Result<String, AppError> {
    match execute(llm, operation, subject).await? {
        NormalizedResult::PlainText(text) => Ok(text),
        other => Ok(other.into_value().to_string()),
    }
}

/// Paraphrases with frozen words protected across the model call.
pub async fn paraphrase(
    llm: &dyn ModelTransport,
    mode: &str,
    custom_instruction: Option<&str>,
    frozen: &FrozenWords,
    text: &str,
) -> Result<String, AppError> {
    let operation = Operation::Paraphrase {
        mode: mode.to_string(),
        custom_instruction: custom_instruction.map(str::to_string),
    };
    if frozen.is_empty() {
        return execute_text(llm, &operation, text).await;
    }
    let protected = frozen.protect(text);
    let result = execute_text(llm, &operation, &protected).await?;
    Ok(frozen.restore(&result))
}

/// One entry of a compare-mode run. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct ComparedParaphrase {
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Issues one paraphrase per mode concurrently. Results come back in completion
/// order, each tagged with the mode that produced it; a failing mode does not
/// cancel the others.
pub async fn compare_paraphrases(
    llm: Arc<dyn ModelTransport>,
    text: String,
    modes: Vec<String>,
    custom_instruction: Option<String>,
    frozen_words: Vec<String>,
) -> Vec<ComparedParaphrase> {
    let frozen = Arc::new(FrozenWords::new(&frozen_words));
    let text = Arc::new(text);
    let custom_instruction = Arc::new(custom_instruction);
    let mut set = JoinSet::new();

    for mode in modes {
        let llm = Arc::clone(&llm);
        let frozen = Arc::clone(&frozen);
        let text = Arc::clone(&text);
        let custom_instruction = Arc::clone(&custom_instruction);
        set.spawn(async move {
            let outcome = paraphrase(
                llm.as_ref(),
                &mode,
                custom_instruction.as_deref(),
                &frozen,
                &text,
            )
            .await;
            (mode, outcome)
        });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((mode, Ok(result))) => results.push(ComparedParaphrase {
                mode,
                result: Some(result),
                error: None,
            }),
            Ok((mode, Err(e))) => results.push(ComparedParaphrase {
                mode,
                result: None,
                error: Some(e.to_string()),
            }),
            Err(e) => warn!("Compare-mode paraphrase task failed: {e}"),
        }
    }

    info!("Compare-mode paraphrase finished with {} results", results.len());
    results
}

fn llm_failure(operation: &Operation, error: LlmError) -> AppError {
    match error {
        LlmError::MissingApiKey => AppError::MissingApiKey,
        other => AppError::Llm(format!("{} failed: {other}", operation.label())),
    }
}
