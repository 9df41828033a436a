//! HTTP request handlers for the Tawfiq API
//!
//! Implements the request orchestrator: the three public
//! operations plus health. Each handler is stateless; all
//! continuity lives in the caller-supplied history, and the only
//! shared state is the read-only service container.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::core::error::TawfiqError;
use crate::core::hadith::RangeLimit;
use crate::core::services::Services;
use crate::core::types::*;

/// Health check handler
///
/// Returns server status, version, and corpus counts.
pub async fn health_handler(State(services): State<Arc<Services>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        surahs: services.corpus.surah_count(),
        hadith_records: services.corpus.all_hadith_records().len(),
    })
}

/// Ask handler
///
/// Validates the conversation history, answers from the built-in
/// knowledge base when the latest user turn matches, and otherwise
/// replays the full history through the completion gateway.
///
/// # Errors
///
/// - `InvalidHistory`: empty history, history not ending in a user
///   turn, or a blank final question (400). The gateway is never
///   invoked on invalid input.
pub async fn ask_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, TawfiqError> {
    let question = validate_history(&req.history)?;

    info!(turns = req.history.len(), question = %question, "question received");

    if let Some(answer) = services.knowledge.lookup(question) {
        return Ok(Json(AskResponse {
            answer: answer.to_string(),
            source: AnswerSource::Knowledge,
        }));
    }

    let result = services.gateway.complete(&req.history).await;
    Ok(Json(result.into()))
}

/// Quran query handler
///
/// Resolves a surah number, name/alias, or keyword to a full verse
/// list. A miss returns the uniform "no result found" body with
/// HTTP 200, since the UI always expects a 2xx with either populated or
/// empty-looking content.
pub async fn quran_query_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<QuranQueryRequest>,
) -> Json<QuranQueryResponse> {
    let response = match services.quran.resolve(&req.query) {
        Some(surah) => QuranQueryResponse::from(surah),
        None => QuranQueryResponse::no_result(),
    };

    Json(response)
}

/// Hadith query handler
///
/// Filters the hadith corpus on query/topic and applies the range
/// bound after filtering. Zero matches is a valid empty 2xx
/// result, never an error.
pub async fn hadith_query_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<HadithQueryRequest>,
) -> Json<HadithQueryResponse> {
    let range = RangeLimit::parse(&req.range);
    let results: Vec<HadithRecord> = services
        .hadith
        .search(&req.query, &req.topic, range)
        .into_iter()
        .cloned()
        .collect();

    let count = results.len();
    Json(HadithQueryResponse { results, count })
}

/// Validate that the history is a non-empty ordered sequence
/// ending in a user turn with a non-blank question, and return
/// that question.
fn validate_history(history: &[ConversationTurn]) -> Result<&str, TawfiqError> {
    let last = history.last().ok_or_else(|| {
        TawfiqError::InvalidHistory("history must not be empty".to_string())
    })?;

    if last.role != Role::User {
        return Err(TawfiqError::InvalidHistory(
            "history must end in a user turn".to_string(),
        ));
    }

    let question = last.content.trim();
    if question.is_empty() {
        return Err(TawfiqError::InvalidHistory(
            "final user turn must not be blank".to_string(),
        ));
    }

    Ok(question)
}
