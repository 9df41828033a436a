// Shared test fixtures and helpers

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use tawfiq::core::config::Config;
use tawfiq::core::corpus::CorpusStore;
use tawfiq::core::llm::{CompletionProvider, ProviderError};
use tawfiq::core::services::Services;
use tawfiq::core::types::{ConversationTurn, HadithRecord, Role, Surah, Verse};
use tawfiq::http::{self, middleware as http_middleware};

/// Provider that always answers with a fixed reply
pub struct CannedProvider {
    pub reply: String,
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    async fn complete(
        &self,
        _system: &str,
        _history: &[ConversationTurn],
    ) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}

/// Provider that fails every call, as a timed-out upstream would
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(
        &self,
        _system: &str,
        _history: &[ConversationTurn],
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Transport("connection timed out".to_string()))
    }
}

#[allow(dead_code)]
pub fn user_turn(content: &str) -> ConversationTurn {
    ConversationTurn {
        role: Role::User,
        content: content.to_string(),
    }
}

#[allow(dead_code)]
pub fn assistant_turn(content: &str) -> ConversationTurn {
    ConversationTurn {
        role: Role::Assistant,
        content: content.to_string(),
    }
}

pub fn fixture_surah(number: u16, name: &str, aliases: &[&str], verse_count: u16) -> Surah {
    Surah {
        number,
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        verses: (1..=verse_count)
            .map(|n| Verse {
                number: n,
                arabic: format!("آية {n}"),
                translation: format!("verse {n} of {name}"),
                transliteration: None,
                audio: None,
            })
            .collect(),
    }
}

pub fn fixture_record(number: u32, title: &str, topic: Option<&str>) -> HadithRecord {
    HadithRecord {
        number,
        title: title.to_string(),
        text: format!("full text of hadith {number}"),
        topic: topic.map(String::from),
        narrator: Some("Abu Huraira".to_string()),
        book_name: Some("Sahih Bukhari".to_string()),
        book_number: Some(1),
        volume_number: Some(1),
    }
}

/// Small but representative corpus shared by the API tests
pub fn fixture_corpus() -> CorpusStore {
    CorpusStore::new(
        vec![
            fixture_surah(1, "Al-Fatihah", &["The Opening", "Fatiha"], 7),
            fixture_surah(112, "Al-Ikhlas", &["Sincerity"], 4),
            fixture_surah(114, "An-Nas", &["Mankind"], 6),
        ],
        vec![
            fixture_record(1, "How revelation began", Some("Revelation")),
            fixture_record(2, "The times of prayer", Some("Prayer")),
            fixture_record(3, "Prayer in congregation", None),
            fixture_record(4, "Fasting is a shield", Some("Fasting")),
        ],
    )
    .unwrap()
}

/// Build the full application router around an injected provider,
/// mirroring the production router in main.rs
pub fn create_test_app(provider: Box<dyn CompletionProvider>) -> Router {
    let services = Arc::new(Services::new(Config::default(), fixture_corpus(), provider));

    Router::new()
        .route("/health", get(http::health_handler))
        .route("/api/v1/ask", post(http::ask_handler))
        .route("/api/v1/quran-query", post(http::quran_query_handler))
        .route("/api/v1/hadith-query", post(http::hadith_query_handler))
        .layer(middleware::from_fn(http_middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
