//! Unified service container for Tawfiq
//!
//! Provides shared access to all core services. The corpus store
//! is loaded before construction and shared read-only; the
//! completion provider is injected so adapters and tests choose
//! their own.

use crate::core::config::Config;
use crate::core::corpus::CorpusStore;
use crate::core::hadith::HadithResolver;
use crate::core::knowledge::KnowledgeBase;
use crate::core::llm::{CompletionGateway, CompletionProvider};
use crate::core::quran::QuranResolver;
use std::sync::Arc;

/// Unified services container
///
/// All request handlers use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Read-only reference corpora
    pub corpus: Arc<CorpusStore>,

    /// Surah resolution
    pub quran: Arc<QuranResolver>,

    /// Hadith matching
    pub hadith: Arc<HadithResolver>,

    /// Completion gateway (provider + persona + fallback policy)
    pub gateway: Arc<CompletionGateway>,

    /// Built-in canned answers consulted before the gateway
    pub knowledge: Arc<KnowledgeBase>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from a loaded corpus and an injected
    /// provider.
    pub fn new(config: Config, corpus: CorpusStore, provider: Box<dyn CompletionProvider>) -> Self {
        let corpus = Arc::new(corpus);
        let gateway = CompletionGateway::new(provider, config.provider.system_prompt.clone());

        Self {
            quran: Arc::new(QuranResolver::new(Arc::clone(&corpus))),
            hadith: Arc::new(HadithResolver::new(Arc::clone(&corpus))),
            gateway: Arc::new(gateway),
            knowledge: Arc::new(KnowledgeBase::default()),
            corpus,
            config: Arc::new(config),
        }
    }
}
