//! Tawfiq - Conversation Orchestration & Multi-Corpus Retrieval
//!
//! Backend for a conversational Islamic-knowledge assistant. The
//! browser front end collects spoken or typed questions; this
//! service mediates between the client, an external chat-completion
//! provider, and two static reference corpora (Quran verses,
//! Hadith records).
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - corpus (immutable Quran/Hadith store, loaded at startup)
//!   - quran, hadith (deterministic resolvers)
//!   - knowledge (built-in canned answers)
//!   - llm (completion provider seam and gateway)
//!   - services (unified service container)
//!
//! - **http**: REST adapter (depends on core)
//!   - handlers, middleware, error mapping
//!
//! # Key properties
//!
//! - Stateless requests (conversation history is caller-supplied)
//! - Read-only corpus shared without locks across requests
//! - Empty retrieval results are 2xx responses, never errors
//! - Provider failures degrade into a fixed fallback answer

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::corpus::CorpusStore;
pub use crate::core::error::{Result, TawfiqError};
pub use crate::core::services::Services;
pub use crate::core::types::*;
