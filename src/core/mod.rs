//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent of
//! the HTTP transport.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures and payloads
//! - **corpus**: Quran/Hadith corpus store (load once, read-only)
//! - **quran**: Surah resolution (numeric > exact name > substring)
//! - **hadith**: Hadith matching with range bounds
//! - **knowledge**: Built-in canned answers
//! - **llm**: Completion provider seam and gateway
//! - **services**: Unified service container

pub mod config;
pub mod corpus;
pub mod error;
pub mod hadith;
pub mod knowledge;
pub mod llm;
pub mod quran;
pub mod services;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, TawfiqError};
pub use services::Services;
