//! # LexiBrief
//!
//! A TUI for one-page briefs of legal documents using LLMs.
//!
//! ## Features
//!
//! - **Document ingestion**: paste or type text, or upload `.txt` and `.pdf` files
//! - **Focused briefs**: ~600 character summaries in one of four tones
//! - **Provider boundary**: Gemini `generateContent` behind the `SummaryProvider` trait
//! - **Sans-IO controller**: all review state lives in `app::App`, driven by actions and events

pub mod agent;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod sample;
pub mod summary;
pub mod tone;
pub mod ui;

pub use config::Config;
pub use summary::SummaryResult;
pub use tone::Tone;
