//! # Ozet
//!
//! Paragraph-style PDF summarisation with Gemini, using a map-reduce
//! chunking strategy.
//!
//! ## Features
//!
//! - **Sentence-aware chunking**: chunk boundaries always fall on sentence boundaries
//! - **Map-reduce summarisation**: one partial summary per chunk, combined into a final summary
//! - **Testable core**: the LLM sits behind the minimal [`gemini::TextGenerator`] capability

pub mod chunker;
pub mod config;
pub mod extract;
pub mod gemini;
pub mod pipeline;

pub use config::Config;
pub use gemini::{GeminiClient, TextGenerator};
pub use pipeline::{summarize, Source};
