//! Map-reduce summarisation pipeline.
//!
//! The document text is split into sentence-respecting chunks, each chunk
//! is summarised independently (map), and the ordered partial summaries
//! are combined into one final summary (reduce). When the combined
//! partials grow past a threshold, the reduce stage runs in two passes:
//! each half is reduced on its own and the two results are merged with a
//! third call. The split happens exactly once, so very large documents
//! cost three reduce calls at most.

use std::path::PathBuf;

use thiserror::Error;

use crate::chunker;
use crate::config::{Config, ConfigError};
use crate::extract::{self, ExtractError};
use crate::gemini::{GeminiClient, GenerationError, TextGenerator};

/// Prompt for summarising one chunk into 1-2 paragraphs (Turkish, keeps
/// technical terms, no bullet points, grounded in the supplied text only).
pub const CHUNK_PROMPT: &str = "Aşağıdaki Türkçe metni 1-2 paragraf halinde akıcı ve öz bir dille özetle.\n- Bilimsel/teknik terimleri koru\n- Madde işaretleri kullanma\n- Yalnızca metindeki bilgilere dayan\n\nMetin:\n{content}\n\nÖzet (paragraf):\n";

/// Prompt for combining partial summaries into the final 2-4 paragraph
/// summary.
pub const REDUCE_PROMPT: &str = "Aşağıda aynı belgeden elde edilmiş parça özetleri var.\nBu özetleri birleştirerek 2-4 paragraf halinde kısa, tutarlı ve tekrar içermeyen bir nihai özet yaz.\nMadde işaretleri kullanma; bağlamı akıcı biçimde aktar.\n\nParça özetleri:\n{content}\n\nNihai özet (paragraf):\n";

/// Returned instead of a summary when extraction yields no text. Not an
/// error: scanned image-only PDFs land here.
pub const NO_TEXT_NOTICE: &str =
    "PDF'den metin çıkarılamadı. PDF tarama görüntüsü olabilir. OCR deneyin.";

/// Returned instead of a summary when chunking yields nothing to
/// summarise.
pub const NO_CHUNKS_NOTICE: &str = "Metin parçalara ayrılamadı.";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Input source for one summarisation run.
#[derive(Debug, Clone)]
pub enum Source {
    /// Extract the document text from a PDF file
    Pdf(PathBuf),
    /// Use the given text directly, skipping extraction
    Text(String),
}

fn render(template: &str, content: &str) -> String {
    template.replace("{content}", content)
}

/// Summarise each chunk in order, one LLM call per chunk.
///
/// The partial summary at index `i` always derives from the chunk at
/// index `i`. The first failed call aborts the whole run.
pub async fn map_chunks<G: TextGenerator>(
    generator: &G,
    chunks: &[String],
) -> Result<Vec<String>, GenerationError> {
    let mut partials = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let response = generator.generate(&render(CHUNK_PROMPT, chunk)).await?;
        partials.push(response.trim().to_string());
    }
    Ok(partials)
}

/// Combine the ordered partial summaries into the final summary.
///
/// Joined partials at or below `two_stage_threshold` characters go through
/// the reduce prompt once. Above it, the partial list is split at its
/// midpoint, each half reduced independently, and the two intermediate
/// results merged with a third call. No deeper recursion happens even if a
/// half is still huge; quality may degrade there, the call count does not.
pub async fn reduce_summaries<G: TextGenerator>(
    generator: &G,
    partials: &[String],
    two_stage_threshold: usize,
) -> Result<String, GenerationError> {
    let combined = partials.join("\n\n");
    if combined.chars().count() <= two_stage_threshold {
        let merged = generator.generate(&render(REDUCE_PROMPT, &combined)).await?;
        return Ok(merged.trim().to_string());
    }

    let mid = partials.len() / 2;
    let front = partials[..mid].join("\n\n");
    let back = partials[mid..].join("\n\n");

    let first = generator.generate(&render(REDUCE_PROMPT, &front)).await?;
    let second = generator.generate(&render(REDUCE_PROMPT, &back)).await?;

    let intermediate = format!("{}\n\n{}", first.trim(), second.trim());
    let merged = generator
        .generate(&render(REDUCE_PROMPT, &intermediate))
        .await?;
    Ok(merged.trim().to_string())
}

/// Run chunking, map and reduce over already-acquired document text.
///
/// Empty text and an empty chunk list are normal results, answered with a
/// fixed notice before any LLM call is made.
pub async fn run_pipeline<G: TextGenerator>(
    generator: &G,
    text: &str,
    max_chunk_chars: usize,
    two_stage_threshold: usize,
) -> Result<String, SummarizeError> {
    if text.trim().is_empty() {
        return Ok(NO_TEXT_NOTICE.to_string());
    }

    let chunks = chunker::chunk(text, max_chunk_chars);
    if chunks.is_empty() {
        return Ok(NO_CHUNKS_NOTICE.to_string());
    }

    let partials = map_chunks(generator, &chunks).await?;
    let summary = reduce_summaries(generator, &partials, two_stage_threshold).await?;
    Ok(summary)
}

/// Run the whole pipeline for one source.
///
/// The Gemini client is built first, so a missing credential fails before
/// any file I/O or network call happens.
pub async fn summarize(source: &Source, config: &Config) -> Result<String, SummarizeError> {
    let client = GeminiClient::new(config.api_key()?, &config.agent.model)?;

    let text = match source {
        Source::Pdf(path) => extract::extract_text(path)?,
        Source::Text(text) => text.clone(),
    };

    run_pipeline(
        &client,
        &text,
        config.agent.max_chunk_chars,
        config.agent.two_stage_threshold,
    )
    .await
}
