//! Ozet CLI - paragraph-style PDF summarisation with Gemini
//!
//! The pipeline logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use ozet::pipeline::{self, Source};
use ozet::{extract, Config};

#[derive(Parser)]
#[command(name = "ozet")]
#[command(version, about = "CLI for paragraph-style PDF summarisation with Gemini", long_about = None)]
struct Cli {
    /// Path to the PDF to summarise
    pdf: Option<PathBuf>,

    /// Summarise this text instead of a PDF (non-empty text wins over a path)
    #[arg(long)]
    text: Option<String>,

    /// Gemini model name (e.g. gemini-2.5-flash-lite, gemini-1.5-pro)
    #[arg(long)]
    model: Option<String>,

    /// Soft chunk size limit in characters (suggested range 2000-12000)
    #[arg(long)]
    max_chunk_chars: Option<usize>,

    /// Combined partial-summary length above which the reduce stage runs
    /// in two passes (suggested range 20000-120000)
    #[arg(long)]
    two_stage_threshold: Option<usize>,

    /// Write the final summary to this file as UTF-8 text
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show raw extracted text instead of a summary
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.agent.model = model;
    }
    if let Some(max_chunk_chars) = cli.max_chunk_chars {
        config.agent.max_chunk_chars = max_chunk_chars;
    }
    if let Some(two_stage_threshold) = cli.two_stage_threshold {
        config.agent.two_stage_threshold = two_stage_threshold;
    }

    let source = resolve_source(cli.pdf, cli.text)?;

    if cli.raw {
        // Just show the document text the pipeline would summarise
        let text = match &source {
            Source::Pdf(path) => extract::extract_text(path)?,
            Source::Text(text) => text.clone(),
        };
        println!("{text}");
        println!("\n--- Extracted {} characters ---", text.chars().count());
        return Ok(());
    }

    match &source {
        Source::Pdf(path) => println!("Summarising: {}", path.display()),
        Source::Text(text) => {
            println!("Summarising {} characters of text...", text.chars().count())
        }
    }

    let summary = pipeline::summarize(&source, &config).await?;

    println!("\n{}\n", "=== Nihai Özet ===".bold());
    println!("{summary}");

    if let Some(path) = cli.output {
        std::fs::write(&path, &summary)?;
        println!("\n{} {}", "Saved summary to".green(), path.display());
    }

    Ok(())
}

/// Pick the active source: non-empty --text wins, then a PDF path, then
/// piped stdin.
fn resolve_source(pdf: Option<PathBuf>, text: Option<String>) -> anyhow::Result<Source> {
    if let Some(text) = text {
        if !text.trim().is_empty() {
            return Ok(Source::Text(text));
        }
    }

    if let Some(path) = pdf {
        return Ok(Source::Pdf(path));
    }

    if !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        if !buffer.trim().is_empty() {
            return Ok(Source::Text(buffer));
        }
    }

    anyhow::bail!("provide a PDF path, --text, or pipe text on stdin")
}
