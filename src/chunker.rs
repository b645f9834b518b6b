//! Sentence-aware text chunking for the map stage.
//!
//! Chunk boundaries always fall on sentence boundaries; a single sentence
//! longer than the budget is kept whole rather than split mid-sentence.

/// Punctuation that can terminate a sentence.
const TERMINALS: [char; 5] = ['.', '!', '?', ':', ';'];

fn is_terminal(c: char) -> bool {
    TERMINALS.contains(&c)
}

/// Split `text` into sentence units.
///
/// A sentence ends at a run of terminal punctuation followed by whitespace
/// or end of input. Text after the last such boundary falls back to
/// line-based units so no character is ever dropped. Candidates are
/// trimmed; empty ones are discarded.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        // Absorb the whole punctuation run ("?!", "...", etc.)
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if is_terminal(next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        // Only a run followed by whitespace or end of input closes a
        // sentence, so "1.5" or "a.b" never splits.
        let closes = match chars.peek() {
            Some(&(_, next)) => next.is_whitespace(),
            None => true,
        };
        if closes {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    // Trailing text with no terminal boundary: line-based fallback.
    if start < text.len() {
        for line in text[start..].lines() {
            let line = line.trim();
            if !line.is_empty() {
                sentences.push(line);
            }
        }
    }

    sentences
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Sentences are accumulated greedily and joined with single spaces. The
/// budget is a soft target: a single sentence longer than `max_chars`
/// becomes a chunk on its own, never truncated. Empty input yields no
/// chunks.
pub fn chunk(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut size = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();
        if size + sentence_chars + 1 > max_chars && !buf.is_empty() {
            chunks.push(buf.join(" "));
            buf.clear();
            size = 0;
        }
        buf.push(sentence);
        size += sentence_chars + 1;
    }

    if !buf.is_empty() {
        chunks.push(buf.join(" "));
    }

    chunks
}
