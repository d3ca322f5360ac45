//! Token-based chunking.
//!
//! Language models read tokens, not characters: "Employees" is one token but
//! nine characters, so a 100-character budget says little about how much of
//! a model's context a chunk will use. This chunker measures chunk size and
//! overlap in tokens.
//!
//! ```text
//! chunk_size = 4, overlap = 1
//!
//! Tokens:  [t0 t1 t2 t3 t4 t5 t6 t7 t8]
//! Chunk 0:  t0 t1 t2 t3
//! Chunk 1:           t3 t4 t5 t6
//! Chunk 2:                    t6 t7 t8
//! ```
//!
//! Tokenization is pluggable through [`Tokenizer`]. The built-in
//! [`WordTokenizer`] uses UAX #29 word boundaries; plug in a BPE tokenizer
//! to match a specific model exactly.

use std::ops::Range;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Chunker, Error, Result, Slab};

/// Splits text into tokens, reported as byte spans into the input.
///
/// Spans must be in ascending order and must not overlap.
pub trait Tokenizer: Send + Sync {
    /// Byte ranges of each token in `text`.
    fn token_spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize {
        self.token_spans(text).len()
    }
}

/// Word-level tokenizer based on Unicode word boundaries.
///
/// Words, numbers and punctuation marks are tokens; whitespace is not.
///
/// ```rust
/// use chunklab::{Tokenizer, WordTokenizer};
///
/// assert_eq!(WordTokenizer.count("Leave: 20 days."), 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn token_spans(&self, text: &str) -> Vec<Range<usize>> {
        text.split_word_bound_indices()
            .filter(|(_, w)| !w.trim().is_empty())
            .map(|(i, w)| i..i + w.len())
            .collect()
    }
}

/// Chunker that windows over tokens.
///
/// ## Example
///
/// ```rust
/// use chunklab::{Chunker, TokenChunker, WordTokenizer};
///
/// let chunker = TokenChunker::new(WordTokenizer, 3, 1);
/// let slabs = chunker.chunk("one two three four five");
///
/// let texts: Vec<&str> = slabs.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(texts, ["one two three", "three four five"]);
/// ```
#[derive(Debug, Clone)]
pub struct TokenChunker<T = WordTokenizer> {
    tokenizer: T,
    chunk_size: usize,
    overlap: usize,
}

impl<T: Tokenizer> TokenChunker<T> {
    /// Create a token chunker.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0` or `overlap >= chunk_size`.
    #[must_use]
    pub fn new(tokenizer: T, chunk_size: usize, overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be > 0");
        assert!(overlap < chunk_size, "overlap must be < chunk_size");
        Self {
            tokenizer,
            chunk_size,
            overlap,
        }
    }

    /// Fallible counterpart of [`TokenChunker::new`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChunkSize`] or [`Error::OverlapExceedsSize`].
    pub fn try_new(tokenizer: T, chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        if overlap >= chunk_size {
            return Err(Error::OverlapExceedsSize {
                size: chunk_size,
                overlap,
            });
        }
        Ok(Self {
            tokenizer,
            chunk_size,
            overlap,
        })
    }

    /// The tokenizer in use.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }
}

impl Default for TokenChunker<WordTokenizer> {
    /// 50 tokens per chunk, 10 tokens of overlap.
    fn default() -> Self {
        Self::new(WordTokenizer, 50, 10)
    }
}

impl<T: Tokenizer> Chunker for TokenChunker<T> {
    fn chunk(&self, text: &str) -> Vec<Slab> {
        let tokens = self.tokenizer.token_spans(text);
        if tokens.is_empty() {
            return vec![];
        }

        let step = self.chunk_size - self.overlap;
        let mut slabs = Vec::new();
        let mut first = 0;

        loop {
            let last = (first + self.chunk_size).min(tokens.len());
            let (start, end) = (tokens[first].start, tokens[last - 1].end);
            slabs.push(Slab::new(&text[start..end], start, end, slabs.len()));

            if last == tokens.len() {
                break;
            }
            first += step;
        }

        debug!(
            tokens = tokens.len(),
            chunks = slabs.len(),
            "token chunking done"
        );
        slabs
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        // ~5 bytes per word token
        let tokens = text_len / 5;
        (tokens / (self.chunk_size - self.overlap)).max(1)
    }
}
