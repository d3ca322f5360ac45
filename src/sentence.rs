//! Sentence-based chunking.
//!
//! Splits text on sentence boundaries, grouping N sentences per chunk.
//! The same splitter produces the units that semantic chunking embeds.
//!
//! ## Finding Sentences
//!
//! ```text
//! "Dr. Smith went to Washington D.C. on Jan. 15th."
//!     ^                          ^       ^
//!     Not a sentence end (abbreviation)
//! ```
//!
//! We use Unicode Standard Annex #29 (UAX #29) for sentence segmentation,
//! which copes with most abbreviations, decimal numbers and ellipses.
//!
//! Typical settings:
//! - `sentences_per_chunk = 3-5` for dense policy or technical content
//! - `sentences_per_chunk = 5-10` for narrative prose

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::slab::trimmed_slab;
use crate::{Chunker, Slab};

/// Split text into one slab per sentence.
///
/// Sentences are trimmed; whitespace-only segments are dropped. Every slab's
/// text is the exact source slice at `start..end`.
///
/// ```rust
/// use chunklab::split_sentences;
///
/// let text = "Leave is 20 days.  Unused leave carries over.";
/// let sentences = split_sentences(text);
///
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[1].text, "Unused leave carries over.");
/// assert_eq!(&text[sentences[1].span()], sentences[1].text);
/// ```
pub fn split_sentences(text: &str) -> Vec<Slab> {
    text.split_sentence_bound_indices()
        .filter_map(|(start, s)| trimmed_slab(text, start, start + s.len(), 0))
        .enumerate()
        .map(|(index, mut slab)| {
            slab.index = index;
            slab
        })
        .collect()
}

/// Sentence-based chunker.
///
/// Groups consecutive sentences into chunks.
///
/// ## Example
///
/// ```rust
/// use chunklab::{Chunker, SentenceChunker};
///
/// let chunker = SentenceChunker::new(2);
/// let text = "First sentence. Second sentence. Third sentence.";
/// let slabs = chunker.chunk(text);
///
/// assert_eq!(slabs.len(), 2);
/// assert!(slabs[0].text.contains("First"));
/// assert!(slabs[0].text.contains("Second"));
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    sentences_per_chunk: usize,
}

impl SentenceChunker {
    /// Create a new sentence chunker.
    ///
    /// # Panics
    ///
    /// Panics if `sentences_per_chunk == 0`.
    #[must_use]
    pub fn new(sentences_per_chunk: usize) -> Self {
        assert!(sentences_per_chunk > 0, "sentences_per_chunk must be > 0");
        Self { sentences_per_chunk }
    }

    /// Create a chunker that outputs one sentence per chunk.
    #[must_use]
    pub fn single() -> Self {
        Self::new(1)
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, text: &str) -> Vec<Slab> {
        let sentences = split_sentences(text);

        let slabs: Vec<Slab> = sentences
            .chunks(self.sentences_per_chunk)
            .enumerate()
            .map(|(index, group)| {
                let start = group[0].start;
                let end = group[group.len() - 1].end;
                Slab::new(&text[start..end], start, end, index)
            })
            .collect();

        debug!(
            sentences = sentences.len(),
            chunks = slabs.len(),
            "sentence chunking done"
        );
        slabs
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Rough estimate: ~100 chars per sentence
        let estimated_sentences = text_len / 100;
        (estimated_sentences / self.sentences_per_chunk).max(1)
    }
}
