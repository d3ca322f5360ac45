//! Recursive character splitting (LangChain-style).
//!
//! Tries progressively finer separators until pieces fit within the size
//! limit, then greedily merges neighbouring pieces back up to the limit,
//! carrying a tail of each chunk into the next as overlap.
//!
//! ## The Algorithm
//!
//! Given separators `["\n\n", "\n", " ", ""]` and max_size `500`:
//!
//! ```text
//! 1. Pick the first separator that occurs in the text ("" always does).
//! 2. Split on it, keeping the separator at the start of the next piece.
//! 3. Pieces <= 500 chars are queued for merging.
//! 4. A piece > 500 chars flushes the queue, then is split recursively
//!    with the separators after the one just used.
//! 5. Merging packs queued pieces into chunks <= 500 chars; when a chunk
//!    is emitted, pieces are dropped from its front until what is left
//!    is <= overlap, and that remainder opens the next chunk.
//! ```
//!
//! Sizes are counted in characters. Separators are never lost: because the
//! pieces are contiguous spans of the source, every chunk is a plain slice
//! of the input (trimmed of surrounding whitespace).
//!
//! ## Separator Sets
//!
//! ```text
//! default:  ["\n\n", "\n", " ", ""]
//! prose:    ["\n\n", "\n", ". ", " ", ""]
//! markdown: ["\n## ", "\n### ", "\n\n", "\n", ". ", " ", ""]
//! ```

use std::collections::VecDeque;
use std::ops::Range;

use tracing::debug;

use crate::slab::trimmed_slab;
use crate::{Chunker, Slab};

/// Recursive character splitter.
///
/// ## Example
///
/// ```rust
/// use chunklab::{Chunker, RecursiveChunker};
///
/// let chunker = RecursiveChunker::new(50, &["\n\n", "\n", ". ", " "]);
/// let text = "Paragraph one.\n\nParagraph two is longer and might need splitting.";
/// let slabs = chunker.chunk(text);
///
/// assert_eq!(slabs[0].text, "Paragraph one.");
/// assert!(slabs.iter().all(|s| s.text.chars().count() <= 50));
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    max_size: usize,
    overlap: usize,
    separators: Vec<String>,
}

impl RecursiveChunker {
    /// Create a new recursive chunker with no overlap.
    ///
    /// # Arguments
    ///
    /// * `max_size` - Maximum chunk size in characters
    /// * `separators` - Hierarchy of separators, coarsest first
    ///
    /// # Panics
    ///
    /// Panics if `max_size == 0` or `separators` is empty.
    #[must_use]
    pub fn new(max_size: usize, separators: &[&str]) -> Self {
        assert!(max_size > 0, "max_size must be > 0");
        assert!(!separators.is_empty(), "separators must not be empty");

        Self {
            max_size,
            overlap: 0,
            separators: separators.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Create a chunker with default separators for prose.
    #[must_use]
    pub fn prose(max_size: usize) -> Self {
        Self::new(max_size, &["\n\n", "\n", ". ", " ", ""])
    }

    /// Create a chunker with default separators for Markdown.
    #[must_use]
    pub fn markdown(max_size: usize) -> Self {
        Self::new(max_size, &["\n## ", "\n### ", "\n\n", "\n", ". ", " ", ""])
    }

    /// Carry up to `overlap` characters of each chunk into the next one.
    ///
    /// # Panics
    ///
    /// Panics if `overlap >= max_size`.
    #[must_use]
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        assert!(overlap < self.max_size, "overlap must be < max_size");
        self.overlap = overlap;
        self
    }

    /// Split `range` of `text` into pieces that each fit `max_size`.
    fn split_recursive(
        &self,
        text: &str,
        range: Range<usize>,
        sep_index: usize,
    ) -> Vec<Range<usize>> {
        let slice = &text[range.clone()];

        // First separator that actually occurs; "" matches everything.
        let found = self.separators[sep_index..]
            .iter()
            .position(|sep| sep.is_empty() || slice.contains(sep.as_str()))
            .map(|offset| sep_index + offset);

        let Some(found) = found else {
            return force_split(text, range, self.max_size);
        };

        let pieces = split_keep_separator(slice, &self.separators[found])
            .into_iter()
            .map(|r| range.start + r.start..range.start + r.end);

        let mut result = Vec::new();
        let mut queue = Vec::new();

        for piece in pieces {
            if char_len(text, &piece) <= self.max_size {
                queue.push(piece);
                continue;
            }
            if !queue.is_empty() {
                result.extend(self.merge(text, &queue));
                queue.clear();
            }
            if found + 1 < self.separators.len() {
                result.extend(self.split_recursive(text, piece, found + 1));
            } else {
                result.extend(force_split(text, piece, self.max_size));
            }
        }

        if !queue.is_empty() {
            result.extend(self.merge(text, &queue));
        }

        result
    }

    /// Pack contiguous pieces into chunks of at most `max_size` characters.
    fn merge(&self, text: &str, pieces: &[Range<usize>]) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(Range<usize>, usize)> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(text, piece);

            if total + len > self.max_size {
                if let Some(span) = window_span(&window) {
                    chunks.push(span);
                }
                while total > self.overlap || (total > 0 && total + len > self.max_size) {
                    if let Some((_, dropped)) = window.pop_front() {
                        total -= dropped;
                    }
                }
            }

            window.push_back((piece.clone(), len));
            total += len;
        }

        if let Some(span) = window_span(&window) {
            chunks.push(span);
        }

        chunks
    }
}

impl Default for RecursiveChunker {
    /// 500-character chunks with 100 characters of overlap.
    fn default() -> Self {
        Self::new(500, &["\n\n", "\n", " ", ""]).with_overlap(100)
    }
}

fn char_len(text: &str, range: &Range<usize>) -> usize {
    text[range.clone()].chars().count()
}

fn window_span(window: &VecDeque<(Range<usize>, usize)>) -> Option<Range<usize>> {
    let first = window.front()?;
    let last = window.back()?;
    Some(first.0.start..last.0.end)
}

/// Split `text` on `sep`, each separator staying at the start of the piece
/// that follows it. An empty separator splits into characters.
fn split_keep_separator(text: &str, sep: &str) -> Vec<Range<usize>> {
    let cuts: Vec<usize> = if sep.is_empty() {
        text.char_indices().map(|(i, _)| i).collect()
    } else {
        text.match_indices(sep).map(|(i, _)| i).collect()
    };

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(text.len())) {
        if cut > start {
            pieces.push(start..cut);
            start = cut;
        }
    }
    pieces
}

/// Split at character boundaries when no separator is left.
fn force_split(text: &str, range: Range<usize>, max_size: usize) -> Vec<Range<usize>> {
    let bounds: Vec<usize> = text[range.clone()]
        .char_indices()
        .map(|(i, _)| range.start + i)
        .step_by(max_size)
        .chain(std::iter::once(range.end))
        .collect();

    bounds
        .windows(2)
        .filter(|w| w[1] > w[0])
        .map(|w| w[0]..w[1])
        .collect()
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> Vec<Slab> {
        if text.is_empty() {
            return vec![];
        }

        let slabs: Vec<Slab> = self
            .split_recursive(text, 0..text.len(), 0)
            .into_iter()
            .filter_map(|r| trimmed_slab(text, r.start, r.end, 0))
            .enumerate()
            .map(|(index, mut slab)| {
                slab.index = index;
                slab
            })
            .collect();

        debug!(
            max_size = self.max_size,
            overlap = self.overlap,
            chunks = slabs.len(),
            "recursive chunking done"
        );
        slabs
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / (self.max_size - self.overlap)).max(1)
    }
}
