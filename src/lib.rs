//! # chunklab
//!
//! Document chunking for retrieval-augmented generation (RAG) pipelines.
//!
//! ## The Problem
//!
//! A RAG pipeline embeds pieces of documents into a vector index and, at
//! question time, retrieves the pieces closest to the question. How the
//! document is cut decides what can be retrieved: a policy clause split in
//! half answers nothing, a chunk covering three topics matches every
//! question weakly.
//!
//! This crate collects the usual cutting strategies behind one interface,
//! so they can be compared on the same document before the index is built.
//!
//! ## Chunking Strategies
//!
//! ### Fixed Size
//!
//! Every N characters, optionally with M characters of overlap.
//!
//! ```text
//! Document: "The quick brown fox jumps over the lazy dog."
//! Size: 20, Overlap: 5
//!
//! Chunk 0: "The quick brown fox "  [0..20]
//! Chunk 1: " fox jumps over the "  [15..35]  <- overlap preserves "fox"
//! Chunk 2: " the lazy dog."        [30..44]
//! ```
//!
//! ### Recursive Character
//!
//! Split on paragraphs, then lines, then words, then characters, only
//! descending where a piece is still too large; merge small pieces back
//! together up to the size limit, with overlap.
//!
//! ### Markdown Headers
//!
//! One chunk per section, tagged with the `#`/`##`/`###` headings above it.
//!
//! ### Document Sections
//!
//! Group extracted PDF elements (titles, paragraphs, list items) into
//! sections, then split each section recursively.
//!
//! ### Tokens
//!
//! Fixed windows measured in tokens rather than characters.
//!
//! ### Semantic (Embedding-Based)
//!
//! Embed each sentence, compute similarity between adjacent sentences,
//! split where similarity drops below a percentile of the document's own
//! similarity distribution.
//!
//! ```text
//! Sentences:    [S1, S2, S3, S4, S5, S6]
//! Similarities: [0.9, 0.8, 0.3, 0.85, 0.7]
//!                          ↑
//!                     Topic shift!
//!
//! Chunks: [S1, S2, S3] | [S4, S5, S6]
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use chunklab::{
//!     Chunker, FixedChunker, HeaderChunker, RecursiveChunker, TokenChunker, WordTokenizer,
//! };
//!
//! let text = "# Leave\nEmployees are entitled to 20 days of paid leave per year.\n\
//!             Unused leave can be carried forward up to 5 days.";
//!
//! let fixed = FixedChunker::new(50, 10).chunk(text);
//! let recursive = RecursiveChunker::default().chunk(text);
//! let headers = HeaderChunker::default().chunk(text);
//! let tokens = TokenChunker::new(WordTokenizer, 50, 10).chunk(text);
//!
//! assert_eq!(headers[0].meta("h1"), Some("Leave"));
//! ```
//!
//! ## Semantic Chunking
//!
//! Semantic chunking needs an [`Embedder`]. Any closure works; with the
//! `semantic` feature, `FastEmbedder` runs a local model.
//!
//! ```rust,ignore
//! use chunklab::{FastEmbedder, SemanticChunker};
//!
//! let chunker = SemanticChunker::new(FastEmbedder::new()?).with_percentile(30.0);
//! let slabs = chunker.try_chunk(policy_text)?;
//! ```
//!
//! ## Logging
//!
//! Chunkers emit `tracing` events (`debug` for per-call summaries, `trace`
//! for per-pair similarities). Install any subscriber to see them.

mod embed;
mod error;
mod fixed;
mod markdown;
mod recursive;
mod section;
mod semantic;
mod sentence;
mod similarity;
mod slab;
mod token;

pub use embed::{from_fn, Embedder, FnEmbedder};
pub use error::{BoxError, Error, Result};
pub use fixed::FixedChunker;
pub use markdown::HeaderChunker;
pub use recursive::RecursiveChunker;
pub use section::{Element, ElementKind, Section, SectionChunker, SECTION_KEY};
pub use semantic::{segment, Segment, Segmenter, SemanticChunker, DEFAULT_PERCENTILE};
pub use sentence::{split_sentences, SentenceChunker};
pub use similarity::{adjacent_similarities, breakpoints, cosine_similarity, percentile};
pub use slab::{Metadata, Slab};
pub use token::{TokenChunker, Tokenizer, WordTokenizer};

#[cfg(feature = "semantic")]
pub use embed::FastEmbedder;

/// A text chunking strategy.
///
/// All infallible chunkers implement this trait, enabling polymorphic usage:
///
/// ```rust
/// use chunklab::{Chunker, FixedChunker, SentenceChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<chunklab::Slab> {
///     chunker.chunk(text)
/// }
///
/// let fixed = FixedChunker::new(100, 20);
/// let sentence = SentenceChunker::new(3);
///
/// let text = "Hello world. This is a test.";
/// let slabs1 = chunk_document(&fixed, text);
/// let slabs2 = chunk_document(&sentence, text);
/// ```
///
/// [`SemanticChunker`] is not a `Chunker`: embedding can fail, so it
/// exposes a fallible `try_chunk` instead.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each chunk is a [`Slab`] containing the text and its byte offsets
    /// in the original document.
    fn chunk(&self, text: &str) -> Vec<Slab>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 500).max(1)
    }
}
