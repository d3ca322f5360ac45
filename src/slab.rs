//! The Slab type: a chunk of a document with position and metadata.

use std::collections::BTreeMap;

/// String key/value metadata attached to a slab.
///
/// Header-based chunking records the active headers (`h1`, `h2`, ...),
/// section chunking records the `section` name.
pub type Metadata = BTreeMap<String, String>;

/// A chunk of text with its position in the original document.
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets into the text that was chunked, not
/// character indices. This matches Rust's string slicing semantics:
///
/// ```rust
/// use chunklab::Slab;
///
/// let text = "Hello, world!";
/// let slab = Slab::new("world", 7, 12, 0);
///
/// assert_eq!(&text[slab.start..slab.end], "world");
/// ```
///
/// Most chunkers produce slabs whose `text` is exactly `&source[start..end]`.
/// The semantic chunker is the exception: its text is the member sentences
/// joined by a separator, while `start..end` still covers the source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slab {
    /// The chunk text.
    pub text: String,
    /// Byte offset where this chunk starts in the original document.
    pub start: usize,
    /// Byte offset where this chunk ends (exclusive) in the original document.
    pub end: usize,
    /// Zero-based index of this chunk in the sequence.
    pub index: usize,
    /// Metadata carried along to the vector index.
    pub metadata: Metadata,
}

impl Slab {
    /// Create a new slab with empty metadata.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
            metadata: Metadata::new(),
        }
    }

    /// Attach one metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the metadata wholesale.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Look up a metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// The length of this chunk in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte span of this chunk in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Slab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slab {{ index: {}, span: {}..{}, len: {} }}",
            self.index,
            self.start,
            self.end,
            self.len()
        )
    }
}

/// Build a slab from `text[start..end]`, trimming surrounding whitespace and
/// shifting the offsets to match. Returns `None` for whitespace-only spans.
pub(crate) fn trimmed_slab(text: &str, start: usize, end: usize, index: usize) -> Option<Slab> {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let leading = raw.len() - raw.trim_start().len();
    let start = start + leading;
    Some(Slab::new(trimmed, start, start + trimmed.len(), index))
}
