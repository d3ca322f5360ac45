//! Semantic chunking using embedding similarity.
//!
//! Splits text where the topic changes, detected by drops in embedding
//! similarity between neighbouring sentences.
//!
//! ## The Idea
//!
//! Adjacent sentences about the same topic have similar embeddings.
//! When the topic changes, similarity drops. We split there.
//!
//! ```text
//! Units:         [S0]  [S1]  [S2]  [S3]  [S4]
//! Similarities:      0.91  0.88  0.32  0.85
//! Threshold (p30):              0.80
//!                                 ^
//!                          0.32 < 0.80: breakpoint at unit 3
//!
//! Segments:  [S0 S1 S2] [S3 S4]
//! ```
//!
//! ## Percentile Threshold
//!
//! A fixed similarity threshold does not transfer between embedding models
//! (one model's "unrelated" is 0.2, another's is 0.7). Instead the threshold
//! is the `p`-th percentile of the document's own similarity series, so
//! `p` reads as "roughly which share of transitions become breakpoints":
//!
//! | Percentile | Effect |
//! |------------|--------|
//! | 10 | Only the sharpest topic shifts |
//! | 30 | Balanced (default) |
//! | 70 | Many small chunks |
//!
//! A similarity exactly equal to the threshold does not break, so a
//! document whose transitions are all equally similar stays in one piece.
//!
//! ## Performance
//!
//! O(n × d) for n units of dimension d, dominated by the embedding calls.

use std::ops::Range;

use tracing::debug;

use crate::similarity::{adjacent_similarities, breakpoints, check_percentile, percentile};
use crate::{split_sentences, Embedder, Error, Result, Slab};

/// Percentile used when none is configured.
pub const DEFAULT_PERCENTILE: f32 = 30.0;

/// A run of consecutive units grouped into one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Unit indices covered, `start..end`.
    pub units: Range<usize>,
    /// Member unit texts joined by the segmenter's separator.
    pub text: String,
}

/// Groups text units at low-similarity boundaries.
///
/// ## Example
///
/// ```rust
/// use chunklab::{from_fn, Segmenter};
///
/// // Toy embedder: leave topics point along x, IT topics along y.
/// let embedder = from_fn(|text: &str| {
///     Ok::<_, String>(if text.contains("leave") { vec![1.0, 0.1] } else { vec![0.1, 1.0] })
/// });
///
/// let units = [
///     "Annual leave is 20 days.",
///     "Unused leave carries over.",
///     "VPN is mandatory.",
///     "Laptops are provided.",
/// ];
///
/// let segments = Segmenter::new().with_percentile(50.0).segment(&units, &embedder)?;
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].units, 0..2);
/// assert_eq!(segments[1].text, "VPN is mandatory. Laptops are provided.");
/// # Ok::<(), chunklab::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    percentile: f32,
    separator: String,
}

impl Segmenter {
    /// Segmenter with the default percentile (30) and a single-space separator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            separator: " ".to_string(),
        }
    }

    /// Set the breakpoint percentile. Validated when segmenting.
    #[must_use]
    pub fn with_percentile(mut self, percentile: f32) -> Self {
        self.percentile = percentile;
        self
    }

    /// Set the string placed between unit texts within a segment.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// The configured percentile.
    pub fn percentile(&self) -> f32 {
        self.percentile
    }

    /// Group `units` into segments.
    ///
    /// The embedder is called once with all units (not at all for fewer
    /// than two). Nothing is returned unless every step succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the percentile is outside `[0, 100]`, or
    ///   the embedder returns the wrong number of vectors, an empty vector,
    ///   or vectors of differing lengths.
    /// - [`Error::DegenerateVector`] if any vector has zero norm.
    /// - [`Error::Embedding`] carrying the embedder's own error.
    pub fn segment<S, E>(&self, units: &[S], embedder: &E) -> Result<Vec<Segment>>
    where
        S: AsRef<str>,
        E: Embedder + ?Sized,
    {
        check_percentile(self.percentile)?;

        let texts: Vec<&str> = units.iter().map(AsRef::as_ref).collect();
        if texts.len() < 2 {
            return Ok(texts
                .first()
                .map(|text| Segment {
                    units: 0..1,
                    text: (*text).to_string(),
                })
                .into_iter()
                .collect());
        }

        let vectors = embedder
            .embed(&texts)
            .map_err(|e| Error::Embedding(e.into()))?;
        check_vectors(&vectors, texts.len())?;

        let similarities = adjacent_similarities(&vectors)?;
        let threshold = percentile(&similarities, self.percentile)?;
        let cuts = breakpoints(&similarities, threshold);

        debug!(
            units = texts.len(),
            percentile = self.percentile,
            threshold,
            breakpoints = cuts.len(),
            "semantic segmentation done"
        );

        Ok(self.assemble(&texts, &cuts))
    }

    fn assemble(&self, texts: &[&str], cuts: &[usize]) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;

        for end in cuts.iter().copied().chain(std::iter::once(texts.len())) {
            segments.push(Segment {
                units: start..end,
                text: texts[start..end].join(&self.separator),
            });
            start = end;
        }

        segments
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn check_vectors(vectors: &[Vec<f32>], expected: usize) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::invalid(format!(
            "embedder returned {} vectors for {expected} units",
            vectors.len()
        )));
    }
    let dim = vectors[0].len();
    if dim == 0 {
        return Err(Error::invalid("embedder returned an empty vector"));
    }
    if let Some(i) = vectors.iter().position(|v| v.len() != dim) {
        return Err(Error::invalid(format!(
            "vector {i} has {} dimensions, expected {dim}",
            vectors[i].len()
        )));
    }
    Ok(())
}

/// Group `units` into segments at the `percentile` similarity threshold,
/// joining unit texts with a single space.
///
/// Shorthand for `Segmenter::new().with_percentile(percentile).segment(..)`.
///
/// # Errors
///
/// See [`Segmenter::segment`].
pub fn segment<S, E>(units: &[S], embedder: &E, percentile: f32) -> Result<Vec<Segment>>
where
    S: AsRef<str>,
    E: Embedder + ?Sized,
{
    Segmenter::new()
        .with_percentile(percentile)
        .segment(units, embedder)
}

/// Semantic chunker: sentence units, embedded and segmented.
///
/// ## Example
///
/// ```rust
/// use chunklab::{from_fn, SemanticChunker};
///
/// let embedder = from_fn(|text: &str| {
///     Ok::<_, String>(if text.contains("leave") { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
/// });
/// let chunker = SemanticChunker::new(embedder);
///
/// let text = "Annual leave is 20 days. Sick leave needs a note. VPN is mandatory.";
/// let slabs = chunker.try_chunk(text)?;
///
/// assert_eq!(slabs.len(), 2);
/// assert_eq!(slabs[1].text, "VPN is mandatory.");
/// # Ok::<(), chunklab::Error>(())
/// ```
pub struct SemanticChunker<E> {
    embedder: E,
    segmenter: Segmenter,
}

impl<E: Embedder> SemanticChunker<E> {
    /// Create a semantic chunker with the default [`Segmenter`].
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            segmenter: Segmenter::new(),
        }
    }

    /// Replace the segmenter configuration.
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Set the breakpoint percentile.
    #[must_use]
    pub fn with_percentile(mut self, percentile: f32) -> Self {
        self.segmenter = self.segmenter.with_percentile(percentile);
        self
    }

    /// The embedding backend.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Split text into semantically coherent chunks.
    ///
    /// Each slab spans from its first sentence's start to its last
    /// sentence's end in `text`; its `text` is the trimmed sentences joined
    /// by the segmenter's separator.
    ///
    /// # Errors
    ///
    /// See [`Segmenter::segment`].
    pub fn try_chunk(&self, text: &str) -> Result<Vec<Slab>> {
        let sentences = split_sentences(text);
        let units: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();

        let slabs = self
            .segmenter
            .segment(&units, &self.embedder)?
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let start = sentences[segment.units.start].start;
                let end = sentences[segment.units.end - 1].end;
                Slab::new(segment.text, start, end, index)
            })
            .collect();

        Ok(slabs)
    }
}

impl<E> std::fmt::Debug for SemanticChunker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticChunker")
            .field("segmenter", &self.segmenter)
            .finish_non_exhaustive()
    }
}
