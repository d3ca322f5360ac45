//! Embedding backends.
//!
//! Semantic chunking needs one vector per text unit but does not care where
//! the vectors come from. [`Embedder`] is that seam: a hosted API client, a
//! local ONNX model, or a closure in a test can all stand behind it.
//!
//! With the `semantic` feature, [`FastEmbedder`] wraps fastembed's local
//! BGE-small-en model (384 dimensions).

use std::marker::PhantomData;

use crate::error::BoxError;

/// Turns text into embedding vectors.
///
/// Implementations may batch or parallelise internally, but must return
/// exactly one vector per input text, in input order.
pub trait Embedder: Send + Sync {
    /// Backend error. Handed to the caller unchanged (boxed) inside
    /// [`Error::Embedding`](crate::Error::Embedding).
    type Error: Into<BoxError>;

    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error>;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    type Error = E::Error;

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error> {
        (**self).embed(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    type Error = E::Error;

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, Self::Error> {
        (**self).embed(texts)
    }
}

/// An [`Embedder`] built from a per-text closure. See [`from_fn`].
pub struct FnEmbedder<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Adapt a closure `&str -> Result<Vec<f32>, E>` into an [`Embedder`].
///
/// The closure is called once per text, in order.
///
/// ```rust
/// use chunklab::{from_fn, Embedder};
///
/// let embedder = from_fn(|text: &str| Ok::<_, String>(vec![text.len() as f32, 1.0]));
/// let vectors = embedder.embed(&["ab", "abc"]).unwrap();
/// assert_eq!(vectors, vec![vec![2.0, 1.0], vec![3.0, 1.0]]);
/// ```
pub fn from_fn<F, E>(f: F) -> FnEmbedder<F, E>
where
    F: Fn(&str) -> Result<Vec<f32>, E> + Send + Sync,
    E: Into<BoxError>,
{
    FnEmbedder {
        f,
        _error: PhantomData,
    }
}

impl<F, E> Embedder for FnEmbedder<F, E>
where
    F: Fn(&str) -> Result<Vec<f32>, E> + Send + Sync,
    E: Into<BoxError>,
{
    type Error = E;

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, E> {
        texts.iter().map(|&text| (self.f)(text)).collect()
    }
}

impl<F, E> std::fmt::Debug for FnEmbedder<F, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEmbedder").finish_non_exhaustive()
    }
}

/// Local embedding model backed by fastembed.
#[cfg(feature = "semantic")]
pub struct FastEmbedder {
    model: fastembed::TextEmbedding,
}

#[cfg(feature = "semantic")]
impl FastEmbedder {
    /// Load fastembed's default model (BGE-small-en, 384 dimensions).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Embedding`](crate::Error::Embedding) if the model
    /// fails to download or load.
    pub fn new() -> crate::Result<Self> {
        let model = fastembed::TextEmbedding::try_new(Default::default())
            .map_err(|e| crate::Error::Embedding(e.into()))?;
        Ok(Self { model })
    }

    /// Wrap an already configured fastembed model.
    pub fn from_model(model: fastembed::TextEmbedding) -> Self {
        Self { model }
    }
}

#[cfg(feature = "semantic")]
impl Embedder for FastEmbedder {
    type Error = BoxError;

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, BoxError> {
        self.model.embed(texts.to_vec(), None).map_err(Into::into)
    }
}

#[cfg(feature = "semantic")]
impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder").finish_non_exhaustive()
    }
}
