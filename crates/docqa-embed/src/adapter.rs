//! Normalizing adapter between an opaque embedding backend and the retrieval
//! pipeline.

use docqa_core::error::{Error, Result};
use docqa_core::traits::TextEmbedder;

/// Wraps a `TextEmbedder` and enforces the contract the vector index relies
/// on: every vector handed downstream is L2-normalized, so inner product
/// equals cosine similarity.
pub struct Embedder {
    inner: Box<dyn TextEmbedder>,
}

impl Embedder {
    pub fn new(inner: Box<dyn TextEmbedder>) -> Self {
        Self { inner }
    }

    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    /// Embed a batch of texts, one backend call for the whole batch.
    ///
    /// All-or-nothing: a backend error, a wrong row count, or a wrong-length
    /// row fails the entire call with the offending input's position (the
    /// batch start for transport errors). Zero-norm rows are kept as zero
    /// vectors rather than dropped, preserving row alignment; they can never
    /// rank close to a normalized query.
    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .inner
            .embed_batch(texts)
            .map_err(|e| Error::EmbeddingFailure { position: 0, reason: e.to_string() })?;
        if rows.len() != texts.len() {
            return Err(Error::EmbeddingFailure {
                position: rows.len().min(texts.len() - 1),
                reason: format!("expected {} vectors, got {}", texts.len(), rows.len()),
            });
        }
        let dim = self.inner.dim();
        let mut out = Vec::with_capacity(rows.len());
        for (position, mut row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(Error::EmbeddingFailure {
                    position,
                    reason: format!("expected dimension {dim}, got {}", row.len()),
                });
            }
            if !l2_normalize(&mut row) {
                tracing::warn!(position, "zero-norm embedding kept as non-matchable zero vector");
            }
            out.push(row);
        }
        Ok(out)
    }

    /// Embed a single text (a query, typically) as a one-element batch.
    pub fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut rows = self.embed_batch(&[text.to_string()])?;
        Ok(rows.remove(0))
    }
}

/// Scale `v` to unit length in place. Returns `false` when the norm is zero
/// and the vector was left as all zeros.
fn l2_normalize(v: &mut [f32]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}
