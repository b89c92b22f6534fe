//! Exact nearest-neighbor search over a bounded in-memory corpus.
//!
//! The index stores unit vectors flat in row-major order and scores a query
//! by brute-force inner product against every row, O(N * D) per search. With
//! normalized vectors on both sides that inner product is cosine similarity,
//! so scores lie in `[-1, 1]`. Swapping in an approximate structure behind
//! `build`/`search` would not change any caller-visible contract.

use docqa_core::error::{Error, Result};

/// Immutable exact-search index. The row index of a stored vector is the
/// corpus `sequence_index` of the chunk it embeds.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dim: usize,
    rows: usize,
    data: Vec<f32>,
}

impl VectorIndex {
    /// Build an index over `rows`. Dimensionality is inferred from the first
    /// row; every other row must match it. An empty input is refused so a
    /// degenerate index can never be queried.
    pub fn build(rows: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::EmptyCorpus);
        };
        let dim = first.len();
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in &rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch { expected: dim, got: row.len() });
            }
            data.extend_from_slice(row);
        }
        tracing::debug!(rows = rows.len(), dim, "vector index built");
        Ok(Self { dim, rows: rows.len(), data })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the `k` best rows for `query`, ordered by descending score.
    ///
    /// Equal scores are broken by ascending row index so repeated runs over
    /// identical inputs produce identical rankings. `k == 0` yields an empty
    /// result; `k` beyond the corpus size yields all rows, never padding.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, got: query.len() });
        }
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(self.rows);
        for i in 0..self.rows {
            let row = &self.data[i * self.dim..(i + 1) * self.dim];
            let score: f32 = row.iter().zip(query).map(|(a, b)| a * b).sum();
            scored.push((i, score));
        }
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}
