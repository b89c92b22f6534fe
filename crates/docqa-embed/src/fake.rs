use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use docqa_core::traits::TextEmbedder;

/// Deterministic bag-of-words embedder for tests and offline development.
///
/// Each token hashes to a bucket and a weight, so texts sharing tokens get
/// correlated vectors. Output is raw (unnormalized); the adapter normalizes.
pub struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, raw) in text.split_whitespace().enumerate() {
            let token = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let bucket = (h as usize) % self.dim;
            let weight = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[bucket] += weight + (i % 3) as f32 * 0.01;
        }
        v
    }
}

impl TextEmbedder for FakeEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
