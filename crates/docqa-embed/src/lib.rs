//! Embedding backends and the normalizing adapter.
//!
//! Two `TextEmbedder` implementations ship: a local BGE-M3 model running on
//! candle, and a deterministic hash-based fake for tests and offline
//! development. Both produce raw vectors; `Embedder` wraps either one and
//! owns the unit-length postcondition the vector index relies on.

mod adapter;
mod device;
mod fake;
mod local;
mod pool;
mod tokenize;

pub use adapter::Embedder;
pub use fake::FakeEmbedder;
pub use local::LocalModel;

use docqa_core::traits::TextEmbedder;

/// Select the embedding backend: `APP_USE_FAKE_EMBEDDINGS=1` picks the fake
/// (matching the local model's dimensionality so swapping backends never
/// changes `D`), anything else loads the local model.
pub fn get_default_embedder() -> anyhow::Result<Box<dyn TextEmbedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using deterministic fake embedder");
        return Ok(Box::new(FakeEmbedder::new(local::EMBEDDING_DIM)));
    }
    Ok(Box::new(LocalModel::new()?))
}
