//! Single-slot corpus cache keyed by document-set identity.
//!
//! Only the most recent document set is ever live, so the cache holds one
//! entry and replaces it wholesale. Readers hold `Arc<Corpus>`, so a swap
//! can never expose a partially replaced corpus; a reader either has the
//! old corpus in full or the new one.

use std::sync::{Arc, RwLock};

use docqa_core::error::Result;
use docqa_core::types::Document;

use crate::Corpus;

/// Identity of a document set: a blake3 digest over ids and block contents
/// with length framing, so reordering, renaming or editing any document
/// changes the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusKey([u8; 32]);

impl CorpusKey {
    pub fn for_documents(documents: &[Document]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for doc in documents {
            hasher.update(&(doc.id.len() as u64).to_le_bytes());
            hasher.update(doc.id.as_bytes());
            hasher.update(&(doc.blocks.len() as u64).to_le_bytes());
            for block in &doc.blocks {
                hasher.update(&(block.len() as u64).to_le_bytes());
                hasher.update(block.as_bytes());
            }
        }
        Self(hasher.finalize().into())
    }
}

#[derive(Default)]
pub struct CorpusCache {
    slot: RwLock<Option<(CorpusKey, Arc<Corpus>)>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached corpus when `key` matches the last build, otherwise
    /// run `build`, store the result and evict the prior entry. A failed
    /// build propagates the error and leaves the previous entry in place.
    /// Caching never changes query results relative to an uncached build.
    pub fn get_or_build<F>(&self, key: CorpusKey, build: F) -> Result<Arc<Corpus>>
    where
        F: FnOnce() -> Result<Corpus>,
    {
        {
            let slot = self.slot.read().expect("corpus cache lock poisoned");
            if let Some((cached_key, corpus)) = slot.as_ref() {
                if *cached_key == key {
                    tracing::debug!("corpus cache hit");
                    return Ok(Arc::clone(corpus));
                }
            }
        }
        tracing::debug!("corpus cache miss, building");
        let corpus = Arc::new(build()?);
        let mut slot = self.slot.write().expect("corpus cache lock poisoned");
        *slot = Some((key, Arc::clone(&corpus)));
        Ok(corpus)
    }

    /// Drop the cached entry; the next `get_or_build` rebuilds.
    pub fn clear(&self) {
        let mut slot = self.slot.write().expect("corpus cache lock poisoned");
        *slot = None;
    }
}
