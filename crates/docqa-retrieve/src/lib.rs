//! Retrieval orchestration: documents -> chunks -> vectors -> ranked lookup.
//!
//! The retriever owns no long-lived mutable state; it is handed an embedder
//! once and builds immutable corpora from whatever documents the caller
//! provides. Queries against a built corpus are read-only and can be served
//! concurrently.

pub mod cache;

use docqa_core::chunker::{chunk, split_sections};
use docqa_core::error::{Error, Result};
use docqa_core::traits::AnswerGenerator;
use docqa_core::types::{Chunk, Document, RetrievalResult};
use docqa_embed::Embedder;
use docqa_vector::VectorIndex;

/// The chunks produced from one document set, paired with the index over
/// their embeddings. `chunks[i]` corresponds to index row `i`; neither side
/// is ever reordered independently, which is why both fields stay private.
/// An empty build carries no index at all, so a degenerate search is
/// impossible by construction.
#[derive(Debug)]
pub struct Corpus {
    chunks: Vec<Chunk>,
    index: Option<VectorIndex>,
}

impl Corpus {
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

pub struct Retriever {
    embedder: Embedder,
}

impl Retriever {
    /// The embedder is injected by the caller's process lifecycle; the
    /// retriever never reaches for ambient global state.
    pub fn new(embedder: Embedder) -> Self {
        Self { embedder }
    }

    /// Chunk every document and build the index in one pass.
    ///
    /// Documents are consumed in input order, blocks in document order; each
    /// block is pre-split on blank lines and each section chunked, so
    /// `sequence_index` encodes document order, then block order, then chunk
    /// order. All chunk texts go through a single `embed_batch` call. When
    /// no chunks are produced the corpus is returned empty and index-less;
    /// `EmptyCorpus` is surfaced at query time.
    pub fn build_corpus(
        &self,
        documents: &[Document],
        max_chars: usize,
        overlap: usize,
    ) -> Result<Corpus> {
        let mut chunks: Vec<Chunk> = Vec::new();
        for doc in documents {
            for block in &doc.blocks {
                for section in split_sections(block) {
                    for text in chunk(section, max_chars, overlap)? {
                        chunks.push(Chunk {
                            doc_id: doc.id.clone(),
                            sequence_index: chunks.len(),
                            text,
                        });
                    }
                }
            }
        }
        if chunks.is_empty() {
            tracing::info!("no chunks produced, corpus left without an index");
            return Ok(Corpus { chunks, index: None });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts)?;
        let index = VectorIndex::build(vectors)?;
        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            dim = index.dim(),
            "corpus built"
        );
        Ok(Corpus { chunks, index: Some(index) })
    }

    /// Rank the `k` most similar chunks for `question`.
    ///
    /// Fails with `EmptyCorpus` when the corpus was built from no content;
    /// callers surface that as "no content to search" rather than an empty
    /// success.
    pub fn query(&self, corpus: &Corpus, question: &str, k: usize) -> Result<Vec<RetrievalResult>> {
        let index = corpus.index.as_ref().ok_or(Error::EmptyCorpus)?;
        let query_vec = self.embedder.embed_one(question)?;
        let hits = index.search(&query_vec, k)?;
        tracing::debug!(k, hits = hits.len(), "query served");
        Ok(hits
            .into_iter()
            .map(|(row, score)| RetrievalResult { chunk: corpus.chunks[row].clone(), score })
            .collect())
    }
}

/// Join retrieved chunk texts into the context block handed to an answer
/// generator.
pub fn assemble_context(results: &[RetrievalResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Hand the retrieved context and the question to an external generator.
/// Retry and timeout policy for that call belong to the caller.
pub fn answer_with(
    generator: &dyn AnswerGenerator,
    results: &[RetrievalResult],
    question: &str,
) -> anyhow::Result<String> {
    generator.generate(&assemble_context(results), question)
}
