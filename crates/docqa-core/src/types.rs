//! Domain types shared by the chunking, embedding and retrieval crates.

use serde::{Deserialize, Serialize};

pub type DocumentId = String;

/// A source document as handed over by the text-extraction layer.
///
/// - `id`: stable document identity (file stem or external id)
/// - `blocks`: ordered raw text blocks (e.g., one per page)
///
/// Documents are caller-owned and read exactly once per corpus build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub blocks: Vec<String>,
}

/// A bounded contiguous piece of a document's text, the unit of retrieval.
///
/// `sequence_index` is assigned in production order across the whole build
/// (document order, then block order, then chunk order) and doubles as the
/// row index into the vector store. Chunks are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: DocumentId,
    pub sequence_index: usize,
    pub text: String,
}

/// One ranked hit for a query. Higher score is always better; with unit
/// vectors on both sides the score is the cosine similarity in `[-1, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub chunk: Chunk,
    pub score: f32,
}
