/// Opaque embedding backend: a pure (or externally cached) mapping from text
/// to a fixed-length vector. Returned vectors are raw model output; the
/// normalizing adapter in `docqa-embed` owns the unit-length postcondition.
pub trait TextEmbedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Opaque answer generator invoked by callers with the retrieved context.
pub trait AnswerGenerator: Send + Sync {
    fn generate(&self, context: &str, question: &str) -> anyhow::Result<String>;
}
