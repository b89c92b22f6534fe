use std::sync::atomic::{AtomicUsize, Ordering};

use docqa_core::error::Error;
use docqa_core::traits::AnswerGenerator;
use docqa_core::types::Document;
use docqa_embed::{Embedder, FakeEmbedder};
use docqa_retrieve::cache::{CorpusCache, CorpusKey};
use docqa_retrieve::{answer_with, assemble_context, Retriever};

fn retriever(dim: usize) -> Retriever {
    Retriever::new(Embedder::new(Box::new(FakeEmbedder::new(dim))))
}

fn sample_documents() -> Vec<Document> {
    vec![Document {
        id: "faq".to_string(),
        blocks: vec!["Alpha text about pricing.\n\nBeta text about refunds.".to_string()],
    }]
}

#[test]
fn blank_line_sections_become_separate_chunks() {
    let retriever = retriever(256);
    let corpus = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.chunks()[0].text, "Alpha text about pricing.");
    assert_eq!(corpus.chunks()[1].text, "Beta text about refunds.");
    assert_eq!(corpus.chunks()[0].sequence_index, 0);
    assert_eq!(corpus.chunks()[1].sequence_index, 1);
    assert_eq!(corpus.chunks()[0].doc_id, "faq");
}

#[test]
fn chunk_ordering_follows_document_then_block_order() {
    let docs = vec![
        Document { id: "one".to_string(), blocks: vec!["first".to_string(), "second".to_string()] },
        Document { id: "two".to_string(), blocks: vec!["third".to_string()] },
    ];
    let retriever = retriever(128);
    let corpus = retriever.build_corpus(&docs, 900, 120).expect("build");

    let texts: Vec<&str> = corpus.chunks().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    let ids: Vec<usize> = corpus.chunks().iter().map(|c| c.sequence_index).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn query_ranks_matching_section_first() {
    let retriever = retriever(512);
    let corpus = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");

    let results = retriever.query(&corpus, "refunds", 2).expect("query");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.text, "Beta text about refunds.");
    assert!(results[0].score > results[1].score);
}

#[test]
fn corpus_chunk_text_is_its_own_best_match() {
    let retriever = retriever(512);
    let corpus = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");

    let results = retriever
        .query(&corpus, "Beta text about refunds.", 1)
        .expect("query");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.text, "Beta text about refunds.");
    assert!(results[0].score > 0.999, "self-similarity close to 1.0 (got {})", results[0].score);
}

#[test]
fn repeated_builds_and_queries_are_deterministic() {
    let retriever = retriever(256);
    let first = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");
    let second = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");

    let a = retriever.query(&first, "refunds", 2).expect("query");
    let b = retriever.query(&second, "refunds", 2).expect("query");
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.chunk, y.chunk);
        assert!((x.score - y.score).abs() <= 1e-6);
    }
}

#[test]
fn empty_document_set_queries_fail_with_empty_corpus() {
    let retriever = retriever(64);
    let corpus = retriever.build_corpus(&[], 900, 120).expect("build");
    assert!(corpus.is_empty());
    assert!(matches!(retriever.query(&corpus, "anything", 5), Err(Error::EmptyCorpus)));
}

#[test]
fn whitespace_only_documents_produce_an_empty_corpus() {
    let docs = vec![Document {
        id: "blank".to_string(),
        blocks: vec!["  \n\n \r\n ".to_string()],
    }];
    let retriever = retriever(64);
    let corpus = retriever.build_corpus(&docs, 900, 120).expect("build");
    assert!(corpus.is_empty());
    assert!(matches!(retriever.query(&corpus, "anything", 5), Err(Error::EmptyCorpus)));
}

#[test]
fn bad_chunking_parameters_are_rejected_before_embedding() {
    let retriever = retriever(64);
    let err = retriever.build_corpus(&sample_documents(), 100, 100).expect_err("must fail");
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn cache_builds_at_most_once_per_key() {
    let retriever = retriever(128);
    let docs = sample_documents();
    let cache = CorpusCache::new();
    let builds = AtomicUsize::new(0);

    let key = CorpusKey::for_documents(&docs);
    let first = cache
        .get_or_build(key.clone(), || {
            builds.fetch_add(1, Ordering::SeqCst);
            retriever.build_corpus(&docs, 900, 120)
        })
        .expect("build");
    let second = cache
        .get_or_build(key.clone(), || {
            builds.fetch_add(1, Ordering::SeqCst);
            retriever.build_corpus(&docs, 900, 120)
        })
        .expect("build");

    assert_eq!(builds.load(Ordering::SeqCst), 1, "second lookup is served from the slot");
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    cache.clear();
    let _third = cache
        .get_or_build(key, || {
            builds.fetch_add(1, Ordering::SeqCst);
            retriever.build_corpus(&docs, 900, 120)
        })
        .expect("build");
    assert_eq!(builds.load(Ordering::SeqCst), 2, "clear forces a rebuild");
}

#[test]
fn changed_documents_get_a_fresh_key_and_evict_the_slot() {
    let docs = sample_documents();
    let mut edited = sample_documents();
    edited[0].blocks[0].push_str("\n\nGamma text about shipping.");

    assert_eq!(CorpusKey::for_documents(&docs), CorpusKey::for_documents(&docs));
    assert_ne!(CorpusKey::for_documents(&docs), CorpusKey::for_documents(&edited));

    let retriever = retriever(128);
    let cache = CorpusCache::new();
    let first = cache
        .get_or_build(CorpusKey::for_documents(&docs), || {
            retriever.build_corpus(&docs, 900, 120)
        })
        .expect("build");
    let second = cache
        .get_or_build(CorpusKey::for_documents(&edited), || {
            retriever.build_corpus(&edited, 900, 120)
        })
        .expect("build");

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 3, "edited set rebuilt, prior entry evicted");
}

#[test]
fn cached_and_uncached_results_agree() {
    let retriever = retriever(256);
    let docs = sample_documents();

    let direct = retriever.build_corpus(&docs, 900, 120).expect("build");
    let direct_results = retriever.query(&direct, "refunds", 2).expect("query");

    let cache = CorpusCache::new();
    let cached = cache
        .get_or_build(CorpusKey::for_documents(&docs), || {
            retriever.build_corpus(&docs, 900, 120)
        })
        .expect("build");
    let cached_results = retriever.query(&cached, "refunds", 2).expect("query");

    for (x, y) in direct_results.iter().zip(cached_results.iter()) {
        assert_eq!(x.chunk, y.chunk);
        assert!((x.score - y.score).abs() <= 1e-6);
    }
}

#[test]
fn context_assembly_feeds_the_generator() {
    struct EchoGenerator;
    impl AnswerGenerator for EchoGenerator {
        fn generate(&self, context: &str, question: &str) -> anyhow::Result<String> {
            Ok(format!("Q: {question}\n{context}"))
        }
    }

    let retriever = retriever(256);
    let corpus = retriever.build_corpus(&sample_documents(), 900, 120).expect("build");
    let results = retriever.query(&corpus, "refunds", 2).expect("query");

    let context = assemble_context(&results);
    assert!(context.contains("\n\n---\n\n"), "chunks joined with the separator");

    let answer = answer_with(&EchoGenerator, &results, "refunds").expect("generate");
    assert!(answer.starts_with("Q: refunds"));
    assert!(answer.contains("Beta text about refunds."));
}
