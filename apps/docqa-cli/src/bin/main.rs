use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use docqa_core::config::{Config, RetrievalConfig};
use docqa_core::error::Error;
use docqa_core::loader::load_documents;
use docqa_embed::{get_default_embedder, Embedder};
use docqa_retrieve::cache::{CorpusCache, CorpusKey};
use docqa_retrieve::{assemble_context, Corpus, Retriever};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let retrieval = config.retrieval()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut question = None; let mut docs_dir = None; let mut k = retrieval.top_k; let mut show_context = false;
    let mut i = 0; while i < args.len() { match args[i].as_str() {
        "--k" => { if i + 1 < args.len() { if let Ok(n) = args[i + 1].parse::<usize>() { k = n; i += 1; } else { eprintln!("Error: --k requires a non-negative number"); std::process::exit(1); } } else { eprintln!("Error: --k requires a non-negative number"); std::process::exit(1); } }
        "--show-context" | "-c" => show_context = true,
        _ if !args[i].starts_with('-') => { if question.is_none() { question = Some(args[i].clone()); } else { docs_dir = Some(PathBuf::from(&args[i])); } }
        _ => {} } i += 1; }

    let docs_dir = docs_dir.unwrap_or_else(|| {
        let dir: String = config.get("data.docs_dir").unwrap_or_else(|_| "./docs".to_string());
        PathBuf::from(dir)
    });

    println!("docqa\n=====");
    println!("Documents: {}", docs_dir.display());

    let embedder = Embedder::new(get_default_embedder()?);
    let retriever = Retriever::new(embedder);
    let cache = CorpusCache::new();

    match question {
        Some(q) => {
            let corpus = index_documents(&cache, &retriever, &docs_dir, &retrieval)?;
            ask(&retriever, &corpus, &q, k, show_context);
            Ok(())
        }
        None => interactive(&cache, &retriever, &docs_dir, &retrieval, k, show_context),
    }
}

/// Load the document directory and build (or reuse) the corpus. The cache
/// key covers file names and contents, so an unchanged directory is served
/// from the slot without re-embedding.
fn index_documents(
    cache: &CorpusCache,
    retriever: &Retriever,
    docs_dir: &Path,
    retrieval: &RetrievalConfig,
) -> anyhow::Result<Arc<Corpus>> {
    let documents = load_documents(docs_dir)?;
    if documents.is_empty() {
        anyhow::bail!("no .txt documents found under {}", docs_dir.display());
    }
    let key = CorpusKey::for_documents(&documents);
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Indexing {} documents...", documents.len()));
    let corpus = cache.get_or_build(key, || {
        retriever.build_corpus(&documents, retrieval.max_chars, retrieval.overlap)
    })?;
    pb.finish_with_message(format!(
        "Indexed {} chunks from {} documents",
        corpus.len(),
        documents.len()
    ));
    Ok(corpus)
}

fn ask(retriever: &Retriever, corpus: &Corpus, question: &str, k: usize, show_context: bool) {
    match retriever.query(corpus, question, k) {
        Ok(results) => {
            println!("\nTop {} matches for: \"{}\"", results.len(), question);
            for (i, r) in results.iter().enumerate() {
                println!("\n  {}. score={:.3}  doc={}  chunk={}", i + 1, r.score, r.chunk.doc_id, r.chunk.sequence_index);
                println!("     {}", r.chunk.text);
            }
            if show_context {
                println!("\n--- context ---\n{}", assemble_context(&results));
            }
        }
        Err(Error::EmptyCorpus) => println!("No content to search. Add .txt files and retry."),
        Err(e) => eprintln!("Query failed: {}", e),
    }
}

fn interactive(
    cache: &CorpusCache,
    retriever: &Retriever,
    docs_dir: &Path,
    retrieval: &RetrievalConfig,
    k: usize,
    show_context: bool,
) -> anyhow::Result<()> {
    println!("Interactive mode. Empty line, 'quit' or Ctrl-D exits.");
    let stdin = io::stdin();
    loop {
        print!("\n? ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() || question == "quit" || question == "exit" {
            break;
        }
        // Re-key every round so edits to the document set are picked up; an
        // unchanged directory hits the cache and skips re-embedding.
        let corpus = index_documents(cache, retriever, docs_dir, retrieval)?;
        ask(retriever, &corpus, question, k, show_context);
    }
    Ok(())
}
