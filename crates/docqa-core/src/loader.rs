//! Plain-text document loading for callers that index a local directory.
//!
//! This is the extraction stand-in on the CLI side of the pipeline: each
//! `.txt` file becomes one `Document`, with form-feed-separated pages as its
//! blocks. Real extraction (PDF, HTML, ...) lives outside this workspace and
//! hands the retriever the same `Document` shape.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Document;

/// Read every `.txt` file under `root` into a `Document`. Files are sorted
/// by path so the corpus ordering (and therefore every `sequence_index`) is
/// reproducible across runs.
pub fn load_documents(root: &Path) -> Result<Vec<Document>> {
    let files = list_txt_files(root);
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let content = read_file_content(path)?;
        let blocks: Vec<String> = content
            .split('\u{c}')
            .filter(|page| !page.trim().is_empty())
            .map(str::to_string)
            .collect();
        documents.push(Document { id: doc_id_for(path), blocks });
    }
    Ok(documents)
}

fn read_file_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).to_string()),
    }
}

fn doc_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            txt_files.push(path.to_path_buf());
        }
    }
    txt_files.sort();
    txt_files
}
