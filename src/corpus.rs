// Consuming side of the corpus-acquisition boundary: an external step has
// already deposited one text file and one-or-more decoded annotation
// record files per article; this module locates them and builds the
// Article aggregate.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::annotation::AnnotationRecord;
use crate::article::Article;

/// Paths of the deposited files backing one article.
#[derive(Debug, Clone)]
pub struct ArticleFiles {
    pub text: PathBuf,
    pub annotations: Vec<PathBuf>,
}

/// Locate the deposited files for a source id anywhere under `data_dir`:
/// `{source_id}.txt` for the article text plus `{source_id}*.json` files
/// of decoded annotation records.
pub fn find_article_files(data_dir: impl AsRef<Path>, source_id: &str) -> Result<ArticleFiles> {
    let mut text = None;
    let mut annotations = Vec::new();
    for entry in WalkDir::new(data_dir.as_ref()).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !stem.starts_with(source_id) {
            continue;
        }
        match entry.path().extension().and_then(|e| e.to_str()) {
            Some("txt") if stem == source_id => {
                debug!("Found article text: {}", entry.path().display());
                text = Some(entry.path().to_path_buf());
            }
            Some("json") => {
                debug!("Found annotation records: {}", entry.path().display());
                annotations.push(entry.path().to_path_buf());
            }
            _ => {}
        }
    }
    let Some(text) = text else {
        bail!("no article text found for source id {source_id}");
    };
    // Deterministic record order regardless of traversal order
    annotations.sort();
    Ok(ArticleFiles { text, annotations })
}

/// Load an article by source id: read its text, decode every record file,
/// order records by first span start, and build the aggregate.
pub fn load_article(data_dir: impl AsRef<Path>, source_id: &str) -> Result<Article> {
    let files = find_article_files(data_dir, source_id)?;
    let text = fs::read_to_string(&files.text)
        .with_context(|| format!("reading article text {}", files.text.display()))?;
    let mut records: Vec<AnnotationRecord> = Vec::new();
    for path in &files.annotations {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading annotation records {}", path.display()))?;
        let decoded: Vec<AnnotationRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("decoding annotation records {}", path.display()))?;
        records.extend(decoded);
    }
    records.sort_by_key(|r| r.span[0].start);
    info!(
        "Loaded article {}: {} bytes of text, {} annotation records",
        source_id,
        text.len(),
        records.len()
    );
    Ok(Article::new(text, records))
}
