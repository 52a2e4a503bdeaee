use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use docqa_classify::Classifier;
use docqa_core::data_processor::{DataProcessor, SourceDocument};
use docqa_core::traits::VectorStore;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_EXTENSIONS: &[&str] = &["pyc", "pyo", "pyd", "so", "dll", "exe", "sh", "bat"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub files: usize,
    pub skipped: usize,
    pub chunks: usize,
    pub replaced: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn is_ingestible(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
    !ext.is_some_and(|e| SKIPPED_EXTENSIONS.contains(&e.as_str()))
}

/// Files under `dir` worth reading, sorted for a stable ingestion order.
pub fn collect_files(dir: &Path, limit: Option<usize>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_ingestible(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    if let Some(limit) = limit {
        files.truncate(limit);
    }
    files
}

/// Absolute form of `path` used as the store's `filepath` key.
pub fn store_key(path: &Path) -> String {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()).display().to_string()
}

pub async fn ingest_dir<V>(
    store: &V,
    classifier: &Classifier,
    processor: &DataProcessor,
    dir: &Path,
    limit: Option<usize>,
) -> Result<IngestReport>
where
    V: VectorStore + ?Sized,
{
    let files = collect_files(dir, limit);
    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    let mut report = IngestReport::default();
    for path in &files {
        bar.inc(1);
        let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        bar.set_message(filename.clone());

        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable file skipped");
                report.skipped += 1;
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let filepath = store_key(path);
        let classification = classifier.classify(&text, &filename);
        let doc = SourceDocument { filename: &filename, filepath: &filepath, text: &text, classification: &classification };
        let records = match processor.chunk_document(&doc) {
            Ok(r) => r,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "nothing to ingest");
                report.skipped += 1;
                continue;
            }
        };

        match store.replace_by_filepath(&filepath, &records).await {
            Ok(previous) => {
                report.replaced += previous;
                report.chunks += records.len();
                report.files += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "storing failed, previous chunks kept");
                report.skipped += 1;
            }
        }
    }
    bar.finish_and_clear();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use docqa_core::types::{Chunk, ChunkRecord};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory store keyed by filepath; refuses to store any file whose
    /// name contains `broken`.
    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<HashMap<String, Vec<ChunkRecord>>>,
    }

    impl MemoryStore {
        fn chunks_for(&self, filepath: &str) -> Vec<ChunkRecord> {
            self.files.lock().expect("lock").get(filepath).cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl VectorStore for MemoryStore {
        async fn query(&self, _text: &str, _k: usize) -> Result<Vec<Chunk>> { Ok(Vec::new()) }

        async fn add(&self, chunks: &[ChunkRecord]) -> Result<usize> {
            let mut files = self.files.lock().expect("lock");
            for c in chunks {
                files.entry(c.filepath.clone()).or_default().push(c.clone());
            }
            Ok(chunks.len())
        }

        async fn delete_by_filepath(&self, path: &str) -> Result<usize> {
            Ok(self.files.lock().expect("lock").remove(path).map_or(0, |v| v.len()))
        }

        async fn replace_by_filepath(&self, path: &str, chunks: &[ChunkRecord]) -> Result<usize> {
            if path.contains("broken") {
                bail!("embedding failed for {path}");
            }
            let previous = self.files.lock().expect("lock").insert(path.to_string(), chunks.to_vec());
            Ok(previous.map_or(0, |v| v.len()))
        }

        async fn count(&self) -> Result<usize> {
            Ok(self.files.lock().expect("lock").values().map(Vec::len).sum())
        }
    }

    fn old_chunk(filepath: &str) -> ChunkRecord {
        ChunkRecord {
            id: "old-0".into(),
            text: "previously ingested text".into(),
            filename: "broken.txt".into(),
            filepath: filepath.into(),
            domain: "Other".into(),
            category: "Other".into(),
            file_extension: "txt".into(),
            chunk_index: 0,
            total_chunks: 1,
        }
    }

    #[tokio::test]
    async fn failing_file_keeps_its_chunks_and_the_walk_continues() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::write(root.join("a.txt"), "Docker image deployed to Kubernetes.").expect("write");
        fs::write(root.join("broken.txt"), "New text that cannot be embedded.").expect("write");
        fs::write(root.join("c.txt"), "Invoice for the laptop repair.").expect("write");
        fs::write(root.join("empty.txt"), "   ").expect("write");

        let store = MemoryStore::default();
        let broken = store_key(&root.join("broken.txt"));
        store.add(&[old_chunk(&broken)]).await.expect("seed");

        let report = ingest_dir(&store, &Classifier::default(), &DataProcessor::new(), root, None).await.expect("ingest");
        assert_eq!(report.files, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.replaced, 0);
        assert_eq!(store.chunks_for(&broken), vec![old_chunk(&broken)]);
        assert_eq!(store.chunks_for(&store_key(&root.join("a.txt"))).len(), 1);
        assert_eq!(store.chunks_for(&store_key(&root.join("c.txt"))).len(), 1);
        assert_eq!(store.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn reingesting_replaces_previous_chunks() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::write(root.join("notes.txt"), "First draft.").expect("write");
        let store = MemoryStore::default();
        let (classifier, processor) = (Classifier::default(), DataProcessor::new());

        ingest_dir(&store, &classifier, &processor, root, None).await.expect("first");
        fs::write(root.join("notes.txt"), "Second draft.\n\nWith a second paragraph.").expect("write");
        let report = ingest_dir(&store, &classifier, &processor, root, None).await.expect("second");

        assert_eq!(report.replaced, 1);
        let stored = store.chunks_for(&store_key(&root.join("notes.txt")));
        assert_eq!(stored.len(), 1);
        assert!(stored[0].text.starts_with("Second draft."));
    }

    #[test]
    fn hidden_and_binary_files_are_skipped() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::create_dir_all(root.join(".git")).expect("mkdir");
        fs::create_dir_all(root.join("notes")).expect("mkdir");
        for name in ["a.txt", ".hidden.txt", ".git/config", "notes/b.md", "tool.EXE", "cache.pyc", "run.sh"] {
            fs::write(root.join(name), "content").expect("write");
        }
        let names: Vec<String> = collect_files(root, None)
            .iter()
            .map(|p| p.strip_prefix(root).expect("prefix").display().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "notes/b.md"]);
        assert_eq!(collect_files(root, Some(1)).len(), 1);
    }
}
