use crate::error::{IndexerError, Result};
use crate::scanner::{FileScanner, ScanOptions};
use crate::sink::ChunkSink;
use crate::stats::IndexStats;
use atlas_code_chunker::{Chunker, ChunkerConfig, ChunkerError, CodeChunk, Language};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Result of chunking one file on a worker
struct FileOutcome {
    path: PathBuf,
    lines: usize,
    chunks: std::result::Result<Vec<CodeChunk>, ChunkerError>,
}

/// Scans a project tree, chunks every file and hands the chunks to a sink
pub struct ChunkIndexer {
    root: PathBuf,
    chunker: Arc<Chunker>,
    scan_options: ScanOptions,
}

impl ChunkIndexer {
    /// Create an indexer for `root`; chunk paths are made relative to it
    pub fn new(root: impl AsRef<Path>, config: ChunkerConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        let chunker = Chunker::new(ChunkerConfig {
            project_root: root.clone(),
            ..config
        })?;

        Ok(Self {
            root,
            chunker: Arc::new(chunker),
            scan_options: ScanOptions::default(),
        })
    }

    #[must_use]
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Files a run would process, in processing order
    pub fn scan(&self) -> Vec<PathBuf> {
        FileScanner::with_options(&self.root, self.scan_options.clone()).scan()
    }

    /// Chunk every scanned file into `sink`.
    ///
    /// Per-file failures are tallied in the stats and do not stop the run.
    /// The run fails only when files were found and none of them could be
    /// chunked.
    pub async fn run(&self, sink: &dyn ChunkSink) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::new();

        log::info!("Chunking project at {}", self.root.display());
        let files = self.scan();

        for outcome in self.process_files_parallel(&files).await {
            match outcome.chunks {
                Ok(chunks) => {
                    sink.append(&chunks).await?;
                    stats.add_file(Language::from_path(&outcome.path).as_str(), outcome.lines);
                    stats.add_chunks(chunks.len());
                }
                Err(e) => {
                    log::warn!("Skipping {}: {e}", outcome.path.display());
                    stats.add_error(e.kind().as_str(), e.to_string());
                }
            }
        }

        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if stats.files == 0 && !files.is_empty() {
            return Err(IndexerError::NothingIndexed {
                scanned: files.len(),
                failed: stats.failed_files,
            });
        }

        log::info!(
            "Chunked {} files into {} chunks in {} ms ({} failed)",
            stats.files,
            stats.chunks,
            stats.time_ms,
            stats.failed_files
        );
        Ok(stats)
    }

    /// Chunk files on blocking workers in bounded batches; outcomes come
    /// back in input order
    async fn process_files_parallel(&self, files: &[PathBuf]) -> Vec<FileOutcome> {
        // chunking is CPU bound; keep fan-out small
        let max_concurrent = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(2, 8);

        let mut outcomes = Vec::with_capacity(files.len());

        for batch in files.chunks(max_concurrent) {
            let mut tasks = Vec::with_capacity(batch.len());
            for path in batch {
                let chunker = Arc::clone(&self.chunker);
                let path = path.clone();
                tasks.push(tokio::task::spawn_blocking(move || {
                    Self::chunk_one(&chunker, path)
                }));
            }

            for (task, path) in tasks.into_iter().zip(batch) {
                match task.await {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        log::error!("Chunking task for {} panicked: {e}", path.display());
                        outcomes.push(FileOutcome {
                            path: path.clone(),
                            lines: 0,
                            chunks: Err(ChunkerError::parse(
                                self.chunker.relative_path(path),
                                format!("chunking task failed: {e}"),
                            )),
                        });
                    }
                }
            }
        }

        outcomes
    }

    fn chunk_one(chunker: &Chunker, path: PathBuf) -> FileOutcome {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                return FileOutcome {
                    chunks: Err(ChunkerError::io(&path, e)),
                    path,
                    lines: 0,
                }
            }
        };

        let lines = content.lines().count();
        let chunks = chunker.chunk_str(&content, &chunker.relative_path(&path));
        FileOutcome {
            path,
            lines,
            chunks,
        }
    }
}
