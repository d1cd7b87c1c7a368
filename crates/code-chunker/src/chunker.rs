use crate::cleanup::cleanup;
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, ErrorKind, Result};
use crate::registry::StrategyRegistry;
use crate::strategy::ChunkStrategy;
use crate::types::{CodeChunk, SourceFile};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Main chunker interface: dispatches files to strategies and cleans up the
/// result.
///
/// Holds no mutable state, so one instance can be shared across threads.
pub struct Chunker {
    config: ChunkerConfig,
    registry: StrategyRegistry,
}

impl Chunker {
    /// Create a chunker with the default strategy for every supported language
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        let registry = StrategyRegistry::with_defaults(&config)?;
        Ok(Self { config, registry })
    }

    /// Create a chunker over a custom strategy table
    pub fn with_registry(config: ChunkerConfig, registry: StrategyRegistry) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config, registry })
    }

    /// Chunk a file on disk; `file_path` of the chunks is relative to the
    /// project root
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<CodeChunk>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ChunkerError::io(path, e))?;
        let file_path = self.relative_path(path);

        self.chunk_str(&content, &file_path)
    }

    /// Chunk in-memory content; the strategy is picked from `file_path`'s
    /// extension
    pub fn chunk_str(&self, content: &str, file_path: &str) -> Result<Vec<CodeChunk>> {
        let strategy = self.strategy_for(file_path)?;
        let candidates = self.extract_candidates(content, file_path)?;
        let total = candidates.len();
        let chunks = cleanup(candidates, strategy.language());

        log::debug!(
            "{file_path}: {} chunks ({total} candidates, {})",
            chunks.len(),
            strategy.language().as_str()
        );
        Ok(chunks)
    }

    /// Candidate chunks before cleanup
    pub fn extract_candidates(&self, content: &str, file_path: &str) -> Result<Vec<CodeChunk>> {
        let strategy = self.strategy_for(file_path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        strategy.extract(&SourceFile::new(file_path, content))
    }

    /// Chunk every path, recording failures instead of stopping on them
    pub fn chunk_files<I, P>(&self, paths: I) -> ChunkingReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = ChunkingReport::default();

        for path in paths {
            let path = path.as_ref();
            match self.chunk_file(path) {
                Ok(chunks) => {
                    report.files_ok += 1;
                    report.chunks.extend(chunks);
                }
                Err(error) => {
                    log::warn!("skipping {}: {error}", path.display());
                    report.failures.push(FileFailure {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Whether a strategy is registered for the path's extension
    #[must_use]
    pub fn supports(&self, path: impl AsRef<Path>) -> bool {
        extension_of(path.as_ref())
            .is_some_and(|ext| self.registry.get(ext).is_some())
    }

    /// `/`-separated path relative to the project root; paths outside the
    /// root are kept as given
    #[must_use]
    pub fn relative_path(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let relative = path.strip_prefix(&self.config.project_root).unwrap_or(path);

        let mut parts: Vec<String> = Vec::new();
        let mut absolute = false;
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::ParentDir => parts.push("..".to_string()),
                Component::RootDir => absolute = true,
                Component::Prefix(prefix) => {
                    parts.push(prefix.as_os_str().to_string_lossy().into_owned());
                }
                Component::CurDir => {}
            }
        }

        let joined = parts.join("/");
        if absolute {
            format!("/{joined}")
        } else {
            joined
        }
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(chunks: &[CodeChunk]) -> ChunkingStats {
        let lines = || chunks.iter().map(CodeChunk::line_count);
        let total_lines: usize = lines().sum();

        let mut by_kind = BTreeMap::new();
        for chunk in chunks {
            *by_kind.entry(chunk.kind.as_str()).or_insert(0) += 1;
        }

        ChunkingStats {
            total_chunks: chunks.len(),
            total_lines,
            avg_lines_per_chunk: if chunks.is_empty() {
                0
            } else {
                total_lines / chunks.len()
            },
            min_lines: lines().min().unwrap_or(0),
            max_lines: lines().max().unwrap_or(0),
            split_parts: chunks.iter().filter(|c| c.part_index > 1).count(),
            by_kind,
        }
    }

    fn strategy_for(&self, file_path: &str) -> Result<&Arc<dyn ChunkStrategy>> {
        let ext = extension_of(Path::new(file_path)).unwrap_or_default();
        self.registry
            .get(ext)
            .ok_or_else(|| ChunkerError::unsupported(file_path, ext))
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// A file that could not be chunked
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ChunkerError,
}

/// Outcome of chunking a set of files
#[derive(Debug, Default)]
pub struct ChunkingReport {
    /// Chunks of every successful file, in input order
    pub chunks: Vec<CodeChunk>,
    pub files_ok: usize,
    pub failures: Vec<FileFailure>,
}

impl ChunkingReport {
    #[must_use]
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    /// Failure count per error kind
    #[must_use]
    pub fn error_tally(&self) -> BTreeMap<ErrorKind, usize> {
        let mut tally = BTreeMap::new();
        for failure in &self.failures {
            *tally.entry(failure.error.kind()).or_insert(0) += 1;
        }
        tally
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone, Default)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_lines: usize,
    pub avg_lines_per_chunk: usize,
    pub min_lines: usize,
    pub max_lines: usize,
    /// Chunks that are the 2nd or later part of a split unit
    pub split_parts: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Lines: {} | Avg: {} | Range: {}-{} | Split parts: {}",
            self.total_chunks,
            self.total_lines,
            self.avg_lines_per_chunk,
            self.min_lines,
            self.max_lines,
            self.split_parts
        )
    }
}
