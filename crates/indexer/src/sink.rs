use crate::error::Result;
use async_trait::async_trait;
use atlas_code_chunker::CodeChunk;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A chunk as handed to storage: the chunk record plus a stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: String,
    #[serde(flatten)]
    pub chunk: CodeChunk,
}

impl ChunkRecord {
    pub fn new(chunk: CodeChunk) -> Self {
        Self {
            chunk_id: chunk_id(&chunk),
            chunk,
        }
    }
}

/// Hex SHA-256 over the fields that identify a chunk. Identical file content
/// and configuration give identical ids on every run.
pub fn chunk_id(chunk: &CodeChunk) -> String {
    let mut hasher = Sha256::new();
    hasher.update(chunk.file_path.as_bytes());
    hasher.update([0u8]);
    hasher.update(chunk.kind.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(chunk.name.as_deref().unwrap_or_default().as_bytes());
    hasher.update([0u8]);
    hasher.update(chunk.part_index.to_le_bytes());
    hasher.update(chunk.start_line.to_le_bytes());
    hasher.update(chunk.end_line.to_le_bytes());
    hasher.update(chunk.source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Destination for the chunks of each processed file.
///
/// Appends may arrive from several tasks; implementations serialize them.
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Store the final chunks of one file
    async fn append(&self, chunks: &[CodeChunk]) -> Result<()>;
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ChunkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, in append order
    pub async fn records(&self) -> Vec<ChunkRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl ChunkSink for MemorySink {
    async fn append(&self, chunks: &[CodeChunk]) -> Result<()> {
        let mut records = self.records.lock().await;
        records.extend(chunks.iter().cloned().map(ChunkRecord::new));
        Ok(())
    }
}

/// Writes one pretty-printed `chunk_<id>.json` file per chunk
#[derive(Debug)]
pub struct JsonDirSink {
    dir: PathBuf,
    written: Mutex<usize>,
}

impl JsonDirSink {
    /// Use `dir` as output directory, creating it when missing
    pub async fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            written: Mutex::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `record`
    pub fn record_path(&self, record: &ChunkRecord) -> PathBuf {
        self.dir.join(format!("chunk_{}.json", record.chunk_id))
    }

    /// Number of files written so far
    pub async fn written(&self) -> usize {
        *self.written.lock().await
    }
}

#[async_trait]
impl ChunkSink for JsonDirSink {
    async fn append(&self, chunks: &[CodeChunk]) -> Result<()> {
        let mut written = self.written.lock().await;

        for chunk in chunks {
            let record = ChunkRecord::new(chunk.clone());
            let json = serde_json::to_vec_pretty(&record)?;
            tokio::fs::write(self.record_path(&record), json).await?;
            *written += 1;
        }

        log::debug!("wrote {} chunk files to {}", chunks.len(), self.dir.display());
        Ok(())
    }
}
