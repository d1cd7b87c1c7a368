//! # Atlas Indexer
//!
//! Batch chunking of a whole project tree.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (.gitignore aware)
//!     │      └─> Source files
//!     │
//!     ├──> Chunker (blocking workers, bounded batches)
//!     │      └─> Code chunks / per-file failures
//!     │
//!     └──> Chunk Sink
//!            └─> Records with stable ids
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use atlas_code_chunker::ChunkerConfig;
//! use atlas_indexer::{ChunkIndexer, JsonDirSink};
//!
//! #[tokio::main]
//! async fn main() -> atlas_indexer::Result<()> {
//!     let indexer = ChunkIndexer::new("/path/to/project", ChunkerConfig::default())?;
//!     let sink = JsonDirSink::create("/path/to/project/.chunks").await?;
//!     let stats = indexer.run(&sink).await?;
//!
//!     println!("Indexed {} files, {} chunks", stats.files, stats.chunks);
//!     Ok(())
//! }
//! ```

mod error;
mod indexer;
mod scanner;
mod sink;
mod stats;

pub use error::{IndexerError, Result};
pub use indexer::ChunkIndexer;
pub use scanner::{FileScanner, ScanOptions};
pub use sink::{chunk_id, ChunkRecord, ChunkSink, JsonDirSink, MemorySink};
pub use stats::IndexStats;
