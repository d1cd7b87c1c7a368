use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunker error: {0}")]
    ChunkerError(#[from] atlas_code_chunker::ChunkerError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid project path: {0}")]
    InvalidPath(String),

    /// Files were found but none of them could be chunked
    #[error("Nothing indexed: all {failed} of {scanned} scanned files failed")]
    NothingIndexed { scanned: usize, failed: usize },
}
