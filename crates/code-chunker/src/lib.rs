//! # Atlas Code Chunker
//!
//! Splits source files into line-addressed chunks for embedding and
//! indexing.
//!
//! ## Pipeline
//!
//! ```text
//! file text
//!     │
//!     ├──> Dispatch by extension (StrategyRegistry)
//!     │
//!     ├──> Strategy → candidate chunks
//!     │    ├─> Structural: syntax backend → declarations → scope end
//!     │    ├─> Statement: `;` + line break boundaries
//!     │    └─> Boundary: markup region openers, double blank lines
//!     │    (units over `max_chunk_lines` go through the splitter)
//!     │
//!     └──> Cleanup
//!          ├─> drop empty / comment-only chunks
//!          └─> fold delimiter-only / tiny chunks into their predecessor
//! ```
//!
//! Containers and their members are both emitted, so their line ranges
//! overlap.
//!
//! ## Example
//!
//! ```rust
//! use atlas_code_chunker::{ChunkKind, Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
//!
//! let code = r#"
//! fn process_data(input: &str) -> String {
//!     let cleaned = input.trim();
//!     let upper = cleaned.to_uppercase();
//!     upper
//! }
//! "#;
//!
//! let chunks = chunker.chunk_str(code, "src/example.rs").unwrap();
//! assert_eq!(chunks[0].kind, ChunkKind::Member);
//! assert_eq!(chunks[0].name.as_deref(), Some("process_data"));
//! assert_eq!((chunks[0].start_line, chunks[0].end_line), (2, 6));
//! ```

mod ast_analyzer;
mod chunker;
mod cleanup;
mod config;
mod error;
mod language;
mod registry;
mod scope;
mod splitter;
mod strategy;
mod syntax;
mod textual;
mod types;

pub use ast_analyzer::AstAnalyzer;
pub use chunker::{Chunker, ChunkingReport, ChunkingStats, FileFailure};
pub use cleanup::{classify, cleanup, ChunkClass};
pub use config::{ChunkerConfig, ParseErrorPolicy, DEFAULT_MAX_CHUNK_LINES};
pub use error::{ChunkerError, ErrorKind, Result};
pub use language::Language;
pub use registry::StrategyRegistry;
pub use scope::{locate_scope_end, scan_scope_end, Delimiters};
pub use splitter::{split_unit, LineSpan, SoftBreak};
pub use strategy::{
    BoundaryStrategy, ChunkStrategy, StatementStrategy, StructuralStrategy,
};
pub use syntax::{GrammarRules, NodeRole, SyntaxBackend, SyntaxNode, SyntaxTree};
pub use textual::TextualBackend;
pub use types::{ChunkKind, CodeChunk, SourceFile};
