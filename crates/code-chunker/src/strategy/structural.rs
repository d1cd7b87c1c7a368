use super::{emit_unit, ChunkStrategy};
use crate::ast_analyzer::AstAnalyzer;
use crate::config::{ChunkerConfig, ParseErrorPolicy};
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::scope::{locate_scope_end, Delimiters};
use crate::splitter::SoftBreak;
use crate::syntax::{NodeRole, SyntaxBackend, SyntaxTree};
use crate::textual::TextualBackend;
use crate::types::{ChunkKind, CodeChunk, SourceFile};

/// Name given to declarations without an identifier
pub const ANONYMOUS: &str = "<anonymous>";

/// Declaration-driven strategy for general-purpose languages.
///
/// Every container and every member found by the backend becomes its own
/// logical unit, so a method's lines appear both inside its class chunk and
/// in the method's own chunk.
pub struct StructuralStrategy {
    backend: Box<dyn SyntaxBackend>,
    fallback: Option<Box<dyn SyntaxBackend>>,
    max_chunk_lines: usize,
}

impl StructuralStrategy {
    /// Strategy over an explicit backend
    pub fn new(backend: Box<dyn SyntaxBackend>, max_chunk_lines: usize) -> Self {
        Self {
            backend,
            fallback: None,
            max_chunk_lines,
        }
    }

    /// Tree-sitter strategy; with `TextualFallback`, brace languages also get
    /// a textual backend for files the grammar rejects
    pub fn tree_sitter(language: Language, config: &ChunkerConfig) -> Result<Self> {
        let mut strategy = Self::new(Box::new(AstAnalyzer::new(language)?), config.max_chunk_lines);

        if config.parse_error_policy == ParseErrorPolicy::TextualFallback
            && language.has_brace_scopes()
        {
            strategy.fallback = Some(Box::new(TextualBackend::new(language)?));
        }

        Ok(strategy)
    }

    /// Delimiter-scanning strategy for languages without a grammar
    pub fn textual(language: Language, config: &ChunkerConfig) -> Result<Self> {
        Ok(Self::new(
            Box::new(TextualBackend::new(language)?),
            config.max_chunk_lines,
        ))
    }

    fn parse<'s>(&'s self, file: &SourceFile<'_>) -> Result<(SyntaxTree, &'s dyn SyntaxBackend)> {
        match self.backend.parse(file) {
            Ok(tree) => Ok((tree, self.backend.as_ref())),
            Err(err @ ChunkerError::ParseFailure { .. }) => {
                let Some(fallback) = self.fallback.as_deref() else {
                    return Err(err);
                };
                log::warn!("{err}; falling back to textual scan");
                Ok((fallback.parse(file)?, fallback))
            }
            Err(err) => Err(err),
        }
    }
}

impl ChunkStrategy for StructuralStrategy {
    fn language(&self) -> Language {
        self.backend.language()
    }

    fn extract(&self, file: &SourceFile<'_>) -> Result<Vec<CodeChunk>> {
        let (tree, backend) = self.parse(file)?;
        let soft_break = SoftBreak::new(backend.language().line_comment_markers());
        let mut chunks = Vec::new();

        if let Some(range) = tree.module_doc() {
            chunks.extend(emit_unit(
                file,
                ChunkKind::DocComment,
                None,
                range,
                self.max_chunk_lines,
                soft_break,
            ));
        }

        let rules = backend.rules();
        let nodes = tree.nodes();
        for (idx, node) in nodes.iter().enumerate() {
            let kind = match rules.role(node.kind) {
                Some(NodeRole::Container) => ChunkKind::DeclarationContainer,
                Some(NodeRole::Member) => ChunkKind::Member,
                None => continue,
            };

            // first later sibling-or-outer declaration
            let next_declaration = nodes[idx + 1..]
                .iter()
                .find(|next| {
                    rules.role(next.kind).is_some()
                        && next.depth <= node.depth
                        && next.start_line > node.start_line
                })
                .map(|next| next.start_line);

            let end_line = locate_scope_end(
                node.start_line,
                node.end_line,
                next_declaration,
                &file.lines,
                Delimiters::BRACES,
            );
            let name = node.name.clone().unwrap_or_else(|| ANONYMOUS.to_string());

            chunks.extend(emit_unit(
                file,
                kind,
                Some(name),
                (node.start_line, end_line),
                self.max_chunk_lines,
                soft_break,
            ));
        }

        Ok(chunks)
    }
}
