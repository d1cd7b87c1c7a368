use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::language::Language;
use crate::strategy::{BoundaryStrategy, ChunkStrategy, StatementStrategy, StructuralStrategy};
use std::collections::HashMap;
use std::sync::Arc;

/// Extension-keyed table of strategies.
///
/// Built once at setup; lookups are read-only afterwards.
#[derive(Default, Clone)]
pub struct StrategyRegistry {
    by_extension: HashMap<String, Arc<dyn ChunkStrategy>>,
}

impl StrategyRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a strategy for every supported language
    pub fn with_defaults(config: &ChunkerConfig) -> Result<Self> {
        let mut registry = Self::new();

        for language in Language::SUPPORTED {
            let strategy: Arc<dyn ChunkStrategy> = match language {
                Language::Sql => Arc::new(StatementStrategy::new(config)?),
                Language::Markup => Arc::new(BoundaryStrategy::new(config)?),
                lang if lang.supports_ast() => {
                    Arc::new(StructuralStrategy::tree_sitter(lang, config)?)
                }
                lang => Arc::new(StructuralStrategy::textual(lang, config)?),
            };
            registry.register(language.extensions(), strategy);
        }

        log::debug!(
            "strategy registry ready: {} extensions",
            registry.by_extension.len()
        );
        Ok(registry)
    }

    /// Route `extensions` (case-insensitive) to `strategy`, replacing any
    /// previous registration
    pub fn register(&mut self, extensions: &[&str], strategy: Arc<dyn ChunkStrategy>) {
        for ext in extensions {
            self.by_extension
                .insert(ext.to_ascii_lowercase(), Arc::clone(&strategy));
        }
    }

    /// Strategy for an extension, if any
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&Arc<dyn ChunkStrategy>> {
        self.by_extension.get(&extension.to_ascii_lowercase())
    }

    /// Registered extensions, sorted
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}
