//! Parser capability used by the structural strategy.
//!
//! A backend turns a file into a flat, pre-order arena of nodes with line
//! spans. Containers and their members are separate records; nesting is
//! only visible through `depth`.

use crate::error::Result;
use crate::language::Language;
use crate::types::SourceFile;

/// A parsed file: nodes in depth-first pre-order
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    module_doc: Option<(usize, usize)>,
}

impl SyntaxTree {
    #[must_use]
    pub fn new(nodes: Vec<SyntaxNode>) -> Self {
        Self {
            nodes,
            module_doc: None,
        }
    }

    /// Attach the line range of a file-level docstring
    #[must_use]
    pub const fn with_module_doc(mut self, start_line: usize, end_line: usize) -> Self {
        self.module_doc = Some((start_line, end_line));
        self
    }

    #[must_use]
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    #[must_use]
    pub const fn module_doc(&self) -> Option<(usize, usize)> {
        self.module_doc
    }
}

/// One node of a syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Grammar rule name (`class_declaration`, `function_item`, ...)
    pub kind: &'static str,
    /// Declared identifier, only resolved for declaration nodes
    pub name: Option<String>,
    /// 1-based first line
    pub start_line: usize,
    /// 1-based last line when the backend knows it; `None` leaves it to the
    /// scope locator
    pub end_line: Option<usize>,
    /// Nesting level among the file's nodes. The next declaration at the
    /// same or a shallower level caps the scope scan of a body-less one.
    pub depth: usize,
}

/// Which rule names count as containers and which as members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarRules {
    pub containers: &'static [&'static str],
    pub members: &'static [&'static str],
    /// Whether a leading string statement is the module's documentation
    pub module_docstring: bool,
}

/// Role of a declaration node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Container,
    Member,
}

impl GrammarRules {
    #[must_use]
    pub fn role(&self, kind: &str) -> Option<NodeRole> {
        if self.containers.contains(&kind) {
            Some(NodeRole::Container)
        } else if self.members.contains(&kind) {
            Some(NodeRole::Member)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_declaration(&self, kind: &str) -> bool {
        self.role(kind).is_some()
    }

    /// Grammar rules for a tree-sitter language
    #[must_use]
    pub const fn for_language(language: Language) -> Option<&'static GrammarRules> {
        match language {
            Language::Java => Some(&JAVA_RULES),
            Language::Python => Some(&PYTHON_RULES),
            Language::Rust => Some(&RUST_RULES),
            Language::JavaScript => Some(&JAVASCRIPT_RULES),
            Language::TypeScript | Language::Tsx => Some(&TYPESCRIPT_RULES),
            _ => None,
        }
    }
}

pub static JAVA_RULES: GrammarRules = GrammarRules {
    containers: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "annotation_type_declaration",
    ],
    members: &[
        "method_declaration",
        "constructor_declaration",
        "compact_constructor_declaration",
    ],
    module_docstring: false,
};

pub static PYTHON_RULES: GrammarRules = GrammarRules {
    containers: &["class_definition"],
    members: &["function_definition"],
    module_docstring: true,
};

pub static RUST_RULES: GrammarRules = GrammarRules {
    containers: &[
        "struct_item",
        "enum_item",
        "union_item",
        "trait_item",
        "impl_item",
        "mod_item",
    ],
    members: &["function_item", "function_signature_item"],
    module_docstring: false,
};

pub static JAVASCRIPT_RULES: GrammarRules = GrammarRules {
    containers: &["class_declaration"],
    members: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
    ],
    module_docstring: false,
};

pub static TYPESCRIPT_RULES: GrammarRules = GrammarRules {
    containers: &[
        "class_declaration",
        "abstract_class_declaration",
        "interface_declaration",
        "enum_declaration",
    ],
    members: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
    ],
    module_docstring: false,
};

/// Rules used by the delimiter-scanning backend, whose nodes are already
/// classified while reading lines.
pub static TEXTUAL_RULES: GrammarRules = GrammarRules {
    containers: &["container"],
    members: &["member"],
    module_docstring: false,
};

/// The `parse(source) -> tree-with-spans` capability.
///
/// Implementations are built once and shared read-only across files.
pub trait SyntaxBackend: Send + Sync {
    /// Language this backend parses
    fn language(&self) -> Language;

    /// Rule names the strategy should treat as declarations
    fn rules(&self) -> &GrammarRules;

    /// Parse one file
    fn parse(&self, file: &SourceFile<'_>) -> Result<SyntaxTree>;
}
