use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::syntax::{GrammarRules, SyntaxBackend, SyntaxNode, SyntaxTree};
use crate::types::SourceFile;
use tree_sitter::{Node, Parser};

/// Tree-sitter backed syntax backend.
///
/// Holds only the grammar; a parser is created per call so one analyzer can
/// serve many files concurrently.
pub struct AstAnalyzer {
    language: Language,
    grammar: tree_sitter::Language,
    rules: &'static GrammarRules,
}

impl AstAnalyzer {
    /// Create new AST analyzer for a language
    pub fn new(language: Language) -> Result<Self> {
        let (Some(grammar), Some(rules)) = (
            language.tree_sitter_language(),
            GrammarRules::for_language(language),
        ) else {
            return Err(ChunkerError::invalid_config(format!(
                "no tree-sitter grammar for {}",
                language.as_str()
            )));
        };

        Ok(Self {
            language,
            grammar,
            rules,
        })
    }

    fn parser(&self, path: &str) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.grammar)
            .map_err(|e| ChunkerError::parse(path, format!("Failed to set language: {e}")))?;
        Ok(parser)
    }

    /// Flatten the named nodes of the tree in pre-order
    fn flatten(&self, root: Node, source: &[u8]) -> Vec<SyntaxNode> {
        let mut nodes = Vec::new();
        let mut cursor = root.walk();
        let mut depth = 0usize;

        loop {
            let node = cursor.node();
            if node.is_named() {
                let kind = node.kind();
                let name = if self.rules.is_declaration(kind) {
                    Self::extract_symbol_name(node, source)
                } else {
                    None
                };
                nodes.push(SyntaxNode {
                    kind,
                    name,
                    start_line: node.start_position().row + 1,
                    end_line: Some(Self::end_line(node)),
                    depth,
                });
            }

            if cursor.goto_first_child() {
                depth += 1;
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return nodes;
                }
                depth -= 1;
            }
        }
    }

    /// 1-based last line of a node; a span ending at column 0 belongs to the
    /// line before
    fn end_line(node: Node) -> usize {
        let start = node.start_position();
        let end = node.end_position();
        if end.column == 0 && end.row > start.row {
            end.row
        } else {
            end.row + 1
        }
    }

    /// Extract symbol name from a declaration node
    fn extract_symbol_name(node: Node, source: &[u8]) -> Option<String> {
        // `impl` blocks have no name field; they are named after the type
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| node.child_by_field_name("type"))
            .or_else(|| {
                let mut cursor = node.walk();
                let found = node.children(&mut cursor).find(|child| {
                    matches!(
                        child.kind(),
                        "identifier" | "type_identifier" | "property_identifier"
                    )
                });
                found
            })?;

        let text = name_node.utf8_text(source).ok()?;
        let base = text
            .split(|c: char| c == '<' || c.is_whitespace())
            .next()
            .unwrap_or(text);
        let base = base.rsplit("::").next().unwrap_or(base);

        if base.is_empty() {
            None
        } else {
            Some(base.to_string())
        }
    }

    /// Line range of a leading string statement (module docstring)
    fn module_docstring(root: Node) -> Option<(usize, usize)> {
        let mut cursor = root.walk();
        let first = root
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment")?;
        if first.kind() != "expression_statement" {
            return None;
        }

        let mut inner = first.walk();
        let expr = first.named_children(&mut inner).next()?;
        if expr.kind() != "string" {
            return None;
        }

        Some((first.start_position().row + 1, Self::end_line(first)))
    }

    /// Human-readable location of the first syntax error
    fn describe_error(root: Node) -> String {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                let pos = node.start_position();
                let what = if node.is_missing() {
                    format!("missing `{}`", node.kind())
                } else {
                    "syntax error".to_string()
                };
                return format!("{what} at line {}, column {}", pos.row + 1, pos.column + 1);
            }

            // descend only into subtrees that contain the error
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return "syntax error".to_string();
                }
            }
        }
    }
}

impl SyntaxBackend for AstAnalyzer {
    fn language(&self) -> Language {
        self.language
    }

    fn rules(&self) -> &GrammarRules {
        self.rules
    }

    fn parse(&self, file: &SourceFile<'_>) -> Result<SyntaxTree> {
        let mut parser = self.parser(file.path)?;
        let tree = parser
            .parse(file.text, None)
            .ok_or_else(|| ChunkerError::parse(file.path, "Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ChunkerError::parse(file.path, Self::describe_error(root)));
        }

        let source = file.text.as_bytes();
        let syntax = SyntaxTree::new(self.flatten(root, source));

        Ok(match Self::module_docstring(root) {
            Some((start, end)) if self.rules.module_docstring => syntax.with_module_doc(start, end),
            _ => syntax,
        })
    }
}
