use std::path::Path;

/// Input language / file kind, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Java,
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Tsx,
    CSharp,
    Go,
    Kotlin,
    Sql,
    Markup,
    Unknown,
}

impl Language {
    /// Every language with a registered strategy
    pub const SUPPORTED: [Language; 11] = [
        Language::Java,
        Language::Python,
        Language::Rust,
        Language::JavaScript,
        Language::TypeScript,
        Language::Tsx,
        Language::CSharp,
        Language::Go,
        Language::Kotlin,
        Language::Sql,
        Language::Markup,
    ];

    /// Detect language from file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "java" => Language::Java,
            "py" | "pyw" => Language::Python,
            "rs" => Language::Rust,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "kt" | "kts" => Language::Kotlin,
            "sql" | "psql" | "tsql" => Language::Sql,
            "jsp" | "jspf" | "jspx" | "tag" | "html" | "htm" => Language::Markup,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Extensions that map to this language
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::Python => &["py", "pyw"],
            Language::Rust => &["rs"],
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::CSharp => &["cs"],
            Language::Go => &["go"],
            Language::Kotlin => &["kt", "kts"],
            Language::Sql => &["sql", "psql", "tsql"],
            Language::Markup => &["jsp", "jspf", "jspx", "tag", "html", "htm"],
            Language::Unknown => &[],
        }
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Kotlin => "kotlin",
            Language::Sql => "sql",
            Language::Markup => "markup",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is parsed with a tree-sitter grammar
    pub fn supports_ast(self) -> bool {
        self.tree_sitter_language().is_some()
    }

    /// Check if declarations can be located by scanning `{`/`}`
    pub fn has_brace_scopes(self) -> bool {
        matches!(
            self,
            Language::Java
                | Language::Rust
                | Language::JavaScript
                | Language::TypeScript
                | Language::Tsx
                | Language::CSharp
                | Language::Go
                | Language::Kotlin
        )
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Option<tree_sitter::Language> {
        match self {
            Language::Java => Some(tree_sitter_java::LANGUAGE.into()),
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            _ => None,
        }
    }

    /// Prefixes that mark a whole line as a comment. Block-comment
    /// continuations are `* `, `*/` or a bare `*`, so `*p = 1;` stays code.
    pub fn comment_prefixes(self) -> &'static [&'static str] {
        match self {
            Language::Java
            | Language::Rust
            | Language::JavaScript
            | Language::TypeScript
            | Language::Tsx
            | Language::CSharp
            | Language::Go
            | Language::Kotlin => &["//", "/*", "* ", "*/"],
            Language::Python => &["#"],
            Language::Sql => &["--", "/*", "* ", "*/"],
            Language::Markup => &["<!--", "<%--", "-->", "--%>"],
            Language::Unknown => &[],
        }
    }

    /// Whether `line` is a whole-line comment in this language
    pub fn is_comment_line(self, line: &str) -> bool {
        is_comment(line.trim(), self.comment_prefixes())
    }

    /// Line-comment markers; a line starting with one is a preferred split point
    pub fn line_comment_markers(self) -> &'static [&'static str] {
        match self {
            Language::Python => &["#"],
            Language::Sql => &["--"],
            Language::Markup => &["<!--", "<%--"],
            Language::Unknown => &[],
            _ => &["//"],
        }
    }
}

/// Whether the trimmed `line` starts with one of `prefixes`; a prefix with
/// trailing whitespace also matches the bare marker
pub(crate) fn is_comment(line: &str, prefixes: &[&str]) -> bool {
    prefixes
        .iter()
        .any(|prefix| line.starts_with(prefix) || line == prefix.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("java"), Language::Java);
        assert_eq!(Language::from_extension("JAVA"), Language::Java);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("SQL"), Language::Sql);
        assert_eq!(Language::from_extension("tsql"), Language::Sql);
        assert_eq!(Language::from_extension("jsp"), Language::Markup);
        assert_eq!(Language::from_extension("tsx"), Language::Tsx);
        assert_eq!(Language::from_extension("txt"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("src/Main.java"), Language::Java);
        assert_eq!(Language::from_path("db/schema.Sql"), Language::Sql);
        assert_eq!(Language::from_path("web/index.JSP"), Language::Markup);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn test_extensions_round_trip() {
        for language in Language::SUPPORTED {
            for ext in language.extensions() {
                assert_eq!(Language::from_extension(ext), language);
            }
        }
    }

    #[test]
    fn test_supports_ast() {
        assert!(Language::Java.supports_ast());
        assert!(Language::Python.supports_ast());
        assert!(Language::Rust.supports_ast());
        assert!(Language::Tsx.supports_ast());
        assert!(!Language::Go.supports_ast());
        assert!(!Language::Sql.supports_ast());
        assert!(!Language::Unknown.supports_ast());
    }

    #[test]
    fn test_comment_markers() {
        assert!(Language::Java.comment_prefixes().contains(&"//"));
        assert!(Language::Python.comment_prefixes().contains(&"#"));
        assert!(Language::Java.is_comment_line("   * @param x the value"));
        assert!(Language::Java.is_comment_line("   */"));
        assert!(Language::Java.is_comment_line("   *"));
        assert!(!Language::Rust.is_comment_line("    *count += 1;"));
        assert!(!Language::Sql.is_comment_line("  *, id"));
        assert_eq!(Language::Sql.line_comment_markers(), &["--"]);
        assert!(Language::Markup.line_comment_markers().contains(&"<!--"));
    }
}
