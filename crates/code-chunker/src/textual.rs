use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::syntax::{GrammarRules, SyntaxBackend, SyntaxNode, SyntaxTree, TEXTUAL_RULES};
use crate::types::SourceFile;
use regex::Regex;

const CONTAINER_PATTERN: &str = r"^\s*(?:(?:public|private|protected|internal|static|abstract|sealed|final|partial|open|data|inner|annotation|export|default|readonly|unsafe|pub(?:\([^)]*\))?)\s+)*(?:class|interface|enum|struct|trait|record|object)\s+([A-Za-z_]\w*)";

const GO_TYPE_PATTERN: &str = r"^\s*type\s+([A-Za-z_]\w*)(?:\[[^\]]*\])?\s+(?:struct|interface)\b";

const KEYWORD_MEMBER_PATTERN: &str = r"^\s*(?:(?:public|private|protected|internal|static|override|suspend|inline|open|abstract|async|final|export|pub(?:\([^)]*\))?)\s+)*(?:fn|func|fun|def|function)\s+(?:\([^)]*\)\s*)?(?:<[^>]*>\s*)?(?:[A-Za-z_]\w*\.)?([A-Za-z_]\w*)";

const TYPED_MEMBER_PATTERN: &str = r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|abstract|async|sealed|extern|unsafe|new|partial|readonly|final|synchronized)\s+)+(?:[\w<>\[\],.?]+\s+)?([A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*\(";

/// Words that look like a member name in `modifier name(` but are not
const NOT_A_MEMBER: &[&str] = &[
    "if", "for", "foreach", "while", "switch", "catch", "using", "lock", "return", "new",
    "throw", "await", "typeof", "sizeof", "nameof", "default",
];

/// Declaration finder for brace languages without a grammar.
///
/// Reads the file line by line; a node's end is left for the scope locator
/// to find by delimiter counting.
pub struct TextualBackend {
    language: Language,
    container: Regex,
    go_type: Regex,
    keyword_member: Regex,
    typed_member: Regex,
}

impl TextualBackend {
    pub fn new(language: Language) -> Result<Self> {
        if !language.has_brace_scopes() {
            return Err(ChunkerError::invalid_config(format!(
                "{} has no brace scopes to scan",
                language.as_str()
            )));
        }

        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| ChunkerError::invalid_config(format!("bad declaration pattern: {e}")))
        };

        Ok(Self {
            language,
            container: compile(CONTAINER_PATTERN)?,
            go_type: compile(GO_TYPE_PATTERN)?,
            keyword_member: compile(KEYWORD_MEMBER_PATTERN)?,
            typed_member: compile(TYPED_MEMBER_PATTERN)?,
        })
    }

    fn classify(&self, line: &str) -> Option<(&'static str, String)> {
        let capture = |re: &Regex| {
            re.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        };

        if let Some(name) = capture(&self.container).or_else(|| capture(&self.go_type)) {
            return Some(("container", name));
        }

        capture(&self.keyword_member)
            .or_else(|| capture(&self.typed_member))
            .filter(|name| !NOT_A_MEMBER.contains(&name.as_str()))
            .map(|name| ("member", name))
    }

}

impl SyntaxBackend for TextualBackend {
    fn language(&self) -> Language {
        self.language
    }

    fn rules(&self) -> &GrammarRules {
        &TEXTUAL_RULES
    }

    fn parse(&self, file: &SourceFile<'_>) -> Result<SyntaxTree> {
        let mut nodes = Vec::new();
        let mut depth: i64 = 0;

        for (idx, line) in file.lines.iter().enumerate() {
            if self.language.is_comment_line(line) {
                continue;
            }

            if let Some((kind, name)) = self.classify(line) {
                nodes.push(SyntaxNode {
                    kind,
                    name: Some(name),
                    start_line: idx + 1,
                    end_line: None,
                    depth: usize::try_from(depth.max(0)).unwrap_or_default(),
                });
            }

            for ch in line.chars() {
                match ch {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
            }
        }

        log::trace!(
            "textual scan of {} found {} declarations",
            file.path,
            nodes.len()
        );
        Ok(SyntaxTree::new(nodes))
    }
}
