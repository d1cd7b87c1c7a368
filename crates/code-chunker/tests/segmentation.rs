use atlas_code_chunker::{
    cleanup, ChunkKind, Chunker, ChunkerConfig, CodeChunk, Language, ParseErrorPolicy,
};
use pretty_assertions::assert_eq;

fn chunker(max_chunk_lines: usize) -> Chunker {
    Chunker::new(ChunkerConfig {
        max_chunk_lines,
        ..ChunkerConfig::default()
    })
    .expect("valid config")
}

/// Assert the chunks are the ordered, contiguous parts of one logical unit
fn assert_parts_of_one_unit(parts: &[&CodeChunk]) {
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.part_index, i + 1);
        assert!(part.start_line <= part.end_line);
    }
    for pair in parts.windows(2) {
        assert_eq!(pair[0].end_line + 1, pair[1].start_line);
        assert_eq!(pair[0].name, pair[1].name);
        assert_eq!(pair[0].kind, pair[1].kind);
    }
}

fn big_java_class() -> String {
    let mut code = String::from("package demo;\n\npublic class BigClass {\n    private int x;\n    private int y;\n    public void bigMethod() {\n");
    for i in 0..200 {
        code.push_str(&format!("        x = x + {i};\n"));
    }
    code.push_str("    }\n}\n");
    code
}

#[test]
fn oversized_method_is_split_into_named_parts() {
    let code = big_java_class();
    let chunks = chunker(80)
        .chunk_str(&code, "src/demo/BigClass.java")
        .expect("chunking failed");

    let containers: Vec<&CodeChunk> = chunks
        .iter()
        .filter(|c| c.kind == ChunkKind::DeclarationContainer)
        .collect();
    let members: Vec<&CodeChunk> = chunks
        .iter()
        .filter(|c| c.kind == ChunkKind::Member)
        .collect();

    // one container unit, carried in budget-sized parts
    assert_eq!(
        containers.iter().filter(|c| c.part_index == 1).count(),
        1
    );
    assert!(containers
        .iter()
        .all(|c| c.name.as_deref() == Some("BigClass")));
    assert_parts_of_one_unit(&containers);
    assert_eq!(containers[0].start_line, 3);
    assert_eq!(containers.last().map(|c| c.end_line), Some(208));

    assert!(members.len() >= 3);
    assert!(members
        .iter()
        .all(|c| c.name.as_deref() == Some("bigMethod")));
    assert_parts_of_one_unit(&members);
    assert_eq!(members[0].start_line, 6);
    assert_eq!(members.last().map(|c| c.end_line), Some(207));
    assert!(members.iter().all(|c| c.line_count() <= 80));
}

#[test]
fn split_parts_reproduce_the_unit_text() {
    let code = big_java_class();
    let file_lines: Vec<&str> = code.lines().collect();
    let chunks = chunker(80)
        .chunk_str(&code, "BigClass.java")
        .expect("chunking failed");

    let joined: Vec<&str> = chunks
        .iter()
        .filter(|c| c.kind == ChunkKind::Member)
        .map(|c| c.source.as_str())
        .collect();
    assert_eq!(joined.join("\n"), file_lines[5..207].join("\n"));
}

#[test]
fn sql_script_yields_one_chunk_per_statement() {
    let code = "CREATE TABLE users (\n  id INT,\n  name TEXT\n);\n\n-- seed data\nINSERT INTO users (id, name)\nVALUES (1, 'a'),\n       (2, 'b');\n\nSELECT id,\n       name\nFROM users;\n";
    let chunks = chunker(80)
        .chunk_str(code, "db/seed.sql")
        .expect("chunking failed");

    let ranges: Vec<_> = chunks.iter().map(|c| (c.start_line, c.end_line)).collect();
    assert_eq!(ranges, vec![(1, 4), (6, 9), (11, 13)]);
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::Statement));
    assert!(chunks.iter().all(|c| c.source.trim() != "-- seed data"));
    assert!(chunks[1].source.starts_with("-- seed data\nINSERT"));
}

#[test]
fn one_line_statements_are_kept_whole() {
    let code = "SELECT 1;\n-- c\nSELECT 2;\nSELECT 3;\n";
    let chunks = chunker(80)
        .chunk_str(code, "db/short.sql")
        .expect("chunking failed");

    let summary: Vec<_> = chunks
        .iter()
        .map(|c| (c.kind, c.start_line, c.end_line, c.source.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ChunkKind::Statement, 1, 1, "SELECT 1;"),
            (ChunkKind::Statement, 2, 3, "-- c\nSELECT 2;"),
            (ChunkKind::Statement, 4, 4, "SELECT 3;"),
        ]
    );
    assert!(chunks.iter().all(|c| c.name.is_none() && c.part_index == 1));
}

#[test]
fn one_line_module_docstring_survives_cleanup() {
    let code = "\"\"\"Billing helpers.\"\"\"\n\nclass Invoice:\n    def total(self):\n        return 0\n";
    let chunks = chunker(80)
        .chunk_str(code, "billing.py")
        .expect("chunking failed");

    assert_eq!(chunks[0].kind, ChunkKind::DocComment);
    assert_eq!((chunks[0].start_line, chunks[0].end_line), (1, 1));
    assert_eq!(chunks[0].source, "\"\"\"Billing helpers.\"\"\"");
    assert!(chunks
        .iter()
        .any(|c| c.name.as_deref() == Some("Invoice")));
}

#[test]
fn multi_line_module_docstring_survives_cleanup() {
    let code = "\"\"\"Billing helpers.\n\nComputes invoice totals.\n\"\"\"\n\ndef total(items):\n    s = sum(items)\n    return s\n";
    let chunks = chunker(80)
        .chunk_str(code, "billing.py")
        .expect("chunking failed");

    let docs: Vec<_> = chunks
        .iter()
        .filter(|c| c.kind == ChunkKind::DocComment)
        .map(|c| (c.start_line, c.end_line))
        .collect();
    assert_eq!(docs, vec![(1, 4)]);
    assert_eq!(chunks[1].name.as_deref(), Some("total"));
}

#[test]
fn lone_closing_brace_leaves_nothing() {
    let chunker = chunker(80);
    assert!(chunker.chunk_str("}", "orphan.sql").unwrap().is_empty());
    assert!(chunker.chunk_str("}", "orphan.jsp").unwrap().is_empty());

    let candidates = chunker.extract_candidates("}", "orphan.sql").unwrap();
    assert_eq!(candidates.len(), 1);
    assert!(cleanup(candidates, Language::Sql).is_empty());

    let lenient = Chunker::new(ChunkerConfig {
        parse_error_policy: ParseErrorPolicy::TextualFallback,
        ..ChunkerConfig::default()
    })
    .unwrap();
    assert!(lenient.chunk_str("}", "Orphan.java").unwrap().is_empty());
}

#[test]
fn empty_files_yield_no_chunks_and_no_errors() {
    let chunker = chunker(80);
    for language in Language::SUPPORTED {
        for ext in language.extensions() {
            let path = format!("empty.{ext}");
            assert!(chunker.extract_candidates("", &path).unwrap().is_empty(), "{path}");
            assert!(chunker.chunk_str("", &path).unwrap().is_empty(), "{path}");
        }
    }
}

const SQL_FIXTURE: &str = "-- schema\nCREATE TABLE a (\n  id INT\n);\n\n\nCREATE INDEX a_id ON a (id);\nINSERT INTO a VALUES (1); INSERT INTO a VALUES (2);\n\n   \nUPDATE a\n  SET id = id + 1\n  WHERE id > 0;\nDELETE FROM a\n";

const JSP_FIXTURE: &str = "<%@ page import=\"java.util.*\" %>\n<html>\n<head>\n<script>\n  var x = 1;\n</script>\n<style>\n  p { color: red; }\n</style>\n</head>\n\n\n<body>\n<%-- loop --%>\n<c:forEach items=\"${xs}\" var=\"x\">\n  <p>${x}</p>\n</c:forEach>\n<!-- end -->\n</body>\n</html>\n";

/// Lines covered by the chunks; panics on overlap
fn covered(chunks: &[CodeChunk], total: usize) -> Vec<bool> {
    let mut seen = vec![false; total];
    for chunk in chunks {
        for line in chunk.start_line..=chunk.end_line {
            assert!(!seen[line - 1], "line {line} covered twice");
            seen[line - 1] = true;
        }
    }
    seen
}

#[test]
fn statements_cover_every_content_line() {
    let lines: Vec<&str> = SQL_FIXTURE.lines().collect();
    let candidates = chunker(80)
        .extract_candidates(SQL_FIXTURE, "fixture.sql")
        .unwrap();

    let seen = covered(&candidates, lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().is_empty() {
            assert!(seen[idx], "content line {} not covered", idx + 1);
        }
    }
}

#[test]
fn statements_cover_content_lines_when_split() {
    let lines: Vec<&str> = SQL_FIXTURE.lines().collect();
    let candidates = chunker(2)
        .extract_candidates(SQL_FIXTURE, "fixture.sql")
        .unwrap();

    let seen = covered(&candidates, lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().is_empty() {
            assert!(seen[idx], "content line {} not covered", idx + 1);
        }
    }
}

#[test]
fn regions_cover_every_line() {
    for budget in [80, 3] {
        let total = JSP_FIXTURE.lines().count();
        let candidates = chunker(budget)
            .extract_candidates(JSP_FIXTURE, "web/list.jsp")
            .unwrap();

        assert!(covered(&candidates, total).into_iter().all(|c| c));
        for pair in candidates.windows(2) {
            assert_eq!(pair[0].end_line + 1, pair[1].start_line);
        }
    }
}

#[test]
fn chunking_is_deterministic() {
    let inputs = [
        (big_java_class(), "BigClass.java"),
        (SQL_FIXTURE.to_string(), "fixture.sql"),
        (JSP_FIXTURE.to_string(), "list.jsp"),
    ];

    for (code, path) in &inputs {
        let first = chunker(40).chunk_str(code, path).unwrap();
        let second = chunker(40).chunk_str(code, path).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn cleanup_is_idempotent_on_real_output() {
    let code = big_java_class();
    for (text, path, language) in [
        (code.as_str(), "BigClass.java", Language::Java),
        (SQL_FIXTURE, "fixture.sql", Language::Sql),
        (JSP_FIXTURE, "list.jsp", Language::Markup),
    ] {
        let once = chunker(7).chunk_str(text, path).unwrap();
        let twice = cleanup(once.clone(), language);
        assert_eq!(once, twice);
    }
}

#[test]
fn unknown_extension_is_a_per_file_error() {
    let chunker = chunker(80);
    let err = chunker.chunk_str("x", "notes.md").unwrap_err();
    assert!(err.to_string().contains("notes.md"));
    assert!(chunker.chunk_str("SELECT 1\nFROM a\nWHERE b;\n", "ok.SQL").is_ok());
}
