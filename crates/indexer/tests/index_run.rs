use atlas_code_chunker::{ChunkKind, ChunkerConfig, ParseErrorPolicy};
use atlas_indexer::{
    ChunkIndexer, ChunkRecord, IndexerError, JsonDirSink, MemorySink, ScanOptions,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MAIN_JAVA: &str = r#"package demo;

public class Main {
    public static void main(String[] args) {
        System.out.println("hi");
        System.out.println("there");
    }
}
"#;

const SCHEMA_SQL: &str = "CREATE TABLE users (
    id INT,
    name TEXT
);

-- seed data
INSERT INTO users
VALUES (1, 'root')
RETURNING id;
";

const INDEX_JSP: &str = r#"<html>
<body>
<h1>Users</h1>
<%@ page import="demo.Main" %>
<c:forEach items="${users}" var="u">
  <p>${u.name}</p>
</c:forEach>
</body>
</html>
"#;

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

fn write_project(root: &Path) {
    for dir in ["src", "db", "web", "node_modules/lib"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("src/Main.java"), MAIN_JAVA).unwrap();
    fs::write(root.join("src/Broken.java"), "public class Broken {\n    void f( {\n").unwrap();
    fs::write(root.join("db/schema.sql"), SCHEMA_SQL).unwrap();
    fs::write(root.join("web/index.jsp"), INDEX_JSP).unwrap();
    fs::write(root.join("notes.txt"), "not source").unwrap();
    fs::write(root.join("node_modules/lib/x.js"), "function x() {\n  return 1;\n}\n").unwrap();
}

fn distinct_paths(records: &[ChunkRecord]) -> Vec<&str> {
    let mut paths: Vec<&str> = Vec::new();
    for record in records {
        let path = record.chunk.file_path.as_str();
        if paths.last() != Some(&path) {
            paths.push(path);
        }
    }
    paths
}

#[tokio::test]
async fn indexes_mixed_project_and_tallies_failures() {
    init_logging();
    let temp = tempdir().unwrap();
    write_project(temp.path());

    let indexer = ChunkIndexer::new(temp.path(), ChunkerConfig::default()).unwrap();
    assert_eq!(indexer.scan().len(), 4);

    let sink = MemorySink::new();
    let stats = indexer.run(&sink).await.unwrap();

    assert_eq!(stats.files, 3);
    assert_eq!(stats.failed_files, 1);
    assert_eq!(stats.error_kinds.get("parse_failure"), Some(&1));
    assert!(stats.errors[0].contains("src/Broken.java"));
    assert_eq!(stats.languages.get("java"), Some(&1));
    assert_eq!(stats.languages.get("sql"), Some(&1));

    let records = sink.records().await;
    assert_eq!(stats.chunks, records.len());
    assert_eq!(
        distinct_paths(&records),
        vec!["db/schema.sql", "src/Main.java", "web/index.jsp"]
    );

    let main = records
        .iter()
        .find(|r| r.chunk.name.as_deref() == Some("main"))
        .unwrap();
    assert_eq!(main.chunk.kind, ChunkKind::Member);
    assert_eq!((main.chunk.start_line, main.chunk.end_line), (4, 7));
    assert!(records
        .iter()
        .any(|r| r.chunk.kind == ChunkKind::TemplateRegion));
}

#[tokio::test]
async fn lenient_policy_recovers_broken_java() {
    init_logging();
    let temp = tempdir().unwrap();
    write_project(temp.path());

    let indexer = ChunkIndexer::new(temp.path(), ChunkerConfig::lenient()).unwrap();
    assert_eq!(
        indexer.chunker().config().parse_error_policy,
        ParseErrorPolicy::TextualFallback
    );

    let stats = indexer.run(&MemorySink::new()).await.unwrap();
    assert_eq!(stats.failed_files, 0);
    assert_eq!(stats.files, 4);
}

#[tokio::test]
async fn json_sink_output_is_stable_across_runs() {
    init_logging();
    let project = tempdir().unwrap();
    write_project(project.path());
    let out = tempdir().unwrap();

    let options = ScanOptions::with_extensions(["sql", "java"]);
    let indexer = ChunkIndexer::new(project.path(), ChunkerConfig::default())
        .unwrap()
        .with_scan_options(options);

    let mut listings = Vec::new();
    for run in 0..2 {
        let sink = JsonDirSink::create(out.path().join(format!("run{run}")))
            .await
            .unwrap();
        let stats = indexer.run(&sink).await.unwrap();
        assert_eq!(sink.written().await, stats.chunks);

        let mut names: Vec<String> = fs::read_dir(sink.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        listings.push(names);
    }

    assert!(!listings[0].is_empty());
    assert!(listings[0].iter().all(|n| n.starts_with("chunk_") && n.ends_with(".json")));
    assert_eq!(listings[0], listings[1]);
}

#[tokio::test]
async fn every_file_failing_is_a_hard_error() {
    init_logging();
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("A.java"), "class A {\n    void f( {\n").unwrap();

    let indexer = ChunkIndexer::new(temp.path(), ChunkerConfig::default()).unwrap();
    let err = indexer.run(&MemorySink::new()).await.unwrap_err();
    assert!(matches!(
        err,
        IndexerError::NothingIndexed {
            scanned: 1,
            failed: 1
        }
    ));
}
