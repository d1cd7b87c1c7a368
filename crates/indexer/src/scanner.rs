use atlas_code_chunker::Language;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB

/// Directory names never descended into
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    // VCS / tooling
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    // caches / builds
    "node_modules",
    "build",
    "dist",
    "target",
    "out",
    "__pycache__",
    ".venv",
    "venv",
    // vendored code
    "vendor",
    "third_party",
];

/// What the scanner picks up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Extensions to include (case-insensitive); empty means every extension
    /// the chunker has a strategy for
    pub include_extensions: Vec<String>,

    /// Directory names to prune (case-insensitive)
    pub exclude_dirs: Vec<String>,

    /// Files larger than this are skipped
    pub max_file_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            max_file_size: MAX_FILE_SIZE_BYTES,
        }
    }
}

impl ScanOptions {
    /// Only the given extensions
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_extensions: extensions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    fn extensions(&self) -> Vec<String> {
        if self.include_extensions.is_empty() {
            Language::SUPPORTED
                .iter()
                .flat_map(|language| language.extensions())
                .map(|ext| ext.to_string())
                .collect()
        } else {
            self.include_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect()
        }
    }
}

/// Scanner for finding source files in a project
pub struct FileScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_options(root, ScanOptions::default())
    }

    pub fn with_options(root: impl AsRef<Path>, options: ScanOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    /// Scan directory for source files (.gitignore aware), sorted by path
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let extensions = self.options.extensions();

        let root = self.root.clone();
        let excluded: Vec<String> = self
            .options
            .exclude_dirs
            .iter()
            .map(|d| d.to_lowercase())
            .collect();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true) // hidden files and directories are never indexed
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true);
        builder.filter_entry(move |entry| !Self::is_excluded_scope(entry.path(), &root, &excluded));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > self.options.max_file_size {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                self.options.max_file_size
                            );
                            continue;
                        }
                    }

                    if !Self::has_extension(path, &extensions) {
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} source files", files.len());
        files
    }

    fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                extensions.iter().any(|candidate| candidate == &ext)
            })
    }

    fn is_excluded_scope(path: &Path, root: &Path, excluded: &[String]) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        relative.components().any(|component| match component {
            Component::Normal(name) => {
                let lowered = name.to_string_lossy().to_lowercase();
                excluded.iter().any(|ignored| ignored == &lowered)
            }
            _ => false,
        })
    }
}
