//! Index of existing content files for route existence checks.
//!
//! Routes resolve the way the site generator resolves them:
//! - `/` → `README.md` or `index.md`
//! - `/guide/` → `guide/README.md` or `guide/index.md`
//! - `/guide/setup` → `guide/setup.md`, `guide/setup/README.md` or `guide/setup/index.md`
//!
//! A `.html` suffix, `#fragment` and `?query` are ignored.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::route::document_path;

/// Landing page file names, in lookup order.
const INDEX_FILES: [&str; 2] = ["README.md", "index.md"];

/// Set of content files, as `/`-separated paths relative to the content root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentIndex {
    files: HashSet<String>,
}

impl ContentIndex {
    /// Build an index from an explicit list of relative file paths.
    ///
    /// Backslashes and leading `./` or `/` are normalized away.
    #[must_use]
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = paths
            .into_iter()
            .map(|p| normalize_file_path(p.as_ref()))
            .collect();
        Self { files }
    }

    /// Build an index by walking `source_dir` for markdown files.
    ///
    /// Hidden files and directories are skipped. Unreadable subdirectories
    /// are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `source_dir` itself cannot be read.
    pub fn scan(source_dir: &Path) -> io::Result<Self> {
        let mut files = HashSet::new();
        let entries = fs::read_dir(source_dir)?;
        scan_entries(entries, "", &mut files);
        tracing::debug!(
            source_dir = %source_dir.display(),
            file_count = files.len(),
            "Content scan completed"
        );
        Ok(Self { files })
    }

    /// Whether `route` resolves to a file in the index.
    #[must_use]
    pub fn contains_route(&self, route: &str) -> bool {
        self.resolve(route).is_some()
    }

    /// File a route resolves to, if any.
    #[must_use]
    pub fn resolve(&self, route: &str) -> Option<&str> {
        candidates(route)
            .into_iter()
            .find_map(|c| self.files.get(&c).map(String::as_str))
    }

    #[must_use]
    pub fn contains_file(&self, path: &str) -> bool {
        self.files.contains(&normalize_file_path(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn scan_entries(entries: fs::ReadDir, prefix: &str, files: &mut HashSet<String>) {
    for entry in entries.filter_map(|entry| readable_entry(entry, prefix)) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            match fs::read_dir(entry.path()) {
                Ok(children) => scan_entries(children, &relative, files),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "Failed to read content directory, skipping");
                }
            }
        } else if Path::new(&relative).extension().is_some_and(|e| e == "md") {
            files.insert(relative);
        }
    }
}

/// Unwrap a directory entry, logging the ones that cannot be read.
fn readable_entry(entry: io::Result<fs::DirEntry>, prefix: &str) -> Option<fs::DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!(dir = %prefix, error = %e, "Failed to read content entry, skipping");
            None
        }
    }
}

fn normalize_file_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path);
    path.trim_start_matches('/').to_owned()
}

/// Candidate content files for a route, in lookup order.
fn candidates(route: &str) -> Vec<String> {
    let path = document_path(route).trim_start_matches('/');
    let path = path.strip_suffix(".html").unwrap_or(path);

    if path.is_empty() {
        return INDEX_FILES.iter().map(|&f| f.to_owned()).collect();
    }

    if let Some(dir) = path.strip_suffix('/') {
        return INDEX_FILES.iter().map(|f| format!("{dir}/{f}")).collect();
    }

    let mut out = Vec::with_capacity(1 + INDEX_FILES.len());
    if path.ends_with(".md") {
        out.push(path.to_owned());
    } else {
        out.push(format!("{path}.md"));
    }
    out.extend(INDEX_FILES.iter().map(|f| format!("{path}/{f}")));
    out
}
