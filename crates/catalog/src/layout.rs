use std::path::{Path, PathBuf};

/// On-disk locations used by the fetch and generate steps.
///
/// Everything defaults to a path under the project root; callers may override
/// individual entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub catalog_path: PathBuf,
    pub columns_dir: PathBuf,
    pub sources_dir: PathBuf,
}

impl ProjectLayout {
    pub fn from_root(root: &Path) -> Self {
        Self {
            catalog_path: root.join("input").join("data.json"),
            columns_dir: root.join("input").join("columns"),
            sources_dir: root.join("models").join("sources"),
        }
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog_path = path;
        }
        self
    }

    pub fn with_columns_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.columns_dir = dir;
        }
        self
    }

    pub fn with_sources_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.sources_dir = dir;
        }
        self
    }
}
