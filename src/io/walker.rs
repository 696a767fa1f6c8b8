use crate::core::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Lists every NetLinx source under a project root, for the audit block.
pub struct SourceWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl SourceWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: vec!["axi".to_string(), "axs".to_string()],
            ignore_patterns: vec![],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Relative, `/`-separated paths, sorted.
    pub fn walk(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(false)
            .ignore(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| Error::FileSystem {
                message: format!("Failed to list {}: {e}", self.root.display()),
                path: Some(self.root.clone()),
                source: e.into_io_error(),
            })?;
            let path = entry.path();

            if path.is_file() {
                if let Some(relative) = self.relative(path) {
                    if self.should_list(&relative) {
                        files.push(relative);
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        Some(relative.to_string_lossy().replace('\\', "/"))
    }

    fn should_list(&self, relative: &str) -> bool {
        let matches_extension = Path::new(relative)
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(&ext))
            });
        if !matches_extension {
            return false;
        }

        !self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(relative))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_lists_sources_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        for file in ["main.axs", "include/b.axi", "include/a.AXI", "notes.txt", "ui/panel.tp4"] {
            touch(dir.path(), file);
        }
        let files = SourceWalker::new(dir.path().to_path_buf())
            .with_extensions(vec!["axi".into(), "axs".into()])
            .walk()
            .unwrap();
        assert_eq!(files, vec!["include/a.AXI", "include/b.axi", "main.axs"]);
    }

    #[test]
    fn test_ignore_patterns_are_globs() {
        let dir = TempDir::new().unwrap();
        for file in ["main.axs", "vendor/lib.axi", "include/x.axi"] {
            touch(dir.path(), file);
        }
        let files = SourceWalker::new(dir.path().to_path_buf())
            .with_ignore_patterns(vec!["vendor/**".into()])
            .walk()
            .unwrap();
        assert_eq!(files, vec!["include/x.axi", "main.axs"]);
    }
}
