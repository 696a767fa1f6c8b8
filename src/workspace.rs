//! Workspace discovery: which files belong to the build.
//!
//! A NetLinx Studio workspace (`.apw`) is an XML document of projects, each
//! holding systems, each listing its files. Only the first system of the
//! first project is scanned. The generator core never looks at this module's
//! inputs; it receives the ordered [`SourceSet`] built here.

use crate::config::{directory_ancestors, ScanConfig};
use crate::core::{Error, Result};
use crate::io::SourceWalker;
use crate::rpc::Audit;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const MAX_SEARCH_DEPTH: usize = 10;
const WORKSPACE_EXTENSION: &str = "apw";

/// A source file selected for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Location on disk.
    pub path: PathBuf,
    /// `/`-separated path relative to the project root, as shown in output.
    pub display: String,
}

/// Ordered files to scan plus the audit of what was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    pub audit: Audit,
}

/// A parsed `.apw` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub path: PathBuf,
    /// File entries of the first system, in document order, as written.
    pub entries: Vec<String>,
}

impl Workspace {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::WorkspaceNotFound {
                searched: path.to_path_buf(),
            },
            _ => Error::file_system("Failed to read workspace", path, e),
        })?;
        Self::parse(path, &crate::io::decode_latin1(&contents))
    }

    pub fn parse(path: &Path, xml: &str) -> Result<Self> {
        let project = first_element(xml, "Project")
            .ok_or_else(|| Error::workspace(path, "no <Project> element"))?;
        let system = first_element(project, "System")
            .ok_or_else(|| Error::workspace(path, "first project has no <System> element"))?;

        let file_path = Regex::new(r"(?s)<FilePathName>\s*(.*?)\s*</FilePathName>")?;
        let entries = file_path
            .captures_iter(system)
            .map(|c| decode_entities(&c[1]))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Directory that workspace entries are relative to.
    pub fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// Find the first `.apw` file (by name) in `start` or its ancestors.
pub fn find_workspace(start: &Path) -> Result<PathBuf> {
    for dir in directory_ancestors(start.to_path_buf(), MAX_SEARCH_DEPTH) {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_extension(p, WORKSPACE_EXTENSION))
            .collect();
        candidates.sort();
        if let Some(found) = candidates.into_iter().next() {
            debug!("Found workspace {}", found.display());
            return Ok(found);
        }
    }

    Err(Error::WorkspaceNotFound {
        searched: start.to_path_buf(),
    })
}

/// Builds the ordered scan list and audit block for a project root.
pub struct SourceSelector<'a> {
    root: &'a Path,
    scan: &'a ScanConfig,
    exclude: Regex,
}

impl<'a> SourceSelector<'a> {
    pub fn new(root: &'a Path, scan: &'a ScanConfig) -> Result<Self> {
        Ok(Self {
            root,
            scan,
            exclude: Regex::new(&scan.exclude)?,
        })
    }

    /// Select from raw entries relative to `base`, keeping their order.
    /// Entries with other extensions or matching the exclude pattern are
    /// dropped.
    pub fn select<I, S>(&self, base: &Path, entries: I) -> Vec<SourceFile>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|entry| normalize(&base.join(entry.as_ref().replace('\\', "/"))))
            .filter(|path| {
                self.scan
                    .extensions
                    .iter()
                    .any(|ext| has_extension(path, ext))
            })
            .map(|path| SourceFile {
                display: display_path(self.root, &path),
                path,
            })
            .filter(|file| {
                let excluded = self.exclude.is_match(&file.display);
                if excluded {
                    debug!("Excluding generated file {}", file.display);
                }
                !excluded
            })
            .collect()
    }

    /// Pair the selection with an audit of every other source under the root.
    pub fn source_set(&self, files: Vec<SourceFile>) -> Result<SourceSet> {
        let listed = SourceWalker::new(self.root.to_path_buf())
            .with_extensions(self.scan.extensions.clone())
            .with_ignore_patterns(self.scan.audit_ignore.clone())
            .walk()?;

        let included: Vec<String> = files.iter().map(|f| f.display.clone()).collect();
        let excluded = listed
            .into_iter()
            .filter(|path| !included.contains(path))
            .collect();

        Ok(SourceSet {
            root: self.root.to_path_buf(),
            files,
            audit: Audit { included, excluded },
        })
    }
}

/// Resolve the sources for a workspace file, relative to `root`.
pub fn workspace_sources(workspace: &Workspace, root: &Path, scan: &ScanConfig) -> Result<SourceSet> {
    let selector = SourceSelector::new(root, scan)?;
    let files = selector.select(&workspace.dir(), &workspace.entries);
    debug!(
        "Workspace {} lists {} entries, {} selected",
        workspace.path.display(),
        workspace.entries.len(),
        files.len()
    );
    selector.source_set(files)
}

fn first_element<'x>(xml: &'x str, tag: &str) -> Option<&'x str> {
    let pattern = format!(r"(?s)<{tag}\b[^>]*>(.*?)</{tag}>");
    let re = Regex::new(&pattern).ok()?;
    re.captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| &xml[m.range()])
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
}

/// Fold `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn display_path(root: &Path, path: &Path) -> String {
    let root = normalize(root);
    let shown = path.strip_prefix(&root).unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}
