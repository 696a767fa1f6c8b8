pub mod generate;
pub mod init;
pub mod list;

use crate::cli::SourceArgs;
use crate::config::{load_config, RpcConfig};
use crate::observability::{set_phase, GenerationPhase};
use crate::workspace::{find_workspace, workspace_sources, SourceSelector, SourceSet, Workspace};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration and resolve the ordered source list, either from
/// explicit `--file` arguments or from the workspace.
pub fn resolve_sources(args: &SourceArgs, cwd: &Path) -> Result<(RpcConfig, SourceSet)> {
    let _phase = set_phase(GenerationPhase::Discovery);
    let explicit_root = args.root.as_ref().map(|root| cwd.join(root));

    if !args.files.is_empty() {
        let root = explicit_root.unwrap_or_else(|| cwd.to_path_buf());
        let config = load_config(&root)?;
        let selector = SourceSelector::new(&root, &config.scan)?;
        let entries = args.files.iter().map(|f| f.to_string_lossy().into_owned());
        let files = selector.select(cwd, entries);
        let set = selector.source_set(files)?;
        return Ok((config, set));
    }

    let workspace_path = match &args.workspace {
        Some(path) => cwd.join(path),
        None => find_workspace(explicit_root.as_deref().unwrap_or(cwd))?,
    };
    let workspace = Workspace::load(&workspace_path)
        .with_context(|| format!("Failed to load workspace {}", workspace_path.display()))?;
    let root = explicit_root.unwrap_or_else(|| workspace.dir());
    let config = load_config(&root)?;
    let set = workspace_sources(&workspace, &root, &config.scan)?;
    Ok((config, set))
}

/// Output path from the command line, or the configured one under the root.
pub(crate) fn output_path(explicit: Option<PathBuf>, cwd: &Path, root: &Path, configured: &Path) -> PathBuf {
    match explicit {
        Some(path) => cwd.join(path),
        None => root.join(configured),
    }
}

/// Path as printed in console progress: relative to the working directory
/// when possible.
pub(crate) fn canonical_display(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
