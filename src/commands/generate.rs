use super::{canonical_display, output_path, resolve_sources};
use crate::cli::SourceArgs;
use crate::io::write_latin1;
use crate::observability::{set_phase, GenerationPhase};
use crate::rpc::{GenerationSession, NetLinxBackend};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn generate_dispatcher(sources: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    println!("Generating RPC dispatch code...");
    println!("-------------------------------");

    let (config, set) = resolve_sources(sources, &cwd)?;
    let session = GenerationSession::scan_all(&set.files)?;
    let unreadable = session.diagnostics().count();
    if unreadable > 0 {
        warn!("{unreadable} definition(s) could not be read and are missing from the dispatcher");
    }
    let module = session.render(&set.audit, &NetLinxBackend::new(&config.dispatch));

    let path = output_path(output, &cwd, &set.root, &config.output.path);
    {
        let _phase = set_phase(GenerationPhase::Writing);
        write_latin1(&path, &module.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    info!(
        path = %path.display(),
        branches = module.branches,
        skipped = module.skipped,
        "Wrote RPC dispatcher"
    );

    println!("   {}", canonical_display(&path, &cwd));
    println!("\nDone.");
    Ok(())
}
