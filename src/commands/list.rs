use super::{canonical_display, output_path, resolve_sources};
use crate::cli::SourceArgs;
use crate::io::write_latin1;
use crate::listing::render_listing;
use crate::observability::{set_phase, GenerationPhase};
use crate::rpc::GenerationSession;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn list_functions(sources: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    println!("Generating function listing...");
    println!("------------------------------");

    let (config, set) = resolve_sources(sources, &cwd)?;
    let session = GenerationSession::scan_all(&set.files)?;
    let listing = {
        let _phase = set_phase(GenerationPhase::Emission);
        render_listing(
            session
                .scans()
                .iter()
                .map(|(display, scan)| (display.as_str(), scan)),
        )
    };

    let path = output_path(output, &cwd, &set.root, &config.output.listing_path);
    {
        let _phase = set_phase(GenerationPhase::Writing);
        write_latin1(&path, &listing)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("   {}", canonical_display(&path, &cwd));
    println!("\nDone.");
    Ok(())
}
