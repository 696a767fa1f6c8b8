use super::assemble::assemble;
use super::backend::{Audit, DispatchBackend};
use super::table::DispatchTable;
use crate::core::{Diagnostic, FileScan, Result};
use crate::io::read_latin1;
use crate::observability::{set_current_file, set_phase, set_progress, GenerationPhase};
use crate::parser::extract_signatures;
use crate::workspace::SourceFile;
use tracing::{debug, info};

/// The generated dispatcher, held in memory until it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub contents: String,
    pub branches: usize,
    pub skipped: usize,
}

/// One generation run over an ordered list of files.
///
/// Every file is read and parsed before anything is rendered, so a missing or
/// unreadable file aborts the run without producing output.
#[derive(Debug, Default)]
pub struct GenerationSession {
    scans: Vec<(String, FileScan)>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and scan every file in order, stopping at the first I/O failure.
    pub fn scan_all(files: &[SourceFile]) -> Result<Self> {
        let _phase = set_phase(GenerationPhase::Scanning);
        let mut session = Self::new();
        for (i, file) in files.iter().enumerate() {
            set_progress(i, files.len());
            session.scan_file(file)?;
        }
        set_progress(files.len(), files.len());
        Ok(session)
    }

    pub fn scan_file(&mut self, file: &SourceFile) -> Result<()> {
        let _file = set_current_file(&file.path);
        let source = read_latin1(&file.path)?;
        let scan = extract_signatures(&file.path, &source);
        debug!(
            file = %file.display,
            functions = scan.signatures.len(),
            diagnostics = scan.diagnostics.len(),
            "Scanned source file"
        );
        self.add_scan(file.display.clone(), scan);
        Ok(())
    }

    pub fn add_scan(&mut self, display: String, scan: FileScan) {
        self.scans.push((display, scan));
    }

    pub fn scans(&self) -> &[(String, FileScan)] {
        &self.scans
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.scans.iter().flat_map(|(_, scan)| scan.diagnostics.iter())
    }

    pub fn dispatch_table(&self) -> DispatchTable {
        DispatchTable::build(
            self.scans
                .iter()
                .map(|(display, scan)| (display.clone(), scan)),
        )
    }

    pub fn render(&self, audit: &Audit, backend: &dyn DispatchBackend) -> GeneratedModule {
        let _phase = set_phase(GenerationPhase::Emission);
        let table = self.dispatch_table();
        let module = GeneratedModule {
            contents: assemble(&table, audit, backend),
            branches: table.branch_count(),
            skipped: table.skip_count(),
        };
        info!(
            files = self.scans.len(),
            branches = module.branches,
            skipped = module.skipped,
            "Rendered RPC dispatcher"
        );
        module
    }
}
