use super::backend::{Audit, DispatchBackend};
use super::table::{DispatchTable, Fragment};

/// Render the whole generated module: header and audit block, one banner per
/// source file followed by its fragments in order, then the closing
/// boilerplate.
pub fn assemble(table: &DispatchTable, audit: &Audit, backend: &dyn DispatchBackend) -> String {
    let mut out = String::new();
    backend.header(audit, &mut out);

    for section in &table.sections {
        backend.file_banner(&section.path, &mut out);
        for entry in &section.entries {
            match &entry.fragment {
                Fragment::Branch(resolved) => backend.branch(resolved, &mut out),
                Fragment::Skip { raw_params, reason } => {
                    backend.skip(&entry.name, raw_params, reason, &mut out)
                }
            }
        }
    }

    backend.footer(&mut out);
    out
}
