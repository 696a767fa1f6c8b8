use super::registry::SymbolRegistry;
use super::validate::{validate, ResolvedSignature, SkipReason, ValidationOutcome};
use crate::core::{FileScan, ParsedSignature};

/// What gets emitted for one signature.
#[derive(Debug, Clone)]
pub enum Fragment {
    Branch(ResolvedSignature),
    Skip { raw_params: String, reason: SkipReason },
}

#[derive(Debug, Clone)]
pub struct DispatchEntry {
    /// Name as written in source.
    pub name: String,
    pub fragment: Fragment,
}

impl DispatchEntry {
    fn from_outcome(signature: &ParsedSignature, outcome: ValidationOutcome) -> Self {
        let fragment = match outcome {
            ValidationOutcome::Valid(resolved) => Fragment::Branch(resolved),
            ValidationOutcome::Invalid(reason) => Fragment::Skip {
                raw_params: signature.raw_params.clone(),
                reason,
            },
        };
        Self {
            name: signature.name.clone(),
            fragment,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.fragment, Fragment::Branch(_))
    }
}

/// Entries originating from one source file, in textual order.
#[derive(Debug, Clone)]
pub struct FileSection {
    /// Path as listed in the audit block.
    pub path: String,
    pub entries: Vec<DispatchEntry>,
}

/// Ordered dispatch table for a whole run, independent of any output syntax.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    pub sections: Vec<FileSection>,
}

impl DispatchTable {
    /// Validate scans in order, threading one registry through all files.
    pub fn build<'a, I>(scans: I) -> Self
    where
        I: IntoIterator<Item = (String, &'a FileScan)>,
    {
        let mut registry = SymbolRegistry::new();
        let sections = scans
            .into_iter()
            .map(|(path, scan)| FileSection {
                path,
                entries: scan
                    .signatures
                    .iter()
                    .map(|sig| DispatchEntry::from_outcome(sig, validate(sig, &mut registry)))
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    pub fn branch_count(&self) -> usize {
        self.entries().filter(|e| e.is_branch()).count()
    }

    pub fn skip_count(&self) -> usize {
        self.entries().filter(|e| !e.is_branch()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_signatures;
    use indoc::indoc;
    use std::path::Path;

    #[test]
    fn test_duplicate_across_files_keeps_first() {
        let first = extract_signatures(
            Path::new("a.axi"),
            "define_function set_level(integer v) {}",
        );
        let second = extract_signatures(
            Path::new("b.axi"),
            "define_function set_level(integer v) { }",
        );
        let table = DispatchTable::build([
            ("a.axi".to_string(), &first),
            ("b.axi".to_string(), &second),
        ]);

        assert!(table.sections[0].entries[0].is_branch());
        assert!(matches!(
            table.sections[1].entries[0].fragment,
            Fragment::Skip {
                reason: SkipReason::DuplicateName,
                ..
            }
        ));
        assert_eq!(table.branch_count(), 1);
        assert_eq!(table.skip_count(), 1);
    }

    #[test]
    fn test_entries_keep_file_then_source_order() {
        let scan = extract_signatures(
            Path::new("a.axi"),
            indoc! {"
                define_function Power_On() {}
                define_function char name() {}
                define_function power_off() {}
            "},
        );
        let table = DispatchTable::build([("a.axi".to_string(), &scan)]);
        let entries: Vec<(&str, bool)> = table
            .entries()
            .map(|e| (e.name.as_str(), e.is_branch()))
            .collect();
        assert_eq!(
            entries,
            vec![("Power_On", true), ("name", false), ("power_off", true)]
        );
    }
}
