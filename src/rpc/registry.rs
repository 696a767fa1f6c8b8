use std::collections::HashSet;

/// Function names claimed so far in one generation run.
///
/// Names are compared case-insensitively. The first claim of a name wins and
/// every later claim is refused, whatever file it comes from.
#[derive(Debug, Default, Clone)]
pub struct SymbolRegistry {
    names: HashSet<String>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name`. Returns `false` if it was already claimed.
    pub fn claim(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }
}
