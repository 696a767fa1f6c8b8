//! Type kinds the dispatcher can marshal.
//!
//! The validator and the back end both consult [`TYPE_TABLE`]; adding a kind
//! here is all that is needed for signatures using it to become dispatchable.

/// Semantic kind of a NetLinx scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
}

/// How one supported kind is validated and rendered.
#[derive(Debug, Clone, Copy)]
pub struct TypeSupport {
    pub kind: TypeKind,
    /// Source keyword, matched case-insensitively.
    pub keyword: &'static str,
    /// Accessor that pulls argument `index` out of the incoming message.
    pub accessor: &'static str,
    /// Declaration type for the local receiving a return value.
    pub declaration: &'static str,
    /// Expression that renders the return value as a string for logging.
    pub to_string: &'static str,
}

impl TypeSupport {
    pub fn argument(&self, index: usize, message: &str) -> String {
        format!("{}({index}, {message})", self.accessor)
    }

    pub fn declare(&self, variable: &str) -> String {
        format!("{} {variable};", self.declaration)
    }

    pub fn stringify(&self, variable: &str) -> String {
        format!("{}({variable})", self.to_string)
    }
}

pub const TYPE_TABLE: &[TypeSupport] = &[TypeSupport {
    kind: TypeKind::Integer,
    keyword: "integer",
    accessor: "rpc_get_arg_i",
    declaration: "integer",
    to_string: "itoa",
}];

/// Look up support for a type as written in source.
pub fn lookup(ty: &str) -> Option<&'static TypeSupport> {
    TYPE_TABLE
        .iter()
        .find(|support| support.keyword.eq_ignore_ascii_case(ty))
}
