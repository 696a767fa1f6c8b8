//! Decides which signatures can be turned into dispatch branches.

use super::registry::SymbolRegistry;
use super::types::{lookup, TypeSupport};
use crate::core::{ArrayWidth, ParsedParameter, ParsedSignature};
use crate::parser::{parse_params, ParamError};

/// Why a signature produced a skip annotation instead of a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// An earlier definition already claimed the name.
    DuplicateName,
    UnsupportedReturnType { ty: String },
    UnsupportedParameterType { ty: String, name: String },
    MalformedParameters(ParamError),
}

impl SkipReason {
    /// Human-readable explanation, used as a comment in generated code.
    pub fn describe(&self) -> String {
        match self {
            Self::DuplicateName => "Already defined.".to_string(),
            Self::UnsupportedReturnType { ty } => format!("Unsupported return type '{ty}'."),
            Self::UnsupportedParameterType { ty, name } => {
                format!("Unsupported parameter type '{ty}' ({name}).")
            }
            Self::MalformedParameters(err) => format!("Malformed parameter list: {err}."),
        }
    }
}

/// A parameter paired with the type support used to marshal it.
#[derive(Debug, Clone)]
pub struct ResolvedParameter {
    pub parameter: ParsedParameter,
    pub support: &'static TypeSupport,
}

/// A signature every part of which the dispatcher can express.
#[derive(Debug, Clone)]
pub struct ResolvedSignature {
    pub name: String,
    pub returns: Option<&'static TypeSupport>,
    pub parameters: Vec<ResolvedParameter>,
}

#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Valid(ResolvedSignature),
    Invalid(SkipReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Validate one signature against the registry and the type table.
///
/// A name that is not yet taken is claimed before types are checked, so a
/// signature rejected for its types still blocks later definitions of the
/// same name.
pub fn validate(signature: &ParsedSignature, registry: &mut SymbolRegistry) -> ValidationOutcome {
    if !registry.claim(&signature.normalized_name()) {
        return ValidationOutcome::Invalid(SkipReason::DuplicateName);
    }

    match resolve(signature) {
        Ok(resolved) => ValidationOutcome::Valid(resolved),
        Err(reason) => ValidationOutcome::Invalid(reason),
    }
}

fn resolve(signature: &ParsedSignature) -> Result<ResolvedSignature, SkipReason> {
    let returns = match &signature.return_type {
        None => None,
        Some(ty) => {
            let support = lookup(ty)
                .filter(|_| signature.return_width.is_none())
                .ok_or_else(|| SkipReason::UnsupportedReturnType {
                    ty: render_type(ty, signature.return_width.as_ref()),
                })?;
            Some(support)
        }
    };

    let parameters = parse_params(&signature.raw_params)
        .map_err(SkipReason::MalformedParameters)?
        .into_iter()
        .map(resolve_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResolvedSignature {
        name: signature.name.clone(),
        returns,
        parameters,
    })
}

/// Arrays are never marshaled: the accessors only produce scalars.
fn resolve_parameter(parameter: ParsedParameter) -> Result<ResolvedParameter, SkipReason> {
    match lookup(&parameter.ty).filter(|_| !parameter.is_array()) {
        Some(support) => Ok(ResolvedParameter { parameter, support }),
        None => Err(SkipReason::UnsupportedParameterType {
            ty: render_type(&parameter.ty, parameter.width.as_ref()),
            name: parameter.name,
        }),
    }
}

fn render_type(ty: &str, width: Option<&ArrayWidth>) -> String {
    match width {
        Some(width) => format!("{ty}{width}"),
        None => ty.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_signatures;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn signature(source: &str) -> ParsedSignature {
        extract_signatures(Path::new("t.axi"), source)
            .signatures
            .remove(0)
    }

    fn reason(outcome: ValidationOutcome) -> SkipReason {
        match outcome {
            ValidationOutcome::Invalid(reason) => reason,
            ValidationOutcome::Valid(resolved) => panic!("{} unexpectedly valid", resolved.name),
        }
    }

    #[test]
    fn test_integer_signature_is_valid() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function integer add(integer a, integer b) { return a + b }");
        match validate(&sig, &mut registry) {
            ValidationOutcome::Valid(resolved) => {
                assert_eq!(resolved.name, "add");
                assert!(resolved.returns.is_some());
                let names: Vec<_> = resolved
                    .parameters
                    .iter()
                    .map(|p| p.parameter.name.as_str())
                    .collect();
                assert_eq!(names, vec!["a", "b"]);
            }
            ValidationOutcome::Invalid(reason) => panic!("unexpected skip: {reason:?}"),
        }
    }

    #[test]
    fn test_void_without_parameters_is_valid() {
        let mut registry = SymbolRegistry::new();
        assert!(validate(&signature("define_function ping() {}"), &mut registry).is_valid());
    }

    #[test]
    fn test_unsupported_return_type() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("DEFINE_FUNCTION CHAR get_label(INTEGER idx) { return 'a' }");
        assert_eq!(
            reason(validate(&sig, &mut registry)),
            SkipReason::UnsupportedReturnType {
                ty: "CHAR".to_string()
            }
        );
    }

    #[test]
    fn test_array_return_is_unsupported() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function integer[4] levels() {}");
        assert_eq!(
            reason(validate(&sig, &mut registry)).describe(),
            "Unsupported return type 'integer[4]'."
        );
    }

    #[test]
    fn test_unsized_array_return_is_unsupported() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function integer[] levels() { return lvls }");
        assert_eq!(
            reason(validate(&sig, &mut registry)),
            SkipReason::UnsupportedReturnType {
                ty: "integer[]".to_string()
            }
        );
    }

    #[test]
    fn test_constant_width_return_is_unsupported() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function char[MAX_LEN] get_name() { return name }");
        assert_eq!(
            reason(validate(&sig, &mut registry)).describe(),
            "Unsupported return type 'char[MAX_LEN]'."
        );
    }

    #[test]
    fn test_constant_width_parameter_is_unsupported() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function set_name(char name[MAX_LEN]) {}");
        assert_eq!(
            reason(validate(&sig, &mut registry)).describe(),
            "Unsupported parameter type 'char[MAX_LEN]' (name)."
        );
    }

    #[test]
    fn test_one_bad_parameter_rejects_whole_signature() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function route(integer input, char label[16], integer output) {}");
        assert_eq!(
            reason(validate(&sig, &mut registry)),
            SkipReason::UnsupportedParameterType {
                ty: "char[16]".to_string(),
                name: "label".to_string()
            }
        );
    }

    #[test]
    fn test_integer_array_parameter_is_unsupported() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function set_all(integer levels[]) {}");
        assert_eq!(
            reason(validate(&sig, &mut registry)).describe(),
            "Unsupported parameter type 'integer[]' (levels)."
        );
    }

    #[test]
    fn test_malformed_parameters() {
        let mut registry = SymbolRegistry::new();
        let sig = signature("define_function f(integer) {}");
        assert!(matches!(
            reason(validate(&sig, &mut registry)),
            SkipReason::MalformedParameters(_)
        ));
    }

    #[test]
    fn test_duplicate_names_differing_in_case() {
        let mut registry = SymbolRegistry::new();
        let first = signature("define_function Set_Level(integer v) {}");
        let second = signature("define_function SET_LEVEL(integer v) {}");
        assert!(validate(&first, &mut registry).is_valid());
        assert_eq!(reason(validate(&second, &mut registry)), SkipReason::DuplicateName);
    }

    #[test]
    fn test_invalid_signature_still_claims_its_name() {
        let mut registry = SymbolRegistry::new();
        let invalid = signature("define_function char lookup(integer i) {}");
        let later = signature("define_function integer lookup(integer i) { return i }");
        assert!(!validate(&invalid, &mut registry).is_valid());
        assert_eq!(reason(validate(&later, &mut registry)), SkipReason::DuplicateName);
    }
}
