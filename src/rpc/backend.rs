//! Rendering of a [`DispatchTable`](super::table::DispatchTable) into target source.

use super::types::TypeSupport;
use super::validate::{ResolvedSignature, SkipReason};
use crate::config::DispatchConfig;

/// Included and excluded source paths listed at the top of the generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    pub included: Vec<String>,
    pub excluded: Vec<String>,
}

/// Syntax of one output language for the generated dispatcher.
///
/// The assembler calls these in file order; implementations append to `out`.
pub trait DispatchBackend {
    fn header(&self, audit: &Audit, out: &mut String);
    fn file_banner(&self, path: &str, out: &mut String);
    fn branch(&self, signature: &ResolvedSignature, out: &mut String);
    fn skip(&self, name: &str, raw_params: &str, reason: &SkipReason, out: &mut String);
    fn footer(&self, out: &mut String);
}

const INDENT: &str = "        ";
const BODY_INDENT: &str = "            ";
const ARG_INDENT: &str = "                ";
const RETURN_VALUE: &str = "return_value";
const FUNCTION_NAME: &str = "f_name";
const MESSAGE: &str = "data.text";

/// Emits a NetLinx `data_event` handler with a `compare_string` chain.
#[derive(Debug, Clone)]
pub struct NetLinxBackend {
    device: String,
    guard: String,
    log_level: String,
}

impl NetLinxBackend {
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            device: config.device.clone(),
            guard: config.guard.clone(),
            log_level: config.log_level.clone(),
        }
    }

    fn call(&self, signature: &ResolvedSignature, out: &mut String) {
        out.push_str(BODY_INDENT);
        if signature.returns.is_some() {
            out.push_str(RETURN_VALUE);
            out.push_str(" = ");
        }
        out.push_str(&signature.name);
        out.push('(');

        if signature.parameters.is_empty() {
            out.push_str(");\n");
            return;
        }

        let args: Vec<String> = signature
            .parameters
            .iter()
            .enumerate()
            .map(|(i, p)| format!("\n{ARG_INDENT}{}", p.support.argument(i + 1, MESSAGE)))
            .collect();
        out.push_str(&args.join(","));
        out.push_str(&format!("\n{BODY_INDENT});\n"));
    }

    fn log_return(&self, support: &TypeSupport, out: &mut String) {
        out.push_str(&format!(
            "{BODY_INDENT}print({}, \"'RPC RTN: ', {}\");\n",
            self.log_level,
            support.stringify(RETURN_VALUE)
        ));
    }
}

impl Default for NetLinxBackend {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl DispatchBackend for NetLinxBackend {
    fn header(&self, audit: &Audit, out: &mut String) {
        let included: String = audit.included.iter().map(|p| format!("{p}\n")).collect();
        let excluded: String = audit.excluded.iter().map(|p| format!("{p}\n")).collect();

        out.push_str("(***********************************************************)\n");
        out.push_str("(*                         WARNING                         *)\n");
        out.push_str("(***********************************************************)\n");
        out.push_str("(*  This file is automatically generated.                  *)\n");
        out.push_str("(***********************************************************)\n");
        out.push('\n');
        out.push_str("/*\n");
        out.push_str("Included Files:\n");
        out.push_str("---------------\n");
        out.push_str(&included);
        out.push_str("\n\n");
        out.push_str("Excluded Files:\n");
        out.push_str("---------------\n");
        out.push_str(&excluded);
        out.push('\n');
        out.push_str("*/\n");
        out.push_str("\n\n");
        out.push_str(&format!("#if_not_defined {}\n", self.guard));
        out.push_str(&format!("#define {} 1\n", self.guard));
        out.push('\n');
        out.push_str("DEFINE_EVENT\n");
        out.push('\n');
        out.push_str(&format!("data_event[{}]\n", self.device));
        out.push_str("{\n");
        out.push_str("    string:\n");
        out.push_str("    {\n");
        out.push_str(&format!("{INDENT}char {FUNCTION_NAME}[255];\n"));
        out.push_str(&format!(
            "{INDENT}{FUNCTION_NAME} = rpc_function_name({MESSAGE});\n"
        ));
        out.push_str(&format!("{INDENT}\n"));
    }

    fn file_banner(&self, path: &str, out: &mut String) {
        out.push_str(&format!(
            "{INDENT}/*------------------------------------------------------------------/\n"
        ));
        out.push_str(&format!("{INDENT}    FILE: '{path}'\n"));
        out.push_str(&format!(
            "{INDENT}/------------------------------------------------------------------*/\n\n"
        ));
    }

    fn branch(&self, signature: &ResolvedSignature, out: &mut String) {
        out.push_str(&format!(
            "{INDENT}if(compare_string({FUNCTION_NAME}, '{}'))\n",
            signature.name.to_lowercase()
        ));
        out.push_str(&format!("{INDENT}{{\n"));

        if let Some(support) = signature.returns {
            out.push_str(&format!("{BODY_INDENT}{}\n", support.declare(RETURN_VALUE)));
            out.push_str(&format!("{BODY_INDENT}\n"));
        }

        out.push_str(&format!(
            "{BODY_INDENT}print({}, 'RPC: {}()');\n",
            self.log_level, signature.name
        ));
        out.push_str(&format!("{BODY_INDENT}\n"));

        self.call(signature, out);

        if let Some(support) = signature.returns {
            out.push_str(&format!("{BODY_INDENT}\n"));
            self.log_return(support, out);
        }

        out.push_str(&format!("{INDENT}}}\n\n"));
    }

    fn skip(&self, name: &str, raw_params: &str, reason: &SkipReason, out: &mut String) {
        let params = raw_params.split_whitespace().collect::<Vec<_>>().join(" ");
        out.push_str(&format!("{INDENT}// {}\n", reason.describe()));
        out.push_str(&format!("{INDENT}// Skipped:\n"));
        out.push_str(&format!("{INDENT}// {name}({params})\n\n"));
    }

    fn footer(&self, out: &mut String) {
        out.push_str("    }\n");
        out.push_str("}\n");
        out.push_str("#end_if\n\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_signatures;
    use crate::rpc::registry::SymbolRegistry;
    use crate::rpc::validate::{validate, ValidationOutcome};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn resolved(source: &str) -> ResolvedSignature {
        let sig = extract_signatures(Path::new("t.axi"), source).signatures.remove(0);
        match validate(&sig, &mut SymbolRegistry::new()) {
            ValidationOutcome::Valid(resolved) => resolved,
            ValidationOutcome::Invalid(reason) => panic!("unexpected skip: {reason:?}"),
        }
    }

    fn render_branch(source: &str) -> String {
        let mut out = String::new();
        NetLinxBackend::default().branch(&resolved(source), &mut out);
        out
    }

    #[test]
    fn test_branch_with_return_and_arguments() {
        let out = render_branch(
            "DEFINE_FUNCTION INTEGER add_numbers (INTEGER a, INTEGER b) { return a + b }",
        );
        let expected = [
            "        if(compare_string(f_name, 'add_numbers'))",
            "        {",
            "            integer return_value;",
            "            ",
            "            print(LOG_LEVEL_INFO, 'RPC: add_numbers()');",
            "            ",
            "            return_value = add_numbers(",
            "                rpc_get_arg_i(1, data.text),",
            "                rpc_get_arg_i(2, data.text)",
            "            );",
            "            ",
            "            print(LOG_LEVEL_INFO, \"'RPC RTN: ', itoa(return_value)\");",
            "        }",
            "",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_void_branch_without_arguments() {
        let out = render_branch("define_function Power_On() {}");
        let expected = [
            "        if(compare_string(f_name, 'power_on'))",
            "        {",
            "            print(LOG_LEVEL_INFO, 'RPC: Power_On()');",
            "            ",
            "            Power_On();",
            "        }",
            "",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_skip_collapses_whitespace() {
        let mut out = String::new();
        NetLinxBackend::default().skip(
            "get_label",
            "INTEGER idx,\n    CHAR s[8]",
            &SkipReason::UnsupportedReturnType {
                ty: "CHAR".to_string(),
            },
            &mut out,
        );
        assert_eq!(
            out,
            "        // Unsupported return type 'CHAR'.\n        // Skipped:\n        // get_label(INTEGER idx, CHAR s[8])\n\n"
        );
    }

    #[test]
    fn test_header_lists_audit_paths() {
        let mut out = String::new();
        let audit = Audit {
            included: vec!["main.axs".into(), "include/lights.axi".into()],
            excluded: vec!["old/unused.axi".into()],
        };
        NetLinxBackend::default().header(&audit, &mut out);
        assert!(out.contains("---------------\nmain.axs\ninclude/lights.axi\n\n\nExcluded Files:"));
        assert!(out.contains("---------------\nold/unused.axi\n\n*/\n\n\n#if_not_defined RPC_FUNCTION_LIST\n"));
        assert!(out.contains("data_event[vdvRPC]\n"));
        assert!(out.ends_with("f_name = rpc_function_name(data.text);\n        \n"));
    }

    #[test]
    fn test_custom_dispatch_settings() {
        let backend = NetLinxBackend::new(&DispatchConfig {
            device: "vdvAPI".to_string(),
            guard: "API_DISPATCH".to_string(),
            log_level: "LOG_LEVEL_DEBUG".to_string(),
        });
        let mut out = String::new();
        backend.header(&Audit::default(), &mut out);
        backend.branch(&resolved("define_function ping() {}"), &mut out);
        assert!(out.contains("#if_not_defined API_DISPATCH\n#define API_DISPATCH 1\n"));
        assert!(out.contains("data_event[vdvAPI]"));
        assert!(out.contains("print(LOG_LEVEL_DEBUG, 'RPC: ping()');"));
    }
}
