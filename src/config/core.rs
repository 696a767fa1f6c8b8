use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure, read from `.netlinx-rpc.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    /// Where generated files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Which files are scanned and audited
    #[serde(default)]
    pub scan: ScanConfig,

    /// Names used inside the generated dispatcher
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Generated dispatcher, relative to the project root
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Function listing written by `list`
    #[serde(default = "default_listing_path")]
    pub listing_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            listing_path: default_listing_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Source extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Regex for workspace files that must never be scanned
    #[serde(default = "default_exclude")]
    pub exclude: String,

    /// Glob patterns left out of the audit listing
    #[serde(default)]
    pub audit_ignore: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
            audit_ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Virtual device whose string events carry RPC requests
    #[serde(default = "default_device")]
    pub device: String,

    /// Include guard symbol
    #[serde(default = "default_guard")]
    pub guard: String,

    /// Log level constant passed to `print`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            guard: default_guard(),
            log_level: default_log_level(),
        }
    }
}

pub fn default_output_path() -> PathBuf {
    PathBuf::from("include/rpc-functions.axi")
}

pub fn default_listing_path() -> PathBuf {
    PathBuf::from("functions.axi")
}

pub fn default_extensions() -> Vec<String> {
    vec!["axi".to_string(), "axs".to_string()]
}

/// Generated dispatch files: `rpc.axi`, `rpc-*.axi`, `rpc_*.axi`.
pub fn default_exclude() -> String {
    r"(?i)(?:^|/)rpc(?:[-_][^/]*)?\.axi$".to_string()
}

pub fn default_device() -> String {
    "vdvRPC".to_string()
}

pub fn default_guard() -> String {
    "RPC_FUNCTION_LIST".to_string()
}

pub fn default_log_level() -> String {
    "LOG_LEVEL_INFO".to_string()
}
