mod core;
mod loader;

pub use self::core::{
    default_device, default_exclude, default_extensions, default_guard, default_listing_path,
    default_log_level, default_output_path, DispatchConfig, OutputConfig, RpcConfig, ScanConfig,
};
pub use loader::{
    directory_ancestors, find_config, load_config, parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Contents written by `netlinx-rpc init`. Every value is the built-in default.
pub const DEFAULT_CONFIG: &str = r#"# netlinx-rpc configuration

[output]
# Generated dispatcher, relative to the project root.
path = "include/rpc-functions.axi"
# Function listing written by `netlinx-rpc list`.
listing_path = "functions.axi"

[scan]
extensions = ["axi", "axs"]
# Workspace files matching this regex are never scanned.
exclude = '(?i)(?:^|/)rpc(?:[-_][^/]*)?\.axi$'
# Glob patterns left out of the audit listing.
audit_ignore = []

[dispatch]
device = "vdvRPC"
guard = "RPC_FUNCTION_LIST"
log_level = "LOG_LEVEL_INFO"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_template_matches_defaults() {
        assert_eq!(
            parse_and_validate_config(DEFAULT_CONFIG).unwrap(),
            RpcConfig::default()
        );
    }
}
