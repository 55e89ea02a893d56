use std::path::PathBuf;

use crate::config::MinpassConfig;

pub fn default_entry() -> Vec<String> {
    vec!["src/main.js".to_string()]
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_true() -> bool {
    true
}

/// KiB.
pub fn default_chunk_size_warning_limit() -> u64 {
    20_000
}

pub fn default_concurrency() -> usize {
    1
}

impl MinpassConfig {
    /// Get default configuration values.
    pub fn default_config() -> Self {
        Self {
            entry: default_entry(),
            out_dir: default_out_dir(),
            cwd: None,
            format: Default::default(),
            platform: Default::default(),
            empty_out_dir: true,
            first_pass_minify: true,
            chunk_size_warning_limit: default_chunk_size_warning_limit(),
            preset: Default::default(),
            reserved: None,
            mangle_regex: None,
            keep_quoted: None,
            name_cache_file: None,
            failure_policy: Default::default(),
            concurrency: default_concurrency(),
        }
    }
}
