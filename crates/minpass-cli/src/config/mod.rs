//! Configuration for minpass with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod tests;
mod validation;

use minpass_pipeline::{FailurePolicy, MinifyPreset, OutputFormat, Platform};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, CliOverrides};

/// minpass configuration - loaded from minpass.config.json, env and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MinpassConfig {
    /// Entry points to bundle (e.g., ["src/main.js"])
    #[serde(default = "default_entry")]
    pub entry: Vec<String>,

    /// Output directory, relative to `cwd`
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Bundle format (esm, cjs, iife)
    #[serde(default)]
    pub format: OutputFormat,

    /// Target platform
    #[serde(default)]
    pub platform: Platform,

    /// Empty the output directory before building
    #[serde(default = "default_true")]
    pub empty_out_dir: bool,

    /// Let the bundler minify before the second pass
    #[serde(default = "default_true")]
    pub first_pass_minify: bool,

    /// Chunks larger than this many KiB are logged as warnings
    #[serde(default = "default_chunk_size_warning_limit")]
    pub chunk_size_warning_limit: u64,

    /// Minify preset (legacy, current)
    #[serde(default)]
    pub preset: MinifyPreset,

    /// Replaces the preset's reserved property names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<Vec<String>>,

    /// Replaces the preset's property inclusion pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mangle_regex: Option<String>,

    /// Overrides the preset's quoted-name handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_quoted: Option<bool>,

    /// Load and save the property name cache in this JSON file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_cache_file: Option<PathBuf>,

    /// What to do when one artifact fails (abort, continue)
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Artifacts minified at once; 1 is sequential
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}
