//! Pipeline configuration types.
//!
//! [`BundleConfig`] describes the single bundler invocation, [`MinifyOptions`]
//! the fixed option set of the second minification pass. Minify options are
//! never derived from the artifacts; they come from a named [`MinifyPreset`]
//! with optional field overrides.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::mangle::PropertyManglePolicy;
use crate::{Error, Result};

/// Property names that must survive mangling in every preset.
pub const DEFAULT_RESERVED: &[&str] = &[
    "$classData",
    "main",
    "toString",
    "constructor",
    "length",
    "call",
    "apply",
    "NaN",
    "Infinity",
    "undefined",
];

/// Names eligible for property mangling: every root package prefix of the
/// compiled frontend except the ones loaded through dynamic import.
pub const DEFAULT_MANGLE_REGEX: &str = r"^(\$m_|.*__f_|.*__F\d?_|.*__O_|.*Ljava|.*Lcats|.*Ljapgolly|.*Lfs2|.*Lorg|.*Lcom|.*Lio|.*Leu|.*Lclue|.*Llucuma|.*Lreact)";

/// Named minification presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyPreset {
    /// ES2015 output ceiling, quoted property names are mangled too.
    Legacy,
    /// ES2020 output ceiling, quoted property names are preserved.
    #[default]
    Current,
}

impl std::fmt::Display for MinifyPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Language-version ceiling for minified output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcmaVersion {
    Es2015,
    Es2020,
}

impl EcmaVersion {
    pub(crate) fn to_es_target(self) -> oxc_transformer::ESTarget {
        match self {
            Self::Es2015 => oxc_transformer::ESTarget::ES2015,
            Self::Es2020 => oxc_transformer::ESTarget::ES2020,
        }
    }
}

impl std::fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Es2015 => write!(f, "es2015"),
            Self::Es2020 => write!(f, "es2020"),
        }
    }
}

/// Property-mangling rules.
///
/// A name is renamed only when it matches `regex` and is not in `reserved`.
/// Reserved names always win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMangleOptions {
    pub reserved: Vec<String>,
    pub regex: String,
    /// Leave quoted keys and string-literal member accesses alone, and treat
    /// every quoted name as reserved.
    #[serde(default)]
    pub keep_quoted: bool,
}

impl PropertyMangleOptions {
    /// Compile these options into a policy.
    pub fn policy(&self) -> Result<PropertyManglePolicy> {
        PropertyManglePolicy::new(self.reserved.iter().cloned(), &self.regex)
    }
}

impl Default for PropertyMangleOptions {
    fn default() -> Self {
        Self {
            reserved: DEFAULT_RESERVED.iter().map(|s| s.to_string()).collect(),
            regex: DEFAULT_MANGLE_REGEX.to_string(),
            keep_quoted: false,
        }
    }
}

/// Fixed option set for the second minification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifyOptions {
    /// Source maps are not produced: the artifact is overwritten in place.
    pub source_map: bool,
    /// Keep comments in the output.
    pub comments: bool,
    /// Output language-version ceiling.
    pub ecma: EcmaVersion,
    /// Number of compression passes.
    pub compress_passes: u8,
    /// Compress and mangle top-level bindings.
    pub toplevel: bool,
    /// Rename local identifiers.
    pub mangle_identifiers: bool,
    /// Property mangling, disabled when `None`.
    pub properties: Option<PropertyMangleOptions>,
}

impl MinifyOptions {
    /// Build the option set for a preset.
    pub fn preset(preset: MinifyPreset) -> Self {
        let (ecma, keep_quoted) = match preset {
            MinifyPreset::Legacy => (EcmaVersion::Es2015, false),
            MinifyPreset::Current => (EcmaVersion::Es2020, true),
        };

        Self {
            source_map: false,
            comments: false,
            ecma,
            compress_passes: 2,
            toplevel: true,
            mangle_identifiers: true,
            properties: Some(PropertyMangleOptions {
                keep_quoted,
                ..PropertyMangleOptions::default()
            }),
        }
    }

    /// Validate the option set.
    ///
    /// # Errors
    ///
    /// Returns an error if source maps are requested, no compression pass is
    /// configured, or the property regex does not compile.
    pub fn validate(&self) -> Result<()> {
        if self.source_map {
            return Err(Error::InvalidConfig(
                "Source maps are not supported by the in-place minification pass".to_string(),
            ));
        }
        if self.compress_passes == 0 {
            return Err(Error::InvalidConfig(
                "compressPasses must be at least 1".to_string(),
            ));
        }
        if let Some(props) = &self.properties {
            props.policy()?;
        }
        Ok(())
    }
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self::preset(MinifyPreset::default())
    }
}

/// Bundle output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Esm,
    Cjs,
    Iife,
}

impl OutputFormat {
    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            Self::Esm => rolldown::OutputFormat::Esm,
            Self::Cjs => rolldown::OutputFormat::Cjs,
            Self::Iife => rolldown::OutputFormat::Iife,
        }
    }

    /// Whether emitted chunks are ES modules.
    pub fn is_module(self) -> bool {
        matches!(self, Self::Esm)
    }
}

/// Target platform environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Browser,
    Node,
}

impl Platform {
    pub(crate) fn to_rolldown(self) -> rolldown::Platform {
        match self {
            Self::Browser => rolldown::Platform::Browser,
            Self::Node => rolldown::Platform::Node,
        }
    }
}

/// The single bundler invocation.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub entries: Vec<String>,
    pub out_dir: PathBuf,
    pub cwd: Option<PathBuf>,
    pub format: OutputFormat,
    pub platform: Platform,
    /// Remove everything in the output directory before building.
    pub empty_out_dir: bool,
    /// Let the bundler run its own minification before the second pass.
    pub first_pass_minify: bool,
    /// Chunks above this size (KiB) are logged as warnings.
    pub chunk_size_warning_limit_kib: u64,
}

impl BundleConfig {
    pub fn new<I, S>(entries: I, out_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            out_dir: out_dir.into(),
            cwd: None,
            format: OutputFormat::Esm,
            platform: Platform::Browser,
            empty_out_dir: true,
            first_pass_minify: true,
            chunk_size_warning_limit_kib: 20_000,
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Output directory resolved against `cwd` (or the process directory).
    pub fn resolved_out_dir(&self) -> Result<PathBuf> {
        resolve_against(&self.out_dir, self.cwd.as_deref())
    }

    /// Validate the bundle configuration.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidConfig(
                "At least one entry point is required".to_string(),
            ));
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "Output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to do when one artifact fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Record the failure and move on to the next artifact.
    Continue,
}

/// How artifacts are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// One artifact at a time, in order.
    #[default]
    Sequential,
    /// Up to `limit` artifacts in flight; reports are still emitted in order.
    Ordered { limit: usize },
}

impl ConcurrencyMode {
    /// `0` and `1` mean sequential.
    pub fn from_limit(limit: usize) -> Self {
        if limit <= 1 {
            Self::Sequential
        } else {
            Self::Ordered { limit }
        }
    }
}

pub(crate) fn resolve_against(path: &Path, cwd: Option<&Path>) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf().clean());
    }
    let base = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => std::env::current_dir()?,
    };
    Ok(base.join(path).clean())
}
