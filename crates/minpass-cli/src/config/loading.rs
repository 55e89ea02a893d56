use crate::cli::{PassArgs, RunArgs};
use crate::config::MinpassConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "minpass.config.json";

const ENV_PREFIX: &str = "MINPASS_";

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_out_dir: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<minpass_pipeline::MinifyPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<minpass_pipeline::FailurePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_cache_file: Option<PathBuf>,
}

impl CliOverrides {
    pub fn from_pass(args: &PassArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            cwd: args.cwd.clone(),
            preset: args.preset.map(Into::into),
            failure_policy: args.failure_policy.map(Into::into),
            concurrency: args.concurrency,
            name_cache_file: args.name_cache.clone(),
            ..Self::default()
        }
    }

    pub fn from_run(args: &RunArgs) -> Self {
        Self {
            entry: args.entry.clone(),
            empty_out_dir: args.keep_out_dir.then_some(false),
            ..Self::from_pass(&args.pass)
        }
    }
}

impl MinpassConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let root = overrides.cwd.clone().unwrap_or_default();
                let default_path = root.join(CONFIG_FILE_NAME);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Json::file(path));
        }

        // MINPASS_OUT_DIR -> outDir, MINPASS_NAME_CACHE_FILE -> nameCacheFile, ...
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides.clone()));

        figment.extract().map_err(|e| {
            ConfigError::Invalid {
                message: e.to_string(),
                hint: format!(
                    "Check {} syntax, field names and value types",
                    CONFIG_FILE_NAME
                ),
            }
            .into()
        })
    }
}

/// `OUT_DIR` -> `outDir`.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}
