//! Helpers shared by the commands.

use std::path::Path;
use std::time::Duration;

use minpass_pipeline::{DriverSummary, Pipeline, is_script_artifact, load_name_cache};
use walkdir::WalkDir;

use crate::config::{CliOverrides, MinpassConfig};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Load and validate the layered configuration.
pub(crate) fn load_config(
    overrides: &CliOverrides,
    config_path: Option<&Path>,
) -> Result<MinpassConfig> {
    let config = MinpassConfig::load(overrides, config_path)?;
    config.validate()?;
    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Rolldown build, oxc second pass and brotli estimates for `config`.
pub(crate) fn build_pipeline(config: &MinpassConfig, root: &Path) -> Result<Pipeline> {
    let bundle = config.bundle_config(root);
    let options = config.minify_options();
    tracing::debug!(
        preset = %config.preset,
        ecma = %options.ecma,
        failure_policy = ?config.failure_policy,
        concurrency = config.concurrency,
        "Configured minification pass"
    );

    let pipeline = match config.name_cache_path(root) {
        Some(path) => {
            let cache = load_name_cache(&path)?;
            Pipeline::with_name_cache(bundle, options, cache.clone())?
                .persist_name_cache(cache, path)
        }
        None => Pipeline::with_defaults(bundle, options)?,
    };

    Ok(pipeline
        .with_failure_policy(config.failure_policy)
        .with_concurrency(config.concurrency_mode()))
}

/// Every `.js` file below `out_dir`, as `/`-separated relative paths in
/// sorted order.
pub fn list_scripts(out_dir: &Path) -> Result<Vec<String>> {
    std::fs::metadata(out_dir).with_path(out_dir)?;

    let mut scripts = Vec::new();
    for entry in WalkDir::new(out_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(out_dir) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if is_script_artifact(&name) {
            scripts.push(name);
        }
    }

    scripts.sort();
    Ok(scripts)
}

/// Print the summary and turn skipped artifacts into a failing exit.
pub(crate) fn finish(summary: &DriverSummary, elapsed: Duration) -> Result<()> {
    ui::print_run_summary(summary, elapsed);

    if summary.is_success() {
        ui::success(&format!(
            "Minified {} artifacts in {}",
            summary.processed(),
            ui::format_duration(elapsed)
        ));
        Ok(())
    } else {
        let failed = summary.failures.len();
        Err(CliError::ArtifactsFailed {
            failed,
            total: failed + summary.processed(),
        })
    }
}
