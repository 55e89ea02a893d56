//! `minpass minify`: the second pass alone, over an existing build.

use std::path::Path;
use std::time::Instant;

use minpass_pipeline::StdoutSink;

use crate::cli::MinifyArgs;
use crate::commands::utils;
use crate::config::CliOverrides;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the minify command.
///
/// The `.js` files below the output directory are processed in path order.
/// No build runs, so the output directory is never emptied.
pub async fn execute(args: MinifyArgs, config_path: Option<&Path>) -> Result<()> {
    let start_time = Instant::now();

    let config = utils::load_config(&CliOverrides::from_pass(&args.pass), config_path)?;
    let root = config
        .project_root()
        .context("Failed to resolve project root")?;
    let out_dir = config.bundle_config(&root).resolved_out_dir()?;

    let scripts = utils::list_scripts(&out_dir)?;
    if scripts.is_empty() {
        ui::warning(&format!("No .js files found in {}", out_dir.display()));
    } else {
        ui::info(&format!(
            "Minifying {} files in {}",
            scripts.len(),
            out_dir.display()
        ));
    }

    let pipeline = utils::build_pipeline(&config, &root)?;
    let summary = pipeline.minify(&scripts, &mut StdoutSink).await?;

    utils::finish(&summary, start_time.elapsed())
}
