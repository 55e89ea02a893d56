//! `minpass run`: production build, then the second minification pass.

use std::path::Path;
use std::time::Instant;

use minpass_pipeline::StdoutSink;

use crate::cli::RunArgs;
use crate::commands::utils;
use crate::config::CliOverrides;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the run command.
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Build once with the bundler; stop here if the build fails
/// 3. Minify each emitted `.js` artifact in emission order, printing one
///    progress line per artifact to stdout
/// 4. Print the summary to stderr
pub async fn execute(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let start_time = Instant::now();

    let config = utils::load_config(&CliOverrides::from_run(&args), config_path)?;
    let root = config
        .project_root()
        .context("Failed to resolve project root")?;

    if config.entry.len() == 1 {
        ui::info(&format!("Building: {}", config.entry[0]));
    } else {
        ui::info(&format!("Building {} entries...", config.entry.len()));
    }
    ui::info(&format!(
        "Preset: {} / output: {}",
        config.preset,
        config.out_dir.display()
    ));

    let pipeline = utils::build_pipeline(&config, &root)?;
    let summary = pipeline.run(&mut StdoutSink).await?;

    utils::finish(&summary, start_time.elapsed())
}
