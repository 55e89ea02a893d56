use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_concurrency;

/// Available minpass subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build, then minify every emitted .js artifact
    ///
    /// Runs the bundler once in production mode. When the build succeeds,
    /// each emitted script is read, minified, overwritten and reported with
    /// raw and brotli sizes.
    Run(RunArgs),

    /// Minify the .js files already present in the output directory
    ///
    /// Skips the build. Files are processed in path order.
    Minify(MinifyArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(RunArgs::default())
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Entry points to bundle (overrides the config file)
    ///
    /// Examples:
    ///   minpass run src/main.js
    ///   minpass run src/main.js src/worker.js
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Do not empty the output directory before building
    #[arg(long)]
    pub keep_out_dir: bool,

    #[command(flatten)]
    pub pass: PassArgs,
}

/// Arguments for the minify command
#[derive(Args, Debug, Default)]
pub struct MinifyArgs {
    #[command(flatten)]
    pub pass: PassArgs,
}

/// Options shared by both commands
#[derive(Args, Debug, Default)]
pub struct PassArgs {
    /// Minify preset
    ///
    /// - legacy: ES2015 output, quoted property names are mangled too
    /// - current: ES2020 output, quoted property names are preserved
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Artifacts minified at once (1 = sequential)
    ///
    /// Progress lines are printed in artifact order regardless of this value.
    #[arg(short = 'j', long, value_parser = parse_concurrency, value_name = "N")]
    pub concurrency: Option<usize>,

    /// What to do when one artifact fails to minify
    #[arg(long, value_enum, value_name = "POLICY")]
    pub failure_policy: Option<FailurePolicyArg>,

    /// Output directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Project root (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Load and save the property name cache in this JSON file
    #[arg(long, value_name = "FILE")]
    pub name_cache: Option<PathBuf>,
}
