//! Command-line interface definition for minpass.
//!
//! # Command Structure
//!
//! - `minpass run` - Production build, then the second minification pass
//!   (the default when no subcommand is given)
//! - `minpass minify` - Second pass only, over the scripts already in the
//!   output directory

mod commands;
pub mod enums;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{Command, MinifyArgs, PassArgs, RunArgs};
pub use enums::*;
pub use validation::parse_concurrency;

/// minpass - build once, then minify every emitted script again
#[derive(Parser, Debug)]
#[command(
    name = "minpass",
    version,
    about = "Production build followed by a second, aggressive minification pass",
    long_about = "minpass runs the bundler once in production mode, then re-minifies every\n\
                  emitted .js file in place with property mangling and prints raw and\n\
                  brotli sizes before and after for each file."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and progress lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file (default: ./minpass.config.json if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute (default: run)
    #[command(subcommand)]
    pub command: Option<Command>,
}
