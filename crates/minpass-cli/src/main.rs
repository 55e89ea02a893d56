//! minpass CLI entry point.
//!
//! Parses arguments, initializes logging and colors, and dispatches to the
//! selected command.

use clap::Parser;
use minpass_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config_path = args.config.as_deref();
    let result = match args.command.unwrap_or_default() {
        cli::Command::Run(run_args) => commands::run_execute(run_args, config_path).await,
        cli::Command::Minify(minify_args) => {
            commands::minify_execute(minify_args, config_path).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}
