//! minpass CLI - production build followed by a second minification pass.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`config`] - Layered configuration: defaults, `minpass.config.json`,
//!   `MINPASS_*` environment variables, CLI flags
//! - [`commands`] - `run` (build + minify) and `minify` (second pass only)
//! - [`error`] - CLI error types with actionable hints
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Status messages and the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use minpass_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
