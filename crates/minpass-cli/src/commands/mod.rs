//! Command implementations for the minpass CLI.
//!
//! - [`run`] - Production build, then the second minification pass
//! - [`minify`] - Second pass only, over an existing output directory

pub mod minify;
pub mod run;
pub(crate) mod utils;

pub use minify::execute as minify_execute;
pub use run::execute as run_execute;
pub use utils::list_scripts;
