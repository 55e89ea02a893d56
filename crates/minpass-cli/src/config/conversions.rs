use std::path::{Path, PathBuf};

use minpass_pipeline::{BundleConfig, ConcurrencyMode, MinifyOptions};

use crate::config::MinpassConfig;

impl MinpassConfig {
    /// Directory every relative path is resolved against.
    pub fn project_root(&self) -> std::io::Result<PathBuf> {
        let current = std::env::current_dir()?;
        Ok(match &self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => current.join(cwd),
            None => current,
        })
    }

    pub fn bundle_config(&self, root: &Path) -> BundleConfig {
        BundleConfig {
            format: self.format,
            platform: self.platform,
            empty_out_dir: self.empty_out_dir,
            first_pass_minify: self.first_pass_minify,
            chunk_size_warning_limit_kib: self.chunk_size_warning_limit,
            ..BundleConfig::new(self.entry.iter().cloned(), &self.out_dir).cwd(root)
        }
    }

    /// The preset's options with this config's property overrides applied.
    pub fn minify_options(&self) -> MinifyOptions {
        let mut options = MinifyOptions::preset(self.preset);
        let mut properties = options.properties.take().unwrap_or_default();

        if let Some(reserved) = &self.reserved {
            properties.reserved = reserved.clone();
        }
        if let Some(regex) = &self.mangle_regex {
            properties.regex = regex.clone();
        }
        if let Some(keep_quoted) = self.keep_quoted {
            properties.keep_quoted = keep_quoted;
        }

        options.properties = Some(properties);
        options
    }

    pub fn concurrency_mode(&self) -> ConcurrencyMode {
        ConcurrencyMode::from_limit(self.concurrency)
    }

    pub fn name_cache_path(&self, root: &Path) -> Option<PathBuf> {
        self.name_cache_file.as_ref().map(|path| root.join(path))
    }
}
