use crate::config::MinpassConfig;
use crate::error::{ConfigError, Result};

impl MinpassConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide at least one entry point".to_string(),
            }
            .into());
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: "\"\"".to_string(),
                hint: "Use a directory such as \"dist\"".to_string(),
            }
            .into());
        }

        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency".to_string(),
                value: "0".to_string(),
                hint: "Use 1 for sequential processing or a larger bound".to_string(),
            }
            .into());
        }

        if let Err(e) = self.minify_options().validate() {
            return Err(ConfigError::InvalidValue {
                field: "mangleRegex".to_string(),
                value: self.mangle_regex.clone().unwrap_or_default(),
                hint: e.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
