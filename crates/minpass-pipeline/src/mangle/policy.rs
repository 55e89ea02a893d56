use regex::Regex;
use rustc_hash::FxHashSet;

use crate::{Error, Result};

/// Which property names may be renamed.
#[derive(Debug, Clone)]
pub struct PropertyManglePolicy {
    reserved: FxHashSet<String>,
    include: Regex,
}

impl PropertyManglePolicy {
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(reserved: impl IntoIterator<Item = String>, pattern: &str) -> Result<Self> {
        let include = Regex::new(pattern).map_err(|e| {
            Error::InvalidConfig(format!("Invalid property mangle regex '{}': {}", pattern, e))
        })?;
        Ok(Self {
            reserved: reserved.into_iter().collect(),
            include,
        })
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Reserved names are checked first and always win.
    pub fn should_mangle(&self, name: &str) -> bool {
        !self.is_reserved(name) && self.include.is_match(name)
    }
}
