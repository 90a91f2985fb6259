use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DocGraftError, Result};
use crate::types::InheritStrategy;

/// Separator inserted between merged docstring fragments when none is
/// configured: a blank-line paragraph break.
pub const DEFAULT_MERGE_SEPARATOR: &str = "\n\n";

/// Configuration for a docstring resolver.
///
/// Immutable per resolver instance; the host constructs one resolver per
/// configuration and invokes it once per loaded package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Merge all ancestor docstrings instead of taking the first one found.
    pub merge_docstrings: bool,
    /// Separator inserted between merged docstring fragments.
    pub merge_separator: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            merge_docstrings: false,
            merge_separator: DEFAULT_MERGE_SEPARATOR.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Returns the inheritance strategy selected by this configuration.
    pub fn strategy(&self) -> InheritStrategy {
        if self.merge_docstrings {
            InheritStrategy::Merge
        } else {
            InheritStrategy::IfNotPresent
        }
    }
}

/// Loads resolver configuration from a JSON file.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(path: &Path) -> Result<ResolverConfig> {
    if !path.exists() {
        return Ok(ResolverConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| DocGraftError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: ResolverConfig =
        serde_json::from_str(&contents).map_err(|e| DocGraftError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    Ok(config)
}
