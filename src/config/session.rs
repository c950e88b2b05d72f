//! Session persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Session configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// YAML file holding the session between runs; in-memory when unset
    pub storage_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn is_persistent(&self) -> bool {
        self.storage_path.is_some()
    }
}
